//! Filesystem-based cache backend.
//!
//! Stores each key as `<base>/<key>.json`. This is the default backend and
//! the closest analogue of browser `localStorage`: one blob per key, no
//! schema, last writer wins.
//!
//! # Security
//!
//! - **Path traversal**: keys are validated before they become file names
//! - **File size limits**: oversized entries are rejected on read

use super::traits::CacheBackend;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum size of a cache entry (8MB).
const MAX_ENTRY_SIZE: u64 = 8 * 1024 * 1024;

/// File extension for cache entries.
const ENTRY_EXTENSION: &str = "json";

/// Cache backend that writes one file per key.
#[derive(Debug, Clone)]
pub struct FilesystemCache {
    base_path: PathBuf,
}

impl FilesystemCache {
    /// Creates a filesystem cache rooted at `base_path`.
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Creates a filesystem cache, failing if the directory cannot be created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_create(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| Error::OperationFailed {
            operation: "create_cache_dir".to_string(),
            cause: format!("{}: {e}", base_path.display()),
        })?;
        Ok(Self { base_path })
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if !is_safe_key(key) {
            return Err(Error::InvalidInput(format!(
                "Cache key contains invalid characters: {key}"
            )));
        }
        Ok(self.base_path.join(format!("{key}.{ENTRY_EXTENSION}")))
    }
}

/// Keys may contain alphanumerics, dash, underscore and dot, but never
/// start with a dot.
fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 200
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl CacheBackend for FilesystemCache {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let metadata = fs::metadata(&path).map_err(|e| Error::OperationFailed {
            operation: "read_cache_metadata".to_string(),
            cause: e.to_string(),
        })?;
        if metadata.len() > MAX_ENTRY_SIZE {
            return Err(Error::InvalidInput(format!(
                "Cache entry exceeds maximum size of {MAX_ENTRY_SIZE} bytes: {}",
                path.display()
            )));
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::OperationFailed {
                operation: "read_cache_entry".to_string(),
                cause: format!("{}: {e}", path.display()),
            })
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.base_path).map_err(|e| Error::OperationFailed {
            operation: "create_cache_dir".to_string(),
            cause: e.to_string(),
        })?;

        // Write-then-rename so a concurrent reader never sees a torn file.
        let tmp = self.base_path.join(format!(".{key}.{ENTRY_EXTENSION}.tmp"));
        fs::write(&tmp, value).map_err(|e| Error::OperationFailed {
            operation: "write_cache_entry".to_string(),
            cause: format!("{}: {e}", tmp.display()),
        })?;
        fs::rename(&tmp, &path).map_err(|e| Error::OperationFailed {
            operation: "commit_cache_entry".to_string(),
            cause: format!("{}: {e}", path.display()),
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.base_path).map_err(|e| Error::OperationFailed {
            operation: "read_cache_dir".to_string(),
            cause: e.to_string(),
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::OperationFailed {
                operation: "read_cache_dir_entry".to_string(),
                cause: e.to_string(),
            })?;
            if let Some(key) = key_from_path(&entry.path()) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

/// Extracts a cache key from an entry path, skipping temp files.
fn key_from_path(path: &Path) -> Option<String> {
    if path.extension().is_none_or(|ext| ext != ENTRY_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    is_safe_key(stem).then(|| stem.to_string())
}
