//! Local cache layer.
//!
//! A [`CacheBackend`] is the offline mirror behind every resource store:
//! - **Filesystem**: one JSON file per key (default)
//! - **`SQLite`**: one row per key in a single database file
//! - **Memory**: process-local, for tests and throwaway runs

mod filesystem;
mod memory;
mod sqlite;
mod traits;

pub use filesystem::FilesystemCache;
pub use memory::MemoryCache;
pub use sqlite::SqliteCache;
pub use traits::CacheBackend;

use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File name of the `SQLite` cache inside the data directory.
pub const SQLITE_FILE_NAME: &str = "fieldstore.db";

/// Directory name of the filesystem cache inside the data directory.
pub const CACHE_DIR_NAME: &str = "cache";

/// Available cache backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackendKind {
    /// [`FilesystemCache`].
    #[default]
    Filesystem,
    /// [`SqliteCache`].
    Sqlite,
    /// [`MemoryCache`].
    Memory,
}

impl CacheBackendKind {
    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filesystem => "filesystem",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for CacheBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheBackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "filesystem" | "fs" | "file" => Ok(Self::Filesystem),
            "sqlite" => Ok(Self::Sqlite),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(Error::InvalidInput(format!(
                "unknown cache backend '{other}' (expected filesystem, sqlite or memory)"
            ))),
        }
    }
}

/// Opens the configured cache backend under `data_dir`.
///
/// # Errors
///
/// Returns an error if the backend's files cannot be created or opened.
pub fn open_cache(kind: CacheBackendKind, data_dir: &Path) -> Result<Box<dyn CacheBackend>> {
    let backend: Box<dyn CacheBackend> = match kind {
        CacheBackendKind::Filesystem => {
            Box::new(FilesystemCache::with_create(data_dir.join(CACHE_DIR_NAME))?)
        },
        CacheBackendKind::Sqlite => Box::new(SqliteCache::open(data_dir.join(SQLITE_FILE_NAME))?),
        CacheBackendKind::Memory => Box::new(MemoryCache::new()),
    };
    tracing::debug!(
        backend = backend.name(),
        data_dir = %data_dir.display(),
        "Opened cache backend"
    );
    Ok(backend)
}
