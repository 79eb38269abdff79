//! In-memory cache backend.

use super::traits::CacheBackend;
use crate::Result;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Process-local cache backed by a sorted map.
///
/// Nothing survives the process; used for tests and `cache_backend =
/// "memory"` runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Memory cache mutex was poisoned, recovering");
                poisoned.into_inner()
            },
        }
    }
}

impl CacheBackend for MemoryCache {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries().keys().cloned().collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
