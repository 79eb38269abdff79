//! Cache backend trait.

use crate::Result;
use std::sync::Arc;

/// Key/value store used as the local mirror of each resource.
///
/// Values are opaque strings (in practice serialized JSON arrays), the same
/// contract as browser `localStorage`. Implementations use interior
/// mutability so one backend can be shared by several stores.
pub trait CacheBackend: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Lists stored keys in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn keys(&self) -> Result<Vec<String>>;

    /// Short backend name for logs and status output.
    fn name(&self) -> &'static str;
}

impl<T: CacheBackend + ?Sized> CacheBackend for &T {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: CacheBackend + ?Sized> CacheBackend for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: CacheBackend + ?Sized> CacheBackend for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
