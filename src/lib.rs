//! # Fieldstore
//!
//! Offline-tolerant client data layer for a pharmaceutical field-force
//! backend.
//!
//! Every backend collection (users, products, targets, expenses,
//! notifications, doctors, tasks, visit reports) is mirrored by the same
//! generic [`ResourceStore`]: fetch the REST collection, normalize server
//! field names through a declarative [`FieldMapping`](normalize::FieldMapping),
//! mirror the result into a pluggable [`CacheBackend`], fall back to that
//! cache when the network fails, and search/paginate the result for display.
//!
//! ## Features
//!
//! - Network-first mutations that degrade per call to local edits
//! - Explicit pending/synced record identity, with an explicit push of
//!   records created offline
//! - Filesystem, `SQLite` and in-memory cache backends
//! - Text and JSON page rendering with a pagination strip
//!
//! ## Example
//!
//! ```rust,ignore
//! use fieldstore::{HttpCollection, MemoryCache, ResourceKind, ResourceStore};
//!
//! let spec = *ResourceKind::Products.spec();
//! let remote = HttpCollection::new(spec.endpoint("http://localhost:8080"));
//! let mut store = ResourceStore::open(spec, remote, MemoryCache::new());
//! store.refresh();
//! let page = store.render(1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod models;
pub mod normalize;
pub mod observability;
pub mod remote;
pub mod rendering;
pub mod resources;
pub mod storage;
pub mod store;
pub mod view;

// Re-exports for convenience
pub use config::FieldstoreConfig;
pub use models::{LocalId, Record, RecordId, ServerId, StoreMode};
pub use remote::{HttpCollection, RemoteCollection, RemoteError};
pub use resources::{ResourceKind, ResourceSpec};
pub use storage::{CacheBackend, CacheBackendKind, FilesystemCache, MemoryCache, SqliteCache};
pub use store::{
    CreateOutcome, FallbackBanner, LocalReason, MutationOutcome, RefreshOutcome, ResourceStore,
    SyncReport,
};
pub use view::{PageView, PaginationStrip, SearchFilter, paginate};

/// Error type for fieldstore operations.
///
/// Network failures inside a store never surface here: the store degrades to
/// local mode instead and reports the failure in its outcome types.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Unknown resource or backend names, malformed records, bad CLI fields |
/// | `OperationFailed` | Cache I/O, config file I/O, logging setup |
/// | `RecordNotFound` | A mutation names an id the store does not hold |
/// | `Remote` | A direct [`RemoteCollection`] call fails outside a store |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// No record with this id exists in the store.
    #[error("{resource}: no record with id '{id}'")]
    RecordNotFound {
        /// Resource name.
        resource: String,
        /// Rendered id that was looked up.
        id: String,
    },

    /// A remote call failed.
    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteError),
}

/// Result type alias for fieldstore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in seconds.
///
/// Falls back to 0 if the system clock is before the Unix epoch.
///
/// # Examples
///
/// ```rust
/// use fieldstore::current_timestamp;
///
/// let ts = current_timestamp();
/// assert!(ts > 0);
/// ```
#[must_use]
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Returns the current Unix timestamp in milliseconds.
#[must_use]
pub fn current_timestamp_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");

        let err = Error::RecordNotFound {
            resource: "products".to_string(),
            id: "L42".to_string(),
        };
        assert_eq!(err.to_string(), "products: no record with id 'L42'");

        let err = Error::from(RemoteError::Payload("not an array".to_string()));
        assert_eq!(
            err.to_string(),
            "remote call failed: invalid response payload: not an array"
        );
    }

    #[test]
    fn test_timestamps_agree() {
        let secs = current_timestamp();
        let millis = current_timestamp_millis();
        assert!(millis / 1000 >= secs);
        assert!(millis / 1000 - secs <= 1);
    }
}
