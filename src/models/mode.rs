//! Store connectivity mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a store's most recent network call succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// The last network call succeeded; items mirror the server.
    #[default]
    Api,
    /// The last network call failed; items come from the local cache.
    Local,
}

impl StoreMode {
    /// Returns the mode as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Local => "local",
        }
    }

    /// Returns true in LOCAL mode.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
