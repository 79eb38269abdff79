//! Offline notice raised when a store degrades to local mode.

use chrono::{DateTime, Utc};
use std::fmt;

/// Notice that a resource is being served from the local cache.
///
/// Carries the failure message and offers a retry action (the store's
/// `retry`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackBanner {
    /// Human-readable resource label.
    pub resource: &'static str,
    /// Error message from the failed call.
    pub message: String,
    /// Unix timestamp (seconds) at which the banner was raised.
    pub raised_at: u64,
}

impl FallbackBanner {
    /// Raises a banner now.
    #[must_use]
    pub fn new(resource: &'static str, message: impl Into<String>) -> Self {
        Self {
            resource,
            message: message.into(),
            raised_at: crate::current_timestamp(),
        }
    }

    /// Returns the raise time as UTC, if representable.
    #[must_use]
    pub fn raised_at_utc(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.raised_at)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl fmt::Display for FallbackBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: API unreachable, showing locally saved data ({}).",
            self.resource, self.message
        )?;
        if let Some(at) = self.raised_at_utc() {
            write!(f, " Since {}.", at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        f.write_str(" Retry to reconnect.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_display() {
        let banner = FallbackBanner {
            resource: "Products",
            message: "connect error: connection refused".to_string(),
            raised_at: 0,
        };
        assert_eq!(
            banner.to_string(),
            "Products: API unreachable, showing locally saved data (connect error: connection refused). Since 1970-01-01 00:00:00 UTC. Retry to reconnect."
        );
    }

    #[test]
    fn test_banner_new_sets_time() {
        let banner = FallbackBanner::new("Tasks", "HTTP 503");
        assert!(banner.raised_at > 0);
        assert!(banner.raised_at_utc().is_some());
    }
}
