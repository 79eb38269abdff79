//! Results reported by store operations.

use crate::models::RecordId;
use crate::remote::RemoteError;
use std::fmt;

/// What a refresh did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The server list replaced the local items.
    Refreshed {
        /// Number of records now held.
        count: usize,
        /// Pending records that were dropped by the replacement.
        discarded_pending: usize,
    },
    /// The server was unavailable; local items were kept.
    Fallback {
        /// Why the refresh failed.
        error: RemoteError,
    },
}

impl RefreshOutcome {
    /// Returns true if the server list was applied.
    #[must_use]
    pub const fn is_refreshed(&self) -> bool {
        matches!(self, Self::Refreshed { .. })
    }
}

/// Why a mutation was applied only locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalReason {
    /// The record has never reached the server, so no call was made.
    Unsynced,
    /// The server call failed.
    Fallback {
        /// Message to show the user.
        message: String,
    },
}

/// What a create, update or delete did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted the change.
    Synced,
    /// The change was applied to local items and the cache only.
    AppliedLocally {
        /// Why the server was not updated.
        reason: LocalReason,
    },
}

impl MutationOutcome {
    pub(crate) fn fallback(err: &RemoteError) -> Self {
        Self::AppliedLocally {
            reason: LocalReason::Fallback {
                message: err.to_string(),
            },
        }
    }

    pub(crate) const fn unsynced() -> Self {
        Self::AppliedLocally {
            reason: LocalReason::Unsynced,
        }
    }

    /// Returns true if the server accepted the change.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }

    /// Returns the server error message for a failed call.
    #[must_use]
    pub fn fallback_message(&self) -> Option<&str> {
        match self {
            Self::AppliedLocally {
                reason: LocalReason::Fallback { message },
            } => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced => f.write_str("saved to server"),
            Self::AppliedLocally {
                reason: LocalReason::Unsynced,
            } => f.write_str("saved locally (record not yet synced)"),
            Self::AppliedLocally {
                reason: LocalReason::Fallback { message },
            } => write!(f, "saved locally (server error: {message})"),
        }
    }
}

/// What a create did, and the id the new record ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    /// Whether the server accepted the record.
    pub outcome: MutationOutcome,
    /// Server id from the echo, or the pending id of a local record. `None`
    /// when the server accepted the record without echoing it.
    pub id: Option<RecordId>,
}

impl CreateOutcome {
    /// Returns true if the server accepted the record.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.outcome.is_synced()
    }
}

impl fmt::Display for CreateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{id} {}", self.outcome),
            None => write!(f, "record {}", self.outcome),
        }
    }
}

/// Result of pushing pending records to the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Records the server accepted.
    pub pushed: usize,
    /// Records still pending afterwards.
    pub remaining: usize,
    /// The failure that stopped the push, if any.
    pub error: Option<RemoteError>,
}

impl SyncReport {
    /// Returns true if every pending record reached the server.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none() && self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_outcome_display() {
        assert_eq!(MutationOutcome::Synced.to_string(), "saved to server");
        assert_eq!(
            MutationOutcome::unsynced().to_string(),
            "saved locally (record not yet synced)"
        );

        let err = RemoteError::Status {
            status: 500,
            message: "Database down".to_string(),
        };
        let outcome = MutationOutcome::fallback(&err);
        assert_eq!(outcome.fallback_message(), Some("Database down"));
        assert!(!outcome.is_synced());
    }

    #[test]
    fn test_create_outcome_display() {
        let created = CreateOutcome {
            outcome: MutationOutcome::Synced,
            id: Some(RecordId::synced(42)),
        };
        assert_eq!(created.to_string(), "42 saved to server");
        assert!(created.is_synced());

        let no_echo = CreateOutcome {
            outcome: MutationOutcome::Synced,
            id: None,
        };
        assert_eq!(no_echo.to_string(), "record saved to server");
    }

    #[test]
    fn test_sync_report_complete() {
        assert!(SyncReport::default().is_complete());
        let report = SyncReport {
            pushed: 1,
            remaining: 1,
            error: Some(RemoteError::Payload("x".to_string())),
        };
        assert!(!report.is_complete());
    }
}
