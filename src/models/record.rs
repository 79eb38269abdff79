//! Record identity and payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier assigned by the server.
///
/// The backend uses numeric ids for most collections and string ids for a
/// few (notifications), so both shapes are preserved as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerId {
    /// Numeric id.
    Number(i64),
    /// String id.
    Text(String),
}

impl ServerId {
    /// Extracts a server id from a JSON value.
    ///
    /// Integral floats are accepted because some endpoints serialize ids as
    /// `1.0`. Empty strings, fractional numbers and other shapes yield `None`.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(Self::Number(i));
                }
                let f = n.as_f64()?;
                #[allow(clippy::cast_possible_truncation)]
                let truncated = f as i64;
                #[allow(clippy::cast_precision_loss)]
                let exact = (truncated as f64 - f).abs() < f64::EPSILON;
                exact.then_some(Self::Number(truncated))
            },
            Value::String(s) if !s.trim().is_empty() => Some(Self::Text(s.trim().to_string())),
            _ => None,
        }
    }

    /// Returns the id as it appears in a resource URL path segment.
    #[must_use]
    pub fn as_path_segment(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ServerId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ServerId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for ServerId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Client-generated identifier for a record created while offline.
///
/// Wraps the Unix timestamp in milliseconds at creation time and renders as
/// `L<millis>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalId(u64);

impl LocalId {
    /// Creates a local id from a raw millisecond value.
    #[must_use]
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond value.
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Generates a local id whose rendered form differs from every id in
    /// `existing`.
    ///
    /// Starts from the current time and steps forward one millisecond per
    /// collision, so ids created in a tight loop stay unique and ordered.
    pub fn generate<'a>(existing: impl IntoIterator<Item = &'a RecordId>) -> Self {
        let taken: std::collections::HashSet<String> =
            existing.into_iter().map(ToString::to_string).collect();
        let mut candidate = Self(crate::current_timestamp_millis());
        while taken.contains(&candidate.to_string()) {
            candidate = Self(candidate.0.saturating_add(1));
        }
        candidate
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Identity of a record in a resource store.
///
/// A record is either confirmed by the server or pending a first successful
/// round-trip. The distinction is explicit; nothing inspects the rendered id
/// to guess sync status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordId {
    /// Server-confirmed record.
    Synced {
        /// The server-assigned id.
        #[serde(rename = "serverId")]
        server_id: ServerId,
    },
    /// Record created locally and not yet accepted by the server.
    Pending {
        /// The client-generated id.
        #[serde(rename = "localId")]
        local_id: LocalId,
    },
}

impl RecordId {
    /// Creates a synced id.
    #[must_use]
    pub fn synced(server_id: impl Into<ServerId>) -> Self {
        Self::Synced {
            server_id: server_id.into(),
        }
    }

    /// Creates a pending id.
    #[must_use]
    pub const fn pending(local_id: LocalId) -> Self {
        Self::Pending { local_id }
    }

    /// Returns true if the server has not confirmed this record.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Returns the server id for synced records.
    #[must_use]
    pub const fn server_id(&self) -> Option<&ServerId> {
        match self {
            Self::Synced { server_id } => Some(server_id),
            Self::Pending { .. } => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced { server_id } => write!(f, "{server_id}"),
            Self::Pending { local_id } => write!(f, "{local_id}"),
        }
    }
}

/// A normalized record: identity plus view-model fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record identity.
    pub id: RecordId,
    /// View-model fields keyed by view name.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record.
    #[must_use]
    pub const fn new(id: RecordId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Returns true if the record is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.id.is_pending()
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a field rendered as display text.
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON text
    /// form, null and missing fields as `None`. Arrays and objects render as
    /// compact JSON.
    #[must_use]
    pub fn field_text(&self, field: &str) -> Option<String> {
        value_text(self.fields.get(field)?)
    }

    /// Shallow-merges `patch` into the record's fields.
    ///
    /// An `id` key in the patch is ignored; identity only changes through a
    /// server round-trip.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Flattens the record into a single JSON object with a rendered `id`
    /// and a `pending` flag.
    #[must_use]
    pub fn to_view_json(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 2);
        object.insert("id".to_string(), Value::String(self.id.to_string()));
        object.insert("pending".to_string(), Value::Bool(self.is_pending()));
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

/// Renders a JSON value as display text.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
