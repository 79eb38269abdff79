//! Declarative field mapping between server payloads and view records.

use crate::models::{Record, RecordId, ServerId};
use crate::{Error, Result};
use serde_json::{Map, Number, Value};

/// How a mapped field is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String. Numbers and booleans are stringified; missing becomes the
    /// rule's default text or `""`.
    Text,
    /// Number. Numeric strings are parsed; anything else becomes `0`.
    Number,
    /// Whole number. Fractions are rounded; anything else becomes `0`.
    Integer,
    /// Boolean. `"true"`/`"false"` strings are accepted; missing is `false`.
    Bool,
    /// Copied unchanged; omitted when missing.
    Raw,
}

/// One view field and the server fields it is read from.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// View-model field name.
    pub name: &'static str,
    /// Server field names, tried in order. The first is also the name used
    /// when writing the field back to the server.
    pub sources: &'static [&'static str],
    /// Coercion applied to the value.
    pub kind: FieldKind,
    /// Default for [`FieldKind::Text`] fields.
    pub default_text: Option<&'static str>,
}

impl FieldRule {
    const fn new(name: &'static str, sources: &'static [&'static str], kind: FieldKind) -> Self {
        Self {
            name,
            sources,
            kind,
            default_text: None,
        }
    }

    /// A text field.
    #[must_use]
    pub const fn text(name: &'static str, sources: &'static [&'static str]) -> Self {
        Self::new(name, sources, FieldKind::Text)
    }

    /// A numeric field.
    #[must_use]
    pub const fn number(name: &'static str, sources: &'static [&'static str]) -> Self {
        Self::new(name, sources, FieldKind::Number)
    }

    /// A whole-number field.
    #[must_use]
    pub const fn integer(name: &'static str, sources: &'static [&'static str]) -> Self {
        Self::new(name, sources, FieldKind::Integer)
    }

    /// A boolean field.
    #[must_use]
    pub const fn boolean(name: &'static str, sources: &'static [&'static str]) -> Self {
        Self::new(name, sources, FieldKind::Bool)
    }

    /// A field copied as-is.
    #[must_use]
    pub const fn raw(name: &'static str, sources: &'static [&'static str]) -> Self {
        Self::new(name, sources, FieldKind::Raw)
    }

    /// Sets the default used when no source field is present.
    #[must_use]
    pub const fn or(mut self, default: &'static str) -> Self {
        self.default_text = Some(default);
        self
    }

    /// Server field name used for outgoing payloads.
    #[must_use]
    pub const fn server_name(&self) -> &'static str {
        if self.sources.is_empty() {
            self.name
        } else {
            self.sources[0]
        }
    }

    fn read(&self, object: &Map<String, Value>) -> Option<Value> {
        let source = if self.sources.is_empty() {
            std::slice::from_ref(&self.name)
        } else {
            self.sources
        };
        let found = source
            .iter()
            .filter_map(|key| object.get(*key))
            .find(|value| is_present(value));

        match self.kind {
            FieldKind::Text => Some(Value::String(found.map_or_else(
                || self.default_text.unwrap_or_default().to_string(),
                |value| crate::models::value_text(value).unwrap_or_default(),
            ))),
            FieldKind::Number => Some(Value::Number(
                found.and_then(coerce_number).unwrap_or_else(|| Number::from(0)),
            )),
            FieldKind::Integer => Some(Value::Number(Number::from(
                found.and_then(coerce_integer).unwrap_or(0),
            ))),
            FieldKind::Bool => Some(Value::Bool(found.is_some_and(coerce_bool))),
            FieldKind::Raw => found.cloned(),
        }
    }
}

/// Mapping table for one resource.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    /// Server field holding the record id.
    pub id_field: &'static str,
    /// Field rules, in display order.
    pub rules: &'static [FieldRule],
}

impl FieldMapping {
    /// Creates a mapping with `id` as the id field.
    #[must_use]
    pub const fn new(rules: &'static [FieldRule]) -> Self {
        Self {
            id_field: "id",
            rules,
        }
    }

    /// Sets the server field holding the record id.
    #[must_use]
    pub const fn with_id_field(mut self, id_field: &'static str) -> Self {
        self.id_field = id_field;
        self
    }

    /// Returns the rule for a view field.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Normalizes one server object into a synced record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the value is not an object or has
    /// no usable id.
    pub fn normalize(&self, value: &Value) -> Result<Record> {
        let object = value.as_object().ok_or_else(|| {
            Error::InvalidInput(format!("expected a JSON object, got {}", json_kind(value)))
        })?;

        let server_id = object
            .get(self.id_field)
            .and_then(ServerId::from_json)
            .ok_or_else(|| {
                Error::InvalidInput(format!("record has no usable '{}' field", self.id_field))
            })?;

        let mut fields = Map::with_capacity(self.rules.len());
        for rule in self.rules {
            if let Some(value) = rule.read(object) {
                fields.insert(rule.name.to_string(), value);
            }
        }

        Ok(Record::new(RecordId::Synced { server_id }, fields))
    }

    /// Converts view fields into a server payload.
    ///
    /// Mapped fields are written under their primary server name; unmapped
    /// fields pass through unchanged. `id` is never included.
    #[must_use]
    pub fn denormalize(&self, fields: &Map<String, Value>) -> Map<String, Value> {
        let mut payload = Map::with_capacity(fields.len());
        for (key, value) in fields {
            if key == "id" || key == self.id_field {
                continue;
            }
            let server_key = self
                .rule(key)
                .map_or(key.as_str(), |rule| rule.server_name());
            payload.insert(server_key.to_string(), value.clone());
        }
        payload
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(|_| n.clone()),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Some(Number::from(i));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
        },
        Value::Bool(b) => Some(Number::from(i64::from(*b))),
        _ => None,
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => return Some(i64::from(*b)),
        _ => return None,
    };
    if !f.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(f.round() as i64)
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
