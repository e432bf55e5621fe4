//! Opaque records and stable row identities.
//!
//! A [`Record`] is a keyed mapping of field name to JSON value. The grid never
//! assumes a shape beyond the fields its columns reference; every lookup that
//! misses degrades to "no value" rather than an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row's underlying data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from any JSON value.
    ///
    /// Objects become records as-is; any other value yields an empty record so
    /// a heterogeneous input array still renders.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    /// Insert a field, returning the record for chaining.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a value by accessor path.
    ///
    /// The whole path is tried as a literal key first, so field names that
    /// contain dots still resolve. Otherwise the path is walked segment by
    /// segment through nested objects, with numeric segments indexing arrays.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(path) {
            return Some(value);
        }
        if !path.contains('.') {
            return None;
        }

        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// The stringified value at `path`, or an empty string when missing.
    pub fn text(&self, path: &str) -> String {
        self.lookup(path).map(value_text).unwrap_or_default()
    }

    /// Consume the record, returning the underlying JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// String form of a value as used by search, filter and plain cells.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Stable identity of a record within one input generation.
///
/// Selection is keyed by this rather than by on-screen position, so sorting,
/// filtering or paging never moves a selection onto a different record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    /// Value of the grid's identity field.
    Id(String),
    /// Index in the supplied, unfiltered record array.
    Position(usize),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => write!(f, "{}", id),
            RowKey::Position(index) => write!(f, "#{}", index),
        }
    }
}

/// Assign a [`RowKey`] to every record of a new input generation.
///
/// With an identity field, records with a non-empty value there are keyed by
/// it. Records missing the field, or repeating an id already seen, fall back
/// to their position so every key in the generation stays unique.
pub fn assign_keys(records: &[Record], identity_field: Option<&str>) -> Vec<RowKey> {
    let Some(field) = identity_field else {
        return (0..records.len()).map(RowKey::Position).collect();
    };

    let mut seen = std::collections::HashSet::with_capacity(records.len());
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record.text(field);
            if id.is_empty() {
                tracing::debug!(index, field, "Record has no identity value, keyed by position");
                RowKey::Position(index)
            } else if !seen.insert(id.clone()) {
                tracing::warn!(index, field, id = %id, "Duplicate identity value, keyed by position");
                RowKey::Position(index)
            } else {
                RowKey::Id(id)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_record() -> Record {
        Record::from_value(json!({
            "name": "Ann",
            "plan": { "name": "Pro", "seats": 5 },
            "tags": ["admin", "billing"],
            "a.b": "literal",
        }))
    }

    #[test]
    fn test_lookup_top_level() {
        let record = nested_record();
        assert_eq!(record.lookup("name"), Some(&json!("Ann")));
    }

    #[test]
    fn test_lookup_nested_path() {
        let record = nested_record();
        assert_eq!(record.lookup("plan.name"), Some(&json!("Pro")));
        assert_eq!(record.text("plan.seats"), "5");
        assert_eq!(record.text("tags.1"), "billing");
    }

    #[test]
    fn test_lookup_literal_dotted_key_wins() {
        let record = nested_record();
        assert_eq!(record.text("a.b"), "literal");
    }

    #[test]
    fn test_missing_field_is_empty_text() {
        let record = nested_record();
        assert_eq!(record.lookup("email"), None);
        assert_eq!(record.text("email"), "");
        assert_eq!(record.text("plan.missing.deeper"), "");
        assert_eq!(record.text("name.first"), "");
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(2.5)), "2.5");
        assert_eq!(value_text(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_non_object_becomes_empty_record() {
        assert!(Record::from_value(json!("oops")).is_empty());
        assert!(Record::from_value(json!(7)).is_empty());
    }

    #[test]
    fn test_assign_keys_by_position() {
        let records = vec![Record::new(), Record::new()];
        assert_eq!(
            assign_keys(&records, None),
            vec![RowKey::Position(0), RowKey::Position(1)]
        );
    }

    #[test]
    fn test_assign_keys_by_field_with_fallbacks() {
        let records = vec![
            Record::new().with("id", 7),
            Record::new().with("name", "no id"),
            Record::new().with("id", 7),
            Record::new().with("id", "x"),
        ];
        assert_eq!(
            assign_keys(&records, Some("id")),
            vec![
                RowKey::Id("7".to_string()),
                RowKey::Position(1),
                RowKey::Position(2),
                RowKey::Id("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_row_key_display() {
        assert_eq!(RowKey::Id("u-1".to_string()).to_string(), "u-1");
        assert_eq!(RowKey::Position(3).to_string(), "#3");
    }
}
