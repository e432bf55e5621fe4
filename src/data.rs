//! Loading record files.
//!
//! Records come from a JSON array file or a JSON Lines file (`.jsonl`,
//! `.ndjson`), one object per line.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::grid::Record;

/// Errors that can occur while loading records.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be read.
    #[error("failed to read records: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON Lines file has an invalid line.
    #[error("invalid JSON on line {line}: {source}")]
    Line {
        /// 1-based line number.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The document is JSON but not an array of records.
    #[error("expected a JSON array of objects, found {0}")]
    NotAnArray(&'static str),
}

/// Result type for record loading.
pub type Result<T> = std::result::Result<T, DataError>;

/// Load records from `path`, choosing the format by extension.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    let lines = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("jsonl") | Some("ndjson")
    );
    let records = if lines {
        parse_json_lines(&content)?
    } else {
        parse_json_array(&content)?
    };
    info!(path = %path.display(), records = records.len(), "Loaded records");
    Ok(records)
}

/// Parse a JSON array of objects.
///
/// Array entries that are not objects become empty records so the rest of
/// the file still loads.
pub fn parse_json_array(content: &str) -> Result<Vec<Record>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Array(items) => Ok(items.into_iter().enumerate().map(to_record).collect()),
        other => Err(DataError::NotAnArray(kind_name(&other))),
    }
}

/// Parse JSON Lines, skipping blank lines.
pub fn parse_json_lines(content: &str) -> Result<Vec<Record>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<Value>(line)
                .map(|value| to_record((index, value)))
                .map_err(|source| DataError::Line {
                    line: index + 1,
                    source,
                })
        })
        .collect()
}

fn to_record((index, value): (usize, Value)) -> Record {
    if !value.is_object() {
        warn!(index, kind = kind_name(&value), "Record is not an object, showing it empty");
    }
    Record::from_value(value)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_array() {
        let records = parse_json_array(r#"[{"name": "Ann"}, {"name": "Bob"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("name"), "Bob");
    }

    #[test]
    fn test_non_object_entries_become_empty() {
        let records = parse_json_array(r#"[{"name": "Ann"}, 3, null]"#).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[1].is_empty());
        assert!(records[2].is_empty());
    }

    #[test]
    fn test_top_level_object_rejected() {
        let err = parse_json_array(r#"{"name": "Ann"}"#).unwrap_err();
        assert!(matches!(err, DataError::NotAnArray("an object")));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_json_array("[{"), Err(DataError::Json(_))));
    }

    #[test]
    fn test_parse_lines() {
        let records = parse_json_lines("{\"n\": 1}\n\n{\"n\": 2}\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("n"), "2");
    }

    #[test]
    fn test_parse_lines_reports_line_number() {
        let err = parse_json_lines("{\"n\": 1}\n{oops}\n").unwrap_err();
        assert!(matches!(err, DataError::Line { line: 2, .. }));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = TempDir::new().unwrap();
        let array = dir.path().join("users.json");
        std::fs::write(&array, r#"[{"id": 1}]"#).unwrap();
        assert_eq!(load_records(&array).unwrap().len(), 1);

        let lines = dir.path().join("users.jsonl");
        std::fs::write(&lines, "{\"id\": 1}\n{\"id\": 2}\n").unwrap();
        assert_eq!(load_records(&lines).unwrap().len(), 2);

        let missing = load_records(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(DataError::Read(_))));
    }
}
