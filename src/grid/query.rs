//! The query pipeline: search, then filter, then sort.
//!
//! Every stage is a pure function over row indices into the current record
//! array, so the pipeline never copies records and never invents rows: its
//! output is always a reordered subset of its input.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use super::column::{ColumnSchema, CompareFn};
use super::format::parse_number;
use super::record::{value_text, Record};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// The active sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    key: Option<String>,
    direction: SortDirection,
}

impl SortConfig {
    /// Sort by `key` in `direction`.
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Select `key` as the sort column.
    ///
    /// Reselecting the active key flips the direction; any other key starts
    /// ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    /// The active sort key.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The active direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Header indicator for a column: an arrow when it is the sort key.
    pub fn indicator(&self, column_key: &str) -> Option<&'static str> {
        if self.key.as_deref() != Some(column_key) {
            return None;
        }
        Some(match self.direction {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        })
    }
}

/// Free-text filters keyed by column key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterMap(BTreeMap<String, String>);

impl FilterMap {
    /// Create an empty filter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter for a column; an empty value removes it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    /// The filter text for a column, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// All non-empty filters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The query-side state and feature flags the pipeline reads.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    /// Search text; ignored when empty or when `searchable` is off.
    pub search: &'a str,
    /// Column filters.
    pub filters: &'a FilterMap,
    /// Sort selection.
    pub sort: &'a SortConfig,
    /// Whether the search stage runs.
    pub searchable: bool,
    /// Whether the filter stage runs.
    pub filterable: bool,
    /// Whether the sort stage runs.
    pub sortable: bool,
}

/// Keep rows where any accessor-backed column contains `term`, ignoring case.
pub fn search_stage(records: &[Record], rows: Vec<usize>, schema: &ColumnSchema, term: &str) -> Vec<usize> {
    if term.is_empty() {
        return rows;
    }
    let needle = term.to_lowercase();
    let paths: Vec<&str> = schema
        .columns()
        .iter()
        .filter_map(|column| column.accessor_path())
        .collect();

    rows.into_iter()
        .filter(|&row| {
            let record = &records[row];
            paths
                .iter()
                .any(|path| record.text(path).to_lowercase().contains(&needle))
        })
        .collect()
}

/// Keep rows matching every `(field, text)` filter as a case-insensitive substring.
pub fn filter_stage<'f>(
    records: &[Record],
    rows: Vec<usize>,
    filters: impl IntoIterator<Item = (&'f str, &'f str)>,
) -> Vec<usize> {
    let filters: Vec<(&str, String)> = filters
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(field, text)| (field, text.to_lowercase()))
        .collect();
    if filters.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|&row| {
            let record = &records[row];
            filters
                .iter()
                .all(|(field, needle)| record.text(field).to_lowercase().contains(needle.as_str()))
        })
        .collect()
}

/// How two field values are compared when sorting.
#[derive(Clone, Copy)]
enum CompareMode<'c> {
    Numeric,
    Boolean,
    Text,
    Declared(&'c CompareFn),
}

enum SortKey<'v> {
    Number(f64),
    Bool(bool),
    Text(String),
    Raw(&'v Value),
}

impl CompareMode<'_> {
    /// Infer a mode from the first non-null value among `rows`.
    fn infer(records: &[Record], rows: &[usize], field: &str) -> Self {
        let sample = rows
            .iter()
            .filter_map(|&row| records[row].lookup(field))
            .find(|value| !value.is_null());
        match sample {
            Some(Value::Number(_)) => CompareMode::Numeric,
            Some(Value::Bool(_)) => CompareMode::Boolean,
            _ => CompareMode::Text,
        }
    }

    /// The sort key for a value, or `None` when it is not comparable.
    fn key<'v>(self, value: Option<&'v Value>) -> Option<SortKey<'v>> {
        let value = value.filter(|value| !value.is_null())?;
        match self {
            CompareMode::Numeric => parse_number(value).map(SortKey::Number),
            CompareMode::Boolean => value.as_bool().map(SortKey::Bool),
            CompareMode::Text => Some(SortKey::Text(value_text(value))),
            CompareMode::Declared(_) => Some(SortKey::Raw(value)),
        }
    }

    fn compare(self, a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
        match (self, a, b) {
            (_, SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (_, SortKey::Bool(x), SortKey::Bool(y)) => x.cmp(y),
            (_, SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
            (CompareMode::Declared(compare), SortKey::Raw(x), SortKey::Raw(y)) => compare(*x, *y),
            _ => Ordering::Equal,
        }
    }
}

/// Stable sort of `rows` by the value at `field`.
///
/// Uses `comparator` when given, otherwise a mode inferred from the data.
/// Rows whose value is missing or not comparable keep their slots; the
/// comparable rows are sorted among the remaining slots. Equal values keep
/// their input order in both directions.
pub fn sort_stage(
    records: &[Record],
    rows: &mut [usize],
    field: &str,
    direction: SortDirection,
    comparator: Option<&CompareFn>,
) {
    let mode = match comparator {
        Some(compare) => CompareMode::Declared(compare),
        None => CompareMode::infer(records, rows, field),
    };

    let mut slots = Vec::with_capacity(rows.len());
    let mut keyed = Vec::with_capacity(rows.len());
    for (slot, &row) in rows.iter().enumerate() {
        if let Some(key) = mode.key(records[row].lookup(field)) {
            slots.push(slot);
            keyed.push((key, row));
        }
    }

    keyed.sort_by(|(a, _), (b, _)| direction.apply(mode.compare(a, b)));

    for (slot, (_, row)) in slots.into_iter().zip(keyed) {
        rows[slot] = row;
    }
}

/// Run search → filter → sort over all records, returning ordered row indices.
pub fn run_pipeline(records: &[Record], schema: &ColumnSchema, query: Query<'_>) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..records.len()).collect();

    if query.searchable && !query.search.is_empty() {
        rows = search_stage(records, rows, schema, query.search);
        trace!(remaining = rows.len(), "Search stage");
    }

    if query.filterable && !query.filters.is_empty() {
        let active = query
            .filters
            .iter()
            .filter(|(key, _)| schema.get(key).is_some_and(|column| column.is_filterable()));
        rows = filter_stage(records, rows, active);
        trace!(remaining = rows.len(), "Filter stage");
    }

    if query.sortable {
        let column = query
            .sort
            .key()
            .and_then(|key| schema.get(key))
            .filter(|column| column.is_sortable());
        if let Some(column) = column {
            let key = column.key();
            sort_stage(records, &mut rows, key, query.sort.direction(), column.compare_fn());
            trace!(key, direction = ?query.sort.direction(), "Sort stage");
        }
    }

    rows
}
