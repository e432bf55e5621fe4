//! Column schema and the cell rendering contract.
//!
//! A [`Column`] describes how to read one logical field from a [`Record`],
//! how to display it and whether it takes part in sorting and filtering.
//! Host-supplied hooks (`render`, badge variants, hrefs, comparators) are
//! stored as shared closures so a schema can be cloned cheaply.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::format::{format_currency, format_date, parse_date, parse_number, CurrencyFormat};
use super::record::{value_text, Record};

/// Custom cell renderer, called with the record and its row index on the page.
pub type RenderFn = Arc<dyn Fn(&Record, usize) -> CellContent + Send + Sync>;
/// Maps a badge column's value to its visual variant.
pub type BadgeVariantFn = Arc<dyn Fn(&Value) -> BadgeVariant + Send + Sync>;
/// Maps a link column's value to its target.
pub type HrefFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;
/// Total order over two present (non-null) values.
pub type CompareFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// How a column formats its value when no custom renderer is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Raw text.
    #[default]
    Plain,
    /// Variant-tagged label.
    Badge,
    /// Label with a target href.
    Link,
    /// Short locale date.
    Date,
    /// Locale currency amount.
    Currency,
}

/// Visual variant for badge cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    /// Neutral styling.
    #[default]
    Default,
    /// Positive state (active, paid).
    Success,
    /// Needs attention (pending, trial).
    Warning,
    /// Negative state (banned, overdue).
    Danger,
    /// Informational.
    Info,
}

/// Display-ready cell content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// No value.
    Empty,
    /// Plain text.
    Text(String),
    /// A label with a variant tag.
    Badge {
        /// Text shown inside the badge.
        label: String,
        /// Visual variant.
        variant: BadgeVariant,
    },
    /// A label with a link target.
    Link {
        /// Text shown for the link.
        label: String,
        /// Link target.
        href: String,
    },
}

impl CellContent {
    /// The textual part of the cell, as shown to the user.
    pub fn label(&self) -> &str {
        match self {
            CellContent::Empty => "",
            CellContent::Text(text) => text,
            CellContent::Badge { label, .. } | CellContent::Link { label, .. } => label,
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Schema entry for one logical field.
#[derive(Clone)]
pub struct Column {
    key: String,
    title: String,
    accessor: Option<String>,
    sortable: bool,
    filterable: bool,
    kind: ColumnType,
    currency: CurrencyFormat,
    render: Option<RenderFn>,
    badge_variant: Option<BadgeVariantFn>,
    href: Option<HrefFn>,
    comparator: Option<CompareFn>,
}

impl Column {
    /// A data column reading the field named by `key`.
    ///
    /// Sortable by default, not filterable.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            accessor: Some(key.clone()),
            key,
            title: title.into(),
            sortable: true,
            filterable: false,
            kind: ColumnType::Plain,
            currency: CurrencyFormat::default(),
            render: None,
            badge_variant: None,
            href: None,
            comparator: None,
        }
    }

    /// A computed or action column with no accessor.
    ///
    /// Such a column is never sortable or filterable and only shows what its
    /// renderer produces.
    pub fn computed(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            accessor: None,
            sortable: false,
            ..Self::new(key, title)
        }
    }

    /// Read values from `path` instead of the column key.
    pub fn accessor(mut self, path: impl Into<String>) -> Self {
        self.accessor = Some(path.into());
        self
    }

    /// Set whether the column can be sorted. Ignored for computed columns.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set whether the column can be filtered. Ignored for computed columns.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Set the display type.
    pub fn kind(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        self
    }

    /// Currency settings for `currency` columns.
    pub fn currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    /// Custom renderer, taking precedence over the type formatter.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record, usize) -> CellContent + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Badge variant hook for `badge` columns.
    pub fn badge_variant<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) -> BadgeVariant + Send + Sync + 'static,
    {
        self.badge_variant = Some(Arc::new(hook));
        self
    }

    /// Href hook for `link` columns.
    pub fn href<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.href = Some(Arc::new(hook));
        self
    }

    /// Declared sort comparator for this column's values.
    pub fn comparator<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// Unique key of the column.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Field path values are read from, if any.
    pub fn accessor_path(&self) -> Option<&str> {
        self.accessor.as_deref()
    }

    /// Display type.
    pub fn column_type(&self) -> ColumnType {
        self.kind
    }

    /// Whether the column takes part in sorting.
    pub fn is_sortable(&self) -> bool {
        self.sortable && self.accessor.is_some()
    }

    /// Whether the column accepts a filter.
    pub fn is_filterable(&self) -> bool {
        self.filterable && self.accessor.is_some()
    }

    /// Declared comparator, if any.
    pub fn compare_fn(&self) -> Option<&CompareFn> {
        self.comparator.as_ref()
    }

    /// Compute the display value of this column for one record.
    ///
    /// A custom renderer wins; otherwise the accessor's value goes through the
    /// type formatter. Evaluated fresh on every call.
    pub fn cell(&self, record: &Record, row_index: usize) -> CellContent {
        if let Some(render) = &self.render {
            return render(record, row_index);
        }

        let Some(value) = self
            .accessor
            .as_deref()
            .and_then(|path| record.lookup(path))
            .filter(|value| !value.is_null())
        else {
            return CellContent::Empty;
        };

        match self.kind {
            ColumnType::Plain => CellContent::Text(value_text(value)),
            ColumnType::Badge => CellContent::Badge {
                label: value_text(value),
                variant: self
                    .badge_variant
                    .as_ref()
                    .map(|hook| hook(value))
                    .unwrap_or_default(),
            },
            ColumnType::Link => {
                let label = value_text(value);
                let href = match &self.href {
                    Some(hook) => hook(value),
                    None => label.clone(),
                };
                CellContent::Link { label, href }
            }
            ColumnType::Date => CellContent::Text(format_date(value)),
            ColumnType::Currency => CellContent::Text(format_currency(value, &self.currency)),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("kind", &self.kind)
            .field("render", &self.render.is_some())
            .field("comparator", &self.comparator.is_some())
            .finish_non_exhaustive()
    }
}

/// Built-in comparators that a grid definition file can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparePreset {
    /// Byte-wise lexicographic on the text form.
    Text,
    /// Case-insensitive lexicographic on the text form.
    TextCi,
    /// Numeric; non-numeric values sort before numbers.
    Numeric,
    /// Chronological; unparseable values sort before dates.
    Date,
}

impl ComparePreset {
    /// Build the comparator closure for this preset.
    pub fn comparator(self) -> CompareFn {
        match self {
            ComparePreset::Text => Arc::new(|a: &Value, b: &Value| value_text(a).cmp(&value_text(b))),
            ComparePreset::TextCi => Arc::new(|a: &Value, b: &Value| {
                value_text(a)
                    .to_lowercase()
                    .cmp(&value_text(b).to_lowercase())
            }),
            ComparePreset::Numeric => Arc::new(|a: &Value, b: &Value| {
                match (parse_number(a), parse_number(b)) {
                    (Some(x), Some(y)) => x.total_cmp(&y),
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }),
            ComparePreset::Date => Arc::new(|a: &Value, b: &Value| parse_date(a).cmp(&parse_date(b))),
        }
    }
}

/// Errors in a column schema definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Two columns share a key.
    #[error("duplicate column key '{0}'")]
    DuplicateKey(String),

    /// A column has an empty key.
    #[error("column #{0} has an empty key")]
    EmptyKey(usize),
}

/// An ordered, validated set of columns with unique keys.
#[derive(Debug, Clone, Default)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Validate and wrap a list of columns.
    pub fn new(columns: Vec<Column>) -> Result<Self, SchemaError> {
        let mut keys = HashSet::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.key.is_empty() {
                return Err(SchemaError::EmptyKey(index));
            }
            if !keys.insert(column.key.as_str()) {
                return Err(SchemaError::DuplicateKey(column.key.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Infer plain, sortable, filterable columns from a record's fields.
    pub fn infer(record: &Record) -> Self {
        let columns = record
            .fields()
            .map(|field| Column::new(field, field).filterable(true))
            .collect();
        Self { columns }
    }

    /// Columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Position of a column by key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.key == key)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
