//! Grid definition files.
//!
//! A grid file is TOML with an optional `[grid]` table of feature flags and
//! a `[[columns]]` array describing the schema:
//!
//! ```toml
//! [grid]
//! selectable = true
//! identity_field = "id"
//!
//! [[columns]]
//! key = "status"
//! title = "Status"
//! type = "badge"
//! badges = { active = "success", banned = "danger" }
//!
//! [[columns]]
//! key = "profile"
//! type = "link"
//! href = "https://example.com/users/{value}"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ConfigError, Result};
use crate::grid::format::MAX_DECIMALS;
use crate::grid::record::value_text;
use crate::grid::{
    BadgeVariant, CellContent, Column, ColumnSchema, ColumnType, ComparePreset, CurrencyFormat,
    GridConfig, Record,
};

/// Placeholder replaced by the cell value in `href` templates.
const VALUE_PLACEHOLDER: &str = "{value}";

/// One column of a grid definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSpec {
    /// Unique column key; also the field read for sorting and filtering.
    pub key: String,
    /// Header text. Defaults to the key.
    pub title: Option<String>,
    /// Field path to read. Defaults to the key.
    pub accessor: Option<String>,
    /// Whether the column sorts. Defaults to true.
    pub sortable: Option<bool>,
    /// Whether the column accepts a filter.
    pub filterable: bool,
    /// Display type.
    #[serde(rename = "type")]
    pub kind: ColumnType,
    /// Named comparator used when sorting.
    pub compare: Option<ComparePreset>,
    /// Badge variant per value text, for `badge` columns.
    pub badges: BTreeMap<String, BadgeVariant>,
    /// Variant for values missing from `badges`.
    pub default_badge: BadgeVariant,
    /// Link target template for `link` columns.
    pub href: Option<String>,
    /// Currency symbol for `currency` columns.
    pub currency_symbol: Option<String>,
    /// Decimal digits for `currency` columns.
    pub currency_decimals: Option<u8>,
    /// Column without an accessor.
    pub computed: bool,
    /// Text template for computed columns, with `{field.path}` placeholders.
    pub template: Option<String>,
}

impl ColumnSpec {
    /// Build the runtime column.
    pub fn to_column(&self) -> Result<Column> {
        if let Some(decimals) = self.currency_decimals {
            if decimals > MAX_DECIMALS {
                return Err(ConfigError::ValidationError(format!(
                    "column '{}': currency_decimals must be at most {}",
                    self.key, MAX_DECIMALS
                )));
            }
        }
        if self.computed && self.accessor.is_some() {
            return Err(ConfigError::ValidationError(format!(
                "column '{}': a computed column cannot have an accessor",
                self.key
            )));
        }
        if self.template.is_some() && !self.computed {
            return Err(ConfigError::ValidationError(format!(
                "column '{}': template is only allowed on computed columns",
                self.key
            )));
        }

        let title = self.title.clone().unwrap_or_else(|| self.key.clone());
        let mut column = if self.computed {
            Column::computed(self.key.as_str(), title)
        } else {
            let column = Column::new(self.key.as_str(), title)
                .sortable(self.sortable.unwrap_or(true))
                .filterable(self.filterable);
            match &self.accessor {
                Some(path) => column.accessor(path.as_str()),
                None => column,
            }
        };
        column = column.kind(self.kind);

        if let Some(template) = self.template.clone() {
            column = column.render(move |record, _| render_template(&template, record));
        }
        if let Some(preset) = self.compare {
            let compare = preset.comparator();
            column = column.comparator(move |a, b| compare(a, b));
        }
        if !self.badges.is_empty() || self.default_badge != BadgeVariant::Default {
            let badges = self.badges.clone();
            let fallback = self.default_badge;
            column = column.badge_variant(move |value| {
                badges.get(&value_text(value)).copied().unwrap_or(fallback)
            });
        }
        if let Some(template) = self.href.clone() {
            column = column.href(move |value| template.replace(VALUE_PLACEHOLDER, &value_text(value)));
        }
        if self.currency_symbol.is_some() || self.currency_decimals.is_some() {
            let defaults = CurrencyFormat::default();
            column = column.currency(CurrencyFormat {
                symbol: self.currency_symbol.clone().unwrap_or(defaults.symbol),
                decimals: self.currency_decimals.unwrap_or(defaults.decimals),
            });
        }
        Ok(column)
    }
}

/// A parsed grid definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridFile {
    /// Feature flags and defaults.
    pub grid: GridConfig,
    /// Columns in display order.
    pub columns: Vec<ColumnSpec>,
}

impl GridFile {
    /// Read and parse a grid file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let file = Self::from_toml(&content)?;
        info!(path = %path.display(), columns = file.columns.len(), "Loaded grid definition");
        Ok(file)
    }

    /// Parse a grid file from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: GridFile = toml::from_str(content)?;
        if file.grid.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "grid.page_size must be greater than zero".to_string(),
            ));
        }
        Ok(file)
    }

    /// Build the validated column schema.
    pub fn schema(&self) -> Result<ColumnSchema> {
        let columns = self
            .columns
            .iter()
            .map(ColumnSpec::to_column)
            .collect::<Result<Vec<_>>>()?;
        let schema = ColumnSchema::new(columns)?;
        debug!(columns = schema.len(), "Built column schema");
        Ok(schema)
    }
}

/// Substitute `{path}` placeholders with the record's text at each path.
///
/// An unterminated `{` is copied through literally.
pub fn render_template(template: &str, record: &Record) -> CellContent {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                out.push_str(&record.text(&after[..close]));
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    if out.is_empty() {
        CellContent::Empty
    } else {
        CellContent::Text(out)
    }
}
