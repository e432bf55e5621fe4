//! Data-grid engine.
//!
//! Turns an array of opaque records plus a column schema into the rows of one
//! page: search, per-column filters, a stable sort, pagination and a
//! selection that survives all of them. Nothing in here draws; the
//! [`crate::ui`] layer renders a [`GridView`] with ratatui.

pub mod column;
pub mod controller;
pub mod format;
pub mod pagination;
pub mod query;
pub mod record;
pub mod selection;

pub use column::{
    BadgeVariant, CellContent, Column, ColumnSchema, ColumnType, ComparePreset, SchemaError,
};
pub use controller::{GridConfig, GridView, TableController, VisibleRow};
pub use format::CurrencyFormat;
pub use query::{FilterMap, SortConfig, SortDirection};
pub use record::{Record, RowKey};
pub use selection::SelectionTracker;
