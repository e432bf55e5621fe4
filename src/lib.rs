//! datagrid - a searchable, sortable, paginated data grid.
//!
//! The [`grid`] module is the engine: a [`grid::TableController`] owns the
//! records, column schema and interaction state and derives the visible page
//! from them. The remaining modules build a terminal browser on top of it.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod grid;
pub mod logging;
pub mod ui;
