//! The table controller: owns grid state and recomputes the view.
//!
//! Each public operation mutates one piece of state (search term, filters,
//! sort, page, selection or the record set itself), then re-runs the query
//! pipeline and the windower eagerly and returns the fresh [`GridView`].
//! Operations are total: invalid pages are clamped, unknown column keys are
//! ignored, and nothing is ever surfaced to the host as an error.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::column::{CellContent, Column, ColumnSchema};
use super::pagination::{paginate, PageState};
use super::query::{run_pipeline, FilterMap, Query, SortConfig};
use super::record::{assign_keys, Record, RowKey};
use super::selection::SelectionTracker;

/// Feature flags and defaults supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Whether the search box filters rows.
    pub searchable: bool,
    /// Whether clicking headers sorts.
    pub sortable: bool,
    /// Whether per-column filters apply.
    pub filterable: bool,
    /// Whether rows are split into pages.
    pub pagination: bool,
    /// Rows per page.
    pub page_size: usize,
    /// Whether rows can be selected for bulk actions.
    pub selectable: bool,
    /// Field holding each record's stable id. Records are keyed by position
    /// when unset.
    pub identity_field: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            searchable: true,
            sortable: true,
            filterable: false,
            pagination: true,
            page_size: 10,
            selectable: false,
            identity_field: None,
        }
    }
}

/// A row of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    /// Stable identity of the record.
    pub key: RowKey,
    /// Index of the record in the supplied record array.
    pub source_index: usize,
    /// Position of the row on the current page.
    pub row_index: usize,
    /// Whether the record is selected.
    pub selected: bool,
}

/// Everything the host needs to draw one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridView {
    /// Rows of the current page, in display order.
    pub rows: Vec<VisibleRow>,
    /// Number of rows after search and filtering.
    pub total_rows: usize,
    /// Number of pages (at least 1).
    pub total_pages: usize,
    /// Current page (1-indexed, always within range).
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Page-button window.
    pub page_buttons: Vec<usize>,
    /// Active sort, for header indicators.
    pub sort: SortConfig,
    /// Number of selected records across all pages.
    pub selected_count: usize,
    /// Whether every visible row is selected.
    pub all_visible_selected: bool,
    /// Input generation the view was computed from.
    pub generation: u64,
}

impl GridView {
    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a next page exists.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a previous page exists.
    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }
}

/// Owns the grid's mutable state and derives the visible rows from it.
#[derive(Debug, Clone)]
pub struct TableController {
    records: Vec<Record>,
    keys: Vec<RowKey>,
    index_of: HashMap<RowKey, usize>,
    schema: ColumnSchema,
    config: GridConfig,
    search: String,
    filters: FilterMap,
    sort: SortConfig,
    page: PageState,
    selection: SelectionTracker,
    generation: u64,
    view: GridView,
}

impl TableController {
    /// Create a controller over `records` and compute the first view.
    pub fn new(records: Vec<Record>, schema: ColumnSchema, config: GridConfig) -> Self {
        let keys = assign_keys(&records, config.identity_field.as_deref());
        let index_of = index_keys(&keys);
        let page = PageState::new(config.page_size);
        let mut controller = Self {
            records,
            keys,
            index_of,
            schema,
            config,
            search: String::new(),
            filters: FilterMap::new(),
            sort: SortConfig::default(),
            page,
            selection: SelectionTracker::new(),
            generation: 0,
            view: GridView::default(),
        };
        controller.recompute();
        debug!(
            records = controller.records.len(),
            columns = controller.schema.len(),
            "Grid created"
        );
        controller
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Set the search text.
    pub fn set_search_term(&mut self, text: impl Into<String>) -> &GridView {
        self.search = text.into();
        debug!(search = %self.search, "Search term changed");
        self.recompute()
    }

    /// Set or clear (with empty text) a column filter.
    ///
    /// Unknown or non-filterable columns, or a grid without filtering, leave
    /// the state untouched.
    pub fn set_filter(&mut self, column_key: &str, text: impl Into<String>) -> &GridView {
        let accepted = self.config.filterable
            && self
                .schema
                .get(column_key)
                .is_some_and(Column::is_filterable);
        if accepted {
            let text = text.into();
            debug!(column = column_key, filter = %text, "Filter changed");
            self.filters.set(column_key, text);
        } else {
            debug!(column = column_key, "Ignoring filter on unknown or non-filterable column");
        }
        self.recompute()
    }

    /// Remove every column filter.
    pub fn clear_filters(&mut self) -> &GridView {
        self.filters.clear();
        self.recompute()
    }

    /// Sort by a column, flipping the direction when it is already active.
    pub fn set_sort(&mut self, column_key: &str) -> &GridView {
        let accepted = self.config.sortable
            && self.schema.get(column_key).is_some_and(Column::is_sortable);
        if accepted {
            self.sort.toggle(column_key);
            debug!(column = column_key, direction = ?self.sort.direction(), "Sort changed");
        } else {
            debug!(column = column_key, "Ignoring sort on unknown or non-sortable column");
        }
        self.recompute()
    }

    /// Go to a page; out-of-range values are clamped.
    pub fn set_page(&mut self, page: usize) -> &GridView {
        self.page.set_page(page);
        self.recompute()
    }

    /// Go to the next page, staying on the last one.
    pub fn next_page(&mut self) -> &GridView {
        let page = self.page.current_page() + 1;
        self.set_page(page)
    }

    /// Go to the previous page, staying on the first one.
    pub fn prev_page(&mut self) -> &GridView {
        let page = self.page.current_page().saturating_sub(1);
        self.set_page(page)
    }

    /// Change the page size (at least 1), keeping the page when still valid.
    pub fn set_page_size(&mut self, page_size: usize) -> &GridView {
        self.page.set_page_size(page_size);
        debug!(page_size = self.page.page_size(), "Page size changed");
        self.recompute()
    }

    /// Select every visible row, or deselect them when all are selected.
    pub fn toggle_select_all(&mut self) -> &GridView {
        if self.config.selectable {
            let visible: Vec<RowKey> = self.view.rows.iter().map(|row| row.key.clone()).collect();
            self.selection.toggle_all(&visible);
        }
        self.recompute()
    }

    /// Flip the selection of one record. Keys not in the current records are ignored.
    pub fn toggle_select_row(&mut self, key: &RowKey) -> &GridView {
        if self.config.selectable && self.index_of.contains_key(key) {
            self.selection.toggle(key.clone());
        }
        self.recompute()
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> &GridView {
        self.selection.clear();
        self.recompute()
    }

    /// Replace the records with a new input generation.
    ///
    /// Identities are reassigned, selections whose identity no longer exists
    /// are dropped, and the page is re-clamped. Positional identities never
    /// carry over: position `n` of the new records is a different record.
    pub fn set_records(&mut self, records: Vec<Record>) -> &GridView {
        self.keys = assign_keys(&records, self.config.identity_field.as_deref());
        self.index_of = index_keys(&self.keys);
        self.records = records;
        self.generation += 1;

        let existing: HashSet<&RowKey> = self
            .keys
            .iter()
            .filter(|key| matches!(key, RowKey::Id(_)))
            .collect();
        let dropped = self.selection.retain_existing(&existing);
        debug!(
            generation = self.generation,
            records = self.records.len(),
            dropped_selections = dropped,
            "Records replaced"
        );
        self.recompute()
    }

    fn recompute(&mut self) -> &GridView {
        let query = Query {
            search: &self.search,
            filters: &self.filters,
            sort: &self.sort,
            searchable: self.config.searchable,
            filterable: self.config.filterable,
            sortable: self.config.sortable,
        };
        let ordered = run_pipeline(&self.records, &self.schema, query);
        let slice = paginate(ordered.len(), &mut self.page, self.config.pagination);

        let rows: Vec<VisibleRow> = ordered[slice.range.clone()]
            .iter()
            .enumerate()
            .map(|(row_index, &source_index)| {
                let key = self.keys[source_index].clone();
                VisibleRow {
                    selected: self.selection.is_selected(&key),
                    key,
                    source_index,
                    row_index,
                }
            })
            .collect();

        let all_visible_selected = self
            .selection
            .all_selected(rows.iter().map(|row| &row.key));

        self.view = GridView {
            total_rows: ordered.len(),
            total_pages: slice.total_pages,
            current_page: slice.current_page,
            page_size: self.page.page_size(),
            page_buttons: slice.page_buttons,
            sort: self.sort.clone(),
            selected_count: self.selection.len(),
            all_visible_selected,
            generation: self.generation,
            rows,
        };
        trace!(
            total_rows = self.view.total_rows,
            page = self.view.current_page,
            visible = self.view.rows.len(),
            "Grid recomputed"
        );
        &self.view
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// The most recently computed view.
    pub fn view(&self) -> &GridView {
        &self.view
    }

    /// Column schema.
    pub fn columns(&self) -> &[Column] {
        self.schema.columns()
    }

    /// Column schema as a whole.
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Host configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Current search text.
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Current column filters.
    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    /// Current sort.
    pub fn sort(&self) -> &SortConfig {
        &self.sort
    }

    /// All records of the current generation.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records paired with their identities, in record order.
    pub fn keyed_records(&self) -> impl Iterator<Item = (&RowKey, &Record)> {
        self.keys.iter().zip(&self.records)
    }

    /// Look up a record by identity.
    pub fn record(&self, key: &RowKey) -> Option<&Record> {
        self.index_of.get(key).map(|&index| &self.records[index])
    }

    /// The record shown at `row_index` on the current page.
    pub fn visible_record(&self, row_index: usize) -> Option<&Record> {
        self.view
            .rows
            .get(row_index)
            .map(|row| &self.records[row.source_index])
    }

    /// Arguments for the host's row-click callback: the record and its row
    /// index on the page.
    pub fn row_click(&self, row_index: usize) -> Option<(&Record, usize)> {
        self.visible_record(row_index).map(|record| (record, row_index))
    }

    /// Rendered cells of a visible row, one per column.
    pub fn cells(&self, row: &VisibleRow) -> Vec<CellContent> {
        let record = &self.records[row.source_index];
        self.schema
            .columns()
            .iter()
            .map(|column| column.cell(record, row.row_index))
            .collect()
    }

    /// Selected identities in key order.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.selection.iter().cloned().collect()
    }

    /// Selected records, in record order.
    pub fn selected_records(&self) -> Vec<&Record> {
        self.keys
            .iter()
            .zip(&self.records)
            .filter(|(key, _)| self.selection.is_selected(key))
            .map(|(_, record)| record)
            .collect()
    }

    /// Whether the host should show its empty state instead of rows.
    pub fn is_empty_state(&self) -> bool {
        self.schema.is_empty() || self.view.rows.is_empty()
    }

    /// Input generation counter, bumped by [`TableController::set_records`].
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn index_keys(keys: &[RowKey]) -> HashMap<RowKey, usize> {
    keys.iter()
        .enumerate()
        .map(|(index, key)| (key.clone(), index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::column::ColumnType;
    use crate::grid::query::SortDirection;
    use serde_json::json;

    fn people() -> Vec<Record> {
        vec![
            Record::from_value(json!({"id": "u1", "name": "Bob", "age": 30})),
            Record::from_value(json!({"id": "u2", "name": "Ann", "age": 25})),
            Record::from_value(json!({"id": "u3", "name": "Cid", "age": 40})),
        ]
    }

    fn schema() -> ColumnSchema {
        ColumnSchema::new(vec![
            Column::new("name", "Name").filterable(true),
            Column::new("age", "Age"),
            Column::computed("actions", ""),
        ])
        .unwrap()
    }

    fn config() -> GridConfig {
        GridConfig {
            filterable: true,
            selectable: true,
            identity_field: Some("id".to_string()),
            ..GridConfig::default()
        }
    }

    fn many(count: usize) -> Vec<Record> {
        (0..count)
            .map(|i| Record::new().with("id", i).with("name", format!("user{:03}", i)))
            .collect()
    }

    fn visible_names(grid: &TableController) -> Vec<String> {
        (0..grid.view().rows.len())
            .filter_map(|i| grid.visible_record(i))
            .map(|record| record.text("name"))
            .collect()
    }

    fn id(value: &str) -> RowKey {
        RowKey::Id(value.to_string())
    }

    #[test]
    fn test_grid_config_defaults() {
        let config = GridConfig::default();
        assert!(config.searchable);
        assert!(config.sortable);
        assert!(!config.filterable);
        assert!(config.pagination);
        assert_eq!(config.page_size, 10);
        assert!(!config.selectable);
        assert!(config.identity_field.is_none());
    }

    #[test]
    fn test_initial_view_keeps_input_order() {
        let grid = TableController::new(people(), schema(), config());
        assert_eq!(visible_names(&grid), vec!["Bob", "Ann", "Cid"]);
        assert_eq!(grid.view().total_pages, 1);
        assert_eq!(grid.view().page_buttons, vec![1]);
    }

    #[test]
    fn test_sort_example() {
        let mut grid = TableController::new(people(), schema(), config());
        grid.set_sort("name");
        assert_eq!(visible_names(&grid), vec!["Ann", "Bob", "Cid"]);
        assert_eq!(grid.view().sort, SortConfig::by("name", SortDirection::Asc));
        grid.set_sort("name");
        assert_eq!(visible_names(&grid), vec!["Cid", "Bob", "Ann"]);
        grid.set_filter("name", "a");
        assert_eq!(visible_names(&grid), vec!["Ann"]);
    }

    #[test]
    fn test_sort_new_key_resets_to_ascending() {
        let mut grid = TableController::new(people(), schema(), config());
        grid.set_sort("name");
        grid.set_sort("name");
        grid.set_sort("age");
        assert_eq!(grid.sort().direction(), SortDirection::Asc);
        assert_eq!(visible_names(&grid), vec!["Ann", "Bob", "Cid"]);
    }

    #[test]
    fn test_unknown_keys_are_noops() {
        let mut grid = TableController::new(people(), schema(), config());
        grid.set_sort("missing");
        grid.set_sort("actions");
        grid.set_filter("missing", "x");
        grid.set_filter("age", "30");
        assert_eq!(grid.sort().key(), None);
        assert!(grid.filters().is_empty());
        assert_eq!(visible_names(&grid), vec!["Bob", "Ann", "Cid"]);
    }

    #[test]
    fn test_filters_ignored_when_grid_not_filterable() {
        let mut grid = TableController::new(people(), schema(), GridConfig::default());
        grid.set_filter("name", "a");
        assert!(grid.filters().is_empty());
        assert_eq!(grid.view().total_rows, 3);
    }

    #[test]
    fn test_search() {
        let mut grid = TableController::new(people(), schema(), config());
        let view = grid.set_search_term("CI");
        assert_eq!(view.total_rows, 1);
        assert_eq!(visible_names(&grid), vec!["Cid"]);
        grid.set_search_term("");
        assert_eq!(grid.view().total_rows, 3);
    }

    #[test]
    fn test_search_disabled() {
        let config = GridConfig {
            searchable: false,
            ..config()
        };
        let mut grid = TableController::new(people(), schema(), config);
        assert_eq!(grid.set_search_term("zzz").total_rows, 3);
    }

    #[test]
    fn test_pagination_and_clamping() {
        let mut grid = TableController::new(many(25), schema(), config());
        assert_eq!(grid.view().total_pages, 3);
        assert_eq!(grid.view().rows.len(), 10);

        let view = grid.set_page(99);
        assert_eq!(view.current_page, 3);
        assert_eq!(view.rows.len(), 5);

        let view = grid.set_page(0);
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn test_filter_shrinking_results_clamps_page() {
        let mut grid = TableController::new(many(25), schema(), config());
        grid.set_page(3);
        let view = grid.set_filter("name", "user01");
        assert_eq!(view.total_rows, 10);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.rows.len(), 10);
    }

    #[test]
    fn test_page_size_change_clamps_page() {
        let mut grid = TableController::new(many(25), schema(), config());
        grid.set_page(3);
        let view = grid.set_page_size(20);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.current_page, 2);
        assert_eq!(view.rows.len(), 5);

        let view = grid.set_page_size(0);
        assert_eq!(view.page_size, 1);
    }

    #[test]
    fn test_next_and_prev_page() {
        let mut grid = TableController::new(many(25), schema(), config());
        assert!(grid.view().has_next_page());
        grid.next_page();
        grid.next_page();
        let view = grid.next_page();
        assert_eq!(view.current_page, 3);
        assert!(!view.has_next_page());
        grid.prev_page();
        grid.prev_page();
        let view = grid.prev_page();
        assert_eq!(view.current_page, 1);
        assert!(!view.has_prev_page());
    }

    #[test]
    fn test_pagination_disabled_shows_everything() {
        let config = GridConfig {
            pagination: false,
            ..config()
        };
        let grid = TableController::new(many(25), schema(), config);
        assert_eq!(grid.view().rows.len(), 25);
        assert_eq!(grid.view().total_pages, 1);
    }

    #[test]
    fn test_selection_follows_identity_across_sort() {
        let mut grid = TableController::new(people(), schema(), config());
        let third = grid.view().rows[2].key.clone();
        assert_eq!(third, id("u3"));
        grid.toggle_select_row(&third);

        grid.set_sort("name");
        grid.set_sort("name");
        let view = grid.view();
        assert_eq!(view.selected_count, 1);
        let selected: Vec<&RowKey> = view.rows.iter().filter(|r| r.selected).map(|r| &r.key).collect();
        assert_eq!(selected, vec![&id("u3")]);
        assert_eq!(view.rows[0].key, id("u3"));
    }

    #[test]
    fn test_selection_survives_paging() {
        let mut grid = TableController::new(many(25), schema(), config());
        let first = grid.view().rows[0].key.clone();
        grid.toggle_select_row(&first);
        let view = grid.set_page(2);
        assert!(view.rows.iter().all(|row| !row.selected));
        assert_eq!(view.selected_count, 1);
        let view = grid.set_page(1);
        assert!(view.rows[0].selected);
    }

    #[test]
    fn test_toggle_select_all_is_page_scoped() {
        let mut grid = TableController::new(many(25), schema(), config());
        let view = grid.toggle_select_all();
        assert_eq!(view.selected_count, 10);
        assert!(view.all_visible_selected);

        grid.set_page(2);
        let view = grid.toggle_select_all();
        assert_eq!(view.selected_count, 20);
        let view = grid.toggle_select_all();
        assert_eq!(view.selected_count, 10);
        assert!(!view.all_visible_selected);
    }

    #[test]
    fn test_selection_disabled() {
        let config = GridConfig {
            selectable: false,
            ..config()
        };
        let mut grid = TableController::new(people(), schema(), config);
        grid.toggle_select_all();
        grid.toggle_select_row(&id("u1"));
        assert_eq!(grid.view().selected_count, 0);
    }

    #[test]
    fn test_toggle_unknown_row_is_noop() {
        let mut grid = TableController::new(people(), schema(), config());
        assert_eq!(grid.toggle_select_row(&id("nope")).selected_count, 0);
    }

    #[test]
    fn test_set_records_drops_missing_selections_and_clamps() {
        let mut grid = TableController::new(many(25), schema(), config());
        grid.toggle_select_row(&RowKey::Id("3".to_string()));
        grid.toggle_select_row(&RowKey::Id("20".to_string()));
        grid.set_page(3);

        let view = grid.set_records(many(12));
        assert_eq!(view.generation, 1);
        assert_eq!(view.current_page, 2);
        assert_eq!(view.selected_count, 1);
        assert_eq!(grid.selected_keys(), vec![RowKey::Id("3".to_string())]);
    }

    #[test]
    fn test_set_records_drops_positional_selections() {
        let config = GridConfig {
            selectable: true,
            ..GridConfig::default()
        };
        let mut grid = TableController::new(people(), schema(), config);
        grid.toggle_select_row(&RowKey::Position(0));
        assert_eq!(grid.selected_records()[0].text("name"), "Bob");

        let view = grid.set_records(vec![Record::new().with("name", "Zed")]);
        assert_eq!(view.selected_count, 0);
        assert!(grid.selected_records().is_empty());
    }

    #[test]
    fn test_set_records_keeps_ids_but_not_fallback_positions() {
        let mut records = people();
        records.push(Record::new().with("name", "Dee"));
        let mut grid = TableController::new(records.clone(), schema(), config());
        grid.toggle_select_row(&id("u2"));
        grid.toggle_select_row(&RowKey::Position(3));
        assert_eq!(grid.view().selected_count, 2);

        grid.set_records(records);
        assert_eq!(grid.selected_keys(), vec![id("u2")]);
    }

    #[test]
    fn test_filter_and_sort_read_the_column_key_field() {
        let records = vec![
            Record::from_value(json!({"email": "top@x.io", "contact": {"email": "nested@y.io"}})),
            Record::from_value(json!({"email": "all@x.io", "contact": {"email": "zed@y.io"}})),
        ];
        let schema = ColumnSchema::new(vec![Column::new("email", "Email")
            .accessor("contact.email")
            .filterable(true)])
        .unwrap();
        let mut grid = TableController::new(records, schema, config());

        assert_eq!(grid.set_filter("email", "top@x").total_rows, 1);
        assert_eq!(grid.set_filter("email", "nested@y").total_rows, 0);

        grid.clear_filters();
        grid.set_sort("email");
        let order: Vec<String> = (0..2)
            .filter_map(|i| grid.visible_record(i))
            .map(|record| record.text("email"))
            .collect();
        assert_eq!(order, vec!["all@x.io", "top@x.io"]);
    }

    #[test]
    fn test_selected_records_in_record_order() {
        let mut grid = TableController::new(people(), schema(), config());
        grid.toggle_select_row(&id("u3"));
        grid.toggle_select_row(&id("u1"));
        let names: Vec<String> = grid.selected_records().iter().map(|r| r.text("name")).collect();
        assert_eq!(names, vec!["Bob", "Cid"]);
    }

    #[test]
    fn test_clear_selection() {
        let mut grid = TableController::new(people(), schema(), config());
        grid.toggle_select_all();
        assert_eq!(grid.clear_selection().selected_count, 0);
    }

    #[test]
    fn test_row_click_passes_record_and_index() {
        let mut grid = TableController::new(people(), schema(), config());
        grid.set_sort("name");
        let (record, index) = grid.row_click(1).unwrap();
        assert_eq!(record.text("name"), "Bob");
        assert_eq!(index, 1);
        assert!(grid.row_click(5).is_none());
    }

    #[test]
    fn test_cells_use_row_index() {
        let schema = ColumnSchema::new(vec![
            Column::new("name", "Name"),
            Column::new("age", "Age").kind(ColumnType::Currency),
            Column::computed("pos", "#").render(|_, i| CellContent::Text(format!("row {}", i))),
        ])
        .unwrap();
        let grid = TableController::new(people(), schema, config());
        let row = grid.view().rows[1].clone();
        assert_eq!(
            grid.cells(&row),
            vec![
                CellContent::Text("Ann".to_string()),
                CellContent::Text("$25.00".to_string()),
                CellContent::Text("row 1".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_state() {
        let grid = TableController::new(Vec::new(), schema(), config());
        assert!(grid.is_empty_state());
        assert_eq!(grid.view().total_pages, 1);
        assert_eq!(grid.view().current_page, 1);

        let grid = TableController::new(people(), ColumnSchema::default(), config());
        assert!(grid.is_empty_state());

        let mut grid = TableController::new(people(), schema(), config());
        grid.set_search_term("nobody");
        assert!(grid.is_empty_state());
    }

    #[test]
    fn test_position_keys_without_identity_field() {
        let config = GridConfig {
            selectable: true,
            ..GridConfig::default()
        };
        let mut grid = TableController::new(people(), schema(), config);
        grid.toggle_select_row(&RowKey::Position(0));
        grid.set_sort("name");
        let selected: Vec<usize> = grid
            .view()
            .rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.source_index)
            .collect();
        assert_eq!(selected, vec![0]);
        assert_eq!(grid.record(&RowKey::Position(0)).map(|r| r.text("name")), Some("Bob".to_string()));
    }
}
