//! Grid list view.
//!
//! The main screen: query bar, the grid table, the pagination footer and the
//! row menu. Owns the [`TableController`] and turns key presses into grid
//! operations.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::{debug, info};

use crate::config::MAX_PAGE_SIZE;
use crate::events::{GridCommand, InteractionScope, KeyBindings, KeyContext};
use crate::grid::{Record, RowKey, TableController};
use crate::ui::components::{
    render_pagination, render_query_bar, GridTable, NotificationType, Prompt, PromptTarget,
    RowMenu, RowMenuAction, RowMenuItem,
};

/// Rows added or removed per page-size step.
const PAGE_SIZE_STEP: usize = 5;

/// Actions the list view hands to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Open the detail view for a row (the row-click callback).
    Open {
        /// Identity of the clicked record.
        key: RowKey,
        /// Position of the row on its page.
        row_index: usize,
    },
    /// Show the help overlay.
    Help,
    /// Quit the application.
    Quit,
    /// Show a toast.
    Notify(NotificationType, String),
}

/// The grid list view.
pub struct ListView {
    grid: TableController,
    bindings: KeyBindings,
    /// Cursor row on the current page.
    cursor: usize,
    focused_column: usize,
    prompt: Option<Prompt>,
    menu: RowMenu,
    /// Table area from the last render, for placing the row menu.
    table_area: Rect,
}

impl ListView {
    /// Create the view over `grid`.
    pub fn new(grid: TableController, bindings: KeyBindings, scope: InteractionScope) -> Self {
        Self {
            grid,
            bindings,
            cursor: 0,
            focused_column: 0,
            prompt: None,
            menu: RowMenu::new(scope),
            table_area: Rect::default(),
        }
    }

    /// The grid being shown.
    pub fn grid(&self) -> &TableController {
        &self.grid
    }

    /// Cursor row on the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the focused column.
    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    /// Which key context is active, for the help bar.
    pub fn key_context(&self) -> KeyContext {
        if self.prompt.is_some() {
            KeyContext::Prompt
        } else if self.menu.is_open() {
            KeyContext::Menu
        } else {
            KeyContext::Grid
        }
    }

    /// Handle a key press.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ListAction> {
        if self.prompt.is_some() {
            self.handle_prompt_input(key);
            return None;
        }
        if self.menu.is_open() {
            let action = self.menu.handle_input(key)?;
            return self.apply_menu_action(action);
        }

        let command = self.bindings.resolve(&key)?;
        self.run_command(command)
    }

    /// Handle a mouse event. Only delivered while the row menu is open.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<ListAction> {
        let action = self.menu.handle_mouse(event)?;
        self.apply_menu_action(action)
    }

    fn run_command(&mut self, command: GridCommand) -> Option<ListAction> {
        match command {
            GridCommand::Up => self.cursor = self.cursor.saturating_sub(1),
            GridCommand::Down => self.cursor += 1,
            GridCommand::PrevPage => {
                self.grid.prev_page();
            }
            GridCommand::NextPage => {
                self.grid.next_page();
            }
            GridCommand::FirstPage => {
                self.grid.set_page(1);
            }
            GridCommand::LastPage => {
                let last = self.grid.view().total_pages;
                self.grid.set_page(last);
            }
            GridCommand::FocusLeft => self.focused_column = self.focused_column.saturating_sub(1),
            GridCommand::FocusRight => {
                let last = self.grid.columns().len().saturating_sub(1);
                self.focused_column = (self.focused_column + 1).min(last);
            }
            GridCommand::Search => {
                if !self.grid.config().searchable {
                    return Some(warn("Search is disabled for this grid"));
                }
                self.prompt = Some(Prompt::new(PromptTarget::Search, self.grid.search_term()));
            }
            GridCommand::Filter => return self.open_filter_prompt(),
            GridCommand::ClearFilters => {
                self.grid.clear_filters();
            }
            GridCommand::Sort => {
                let column = self.grid.columns().get(self.focused_column)?;
                if !self.grid.config().sortable || !column.is_sortable() {
                    return Some(warn(format!("{} cannot be sorted", column.title())));
                }
                let key = column.key().to_string();
                self.grid.set_sort(&key);
            }
            GridCommand::ToggleRow => {
                if !self.grid.config().selectable {
                    return Some(warn("Selection is disabled for this grid"));
                }
                if let Some(key) = self.cursor_key() {
                    self.grid.toggle_select_row(&key);
                }
            }
            GridCommand::ToggleAll => {
                if !self.grid.config().selectable {
                    return Some(warn("Selection is disabled for this grid"));
                }
                self.grid.toggle_select_all();
            }
            GridCommand::ClearSelection => {
                self.grid.clear_selection();
            }
            GridCommand::GrowPage | GridCommand::ShrinkPage => {
                if !self.grid.config().pagination {
                    return None;
                }
                let size = self.grid.view().page_size;
                let size = if command == GridCommand::GrowPage {
                    (size + PAGE_SIZE_STEP).min(MAX_PAGE_SIZE)
                } else {
                    size.saturating_sub(PAGE_SIZE_STEP).max(1)
                };
                self.grid.set_page_size(size);
            }
            GridCommand::Open => {
                let key = self.cursor_key()?;
                let (_, row_index) = self.grid.row_click(self.cursor)?;
                return Some(ListAction::Open { key, row_index });
            }
            GridCommand::Menu => {
                let key = self.cursor_key()?;
                let items = self.menu_items();
                self.menu.open(key, items);
            }
            GridCommand::DeleteSelected => return Some(self.delete_selected()),
            GridCommand::Help => return Some(ListAction::Help),
            GridCommand::Quit => return Some(ListAction::Quit),
        }
        self.clamp_cursor();
        None
    }

    fn handle_prompt_input(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter => {
                self.prompt = None;
            }
            KeyCode::Esc => {
                let original = prompt.original.clone();
                let target = prompt.target.clone();
                self.prompt = None;
                self.apply_prompt(&target, &original);
            }
            _ => {
                if prompt.input.handle_input(key) {
                    let value = prompt.input.value().to_string();
                    let target = prompt.target.clone();
                    self.apply_prompt(&target, &value);
                }
            }
        }
    }

    /// Apply prompt text live, as it is typed.
    fn apply_prompt(&mut self, target: &PromptTarget, value: &str) {
        match target {
            PromptTarget::Search => {
                self.grid.set_search_term(value);
            }
            PromptTarget::Filter { key, .. } => {
                self.grid.set_filter(key, value);
            }
        }
        self.clamp_cursor();
    }

    fn open_filter_prompt(&mut self) -> Option<ListAction> {
        let column = self.grid.columns().get(self.focused_column)?;
        if !self.grid.config().filterable || !column.is_filterable() {
            return Some(warn(format!("{} cannot be filtered", column.title())));
        }
        let current = self.grid.filters().get(column.key()).unwrap_or_default();
        let target = PromptTarget::Filter {
            key: column.key().to_string(),
            title: column.title().to_string(),
        };
        self.prompt = Some(Prompt::new(target, current));
        None
    }

    fn menu_items(&self) -> Vec<RowMenuItem> {
        let mut items = vec![RowMenuItem::Open];
        if self.grid.config().selectable {
            items.push(RowMenuItem::ToggleSelection);
        }
        let filterable = self
            .grid
            .columns()
            .get(self.focused_column)
            .is_some_and(|column| column.is_filterable());
        if self.grid.config().filterable && filterable {
            items.push(RowMenuItem::FilterByValue);
        }
        items.push(RowMenuItem::Delete);
        items
    }

    fn apply_menu_action(&mut self, action: RowMenuAction) -> Option<ListAction> {
        let RowMenuAction::Choose(item, key) = action else {
            return None;
        };
        debug!(item = ?item, row = %key, "Row menu choice");
        match item {
            RowMenuItem::Open => {
                let row_index = self.grid.view().rows.iter().position(|row| row.key == key)?;
                Some(ListAction::Open { key, row_index })
            }
            RowMenuItem::ToggleSelection => {
                self.grid.toggle_select_row(&key);
                None
            }
            RowMenuItem::FilterByValue => {
                let column = self.grid.columns().get(self.focused_column)?;
                let column_key = column.key().to_string();
                let value = self.grid.record(&key)?.text(&column_key);
                self.grid.set_filter(&column_key, value);
                self.clamp_cursor();
                None
            }
            RowMenuItem::Delete => {
                let removed = self.delete_rows(&HashSet::from([&key]));
                Some(ListAction::Notify(
                    NotificationType::Success,
                    format!("Deleted {} row{}", removed, plural(removed)),
                ))
            }
        }
    }

    fn delete_selected(&mut self) -> ListAction {
        let selected = self.grid.selected_keys();
        if selected.is_empty() {
            return ListAction::Notify(NotificationType::Info, "Nothing selected".to_string());
        }
        let removed = self.delete_rows(&selected.iter().collect());
        ListAction::Notify(
            NotificationType::Success,
            format!("Deleted {} selected row{}", removed, plural(removed)),
        )
    }

    /// Remove records by identity, starting a new input generation.
    fn delete_rows(&mut self, keys: &HashSet<&RowKey>) -> usize {
        let remaining: Vec<Record> = self
            .grid
            .keyed_records()
            .filter(|(key, _)| !keys.contains(key))
            .map(|(_, record)| record.clone())
            .collect();
        let removed = self.grid.records().len() - remaining.len();

        self.grid.set_records(remaining);
        self.clamp_cursor();
        info!(removed, "Rows deleted");
        removed
    }

    fn cursor_key(&self) -> Option<RowKey> {
        self.grid.view().rows.get(self.cursor).map(|row| row.key.clone())
    }

    fn clamp_cursor(&mut self) {
        let rows = self.grid.view().rows.len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    /// Render the view.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        render_query_bar(
            frame,
            chunks[0],
            self.prompt.as_ref(),
            self.grid.search_term(),
            self.grid.filters(),
            self.grid.sort(),
        );

        self.table_area = chunks[1];
        GridTable::new(&self.grid, self.cursor, self.focused_column).render(frame, chunks[1]);
        render_pagination(frame, chunks[2], self.grid.view());

        if self.menu.is_open() {
            // Border and header sit above the first row.
            let row_y = self.table_area.y + 2 + self.cursor as u16;
            let anchor = Rect::new(self.table_area.x, row_y, self.table_area.width, 1);
            self.menu.render(frame, anchor, area);
        }
    }
}

fn warn(message: impl Into<String>) -> ListAction {
    ListAction::Notify(NotificationType::Warning, message.into())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
