//! Row menu component.
//!
//! A small popup of actions for the row under the cursor. The expanded state
//! is owned by the menu itself; while open it holds an outside-click
//! subscription so the event layer delivers mouse events, and a click outside
//! the popup closes it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::events::{InteractionScope, OutsideClickSubscription};
use crate::grid::RowKey;
use crate::ui::theme::theme;

/// An entry in the row menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMenuItem {
    /// Open the row in the detail view.
    Open,
    /// Toggle the row's selection.
    ToggleSelection,
    /// Filter the focused column by this row's value.
    FilterByValue,
    /// Remove the row.
    Delete,
}

impl RowMenuItem {
    /// Label shown in the popup.
    pub fn label(&self) -> &'static str {
        match self {
            RowMenuItem::Open => "Open",
            RowMenuItem::ToggleSelection => "Toggle selection",
            RowMenuItem::FilterByValue => "Filter by this value",
            RowMenuItem::Delete => "Delete row",
        }
    }
}

/// Action resulting from menu input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMenuAction {
    /// An item was chosen for the row.
    Choose(RowMenuItem, RowKey),
    /// The menu was closed without a choice.
    Cancel,
}

#[derive(Debug)]
struct OpenMenu {
    key: RowKey,
    items: Vec<RowMenuItem>,
    highlighted: usize,
    /// Where the popup was last drawn.
    area: Option<Rect>,
    _outside_click: OutsideClickSubscription,
}

/// Popup menu of row actions.
#[derive(Debug)]
pub struct RowMenu {
    scope: InteractionScope,
    open: Option<OpenMenu>,
}

impl RowMenu {
    /// Create a closed menu that subscribes to outside clicks through `scope`.
    pub fn new(scope: InteractionScope) -> Self {
        Self { scope, open: None }
    }

    /// Open the menu for the row `key`.
    pub fn open(&mut self, key: RowKey, items: Vec<RowMenuItem>) {
        if items.is_empty() {
            return;
        }
        self.open = Some(OpenMenu {
            key,
            items,
            highlighted: 0,
            area: None,
            _outside_click: self.scope.subscribe_outside_click(),
        });
    }

    /// Close the menu, releasing its outside-click subscription.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Check if the menu is open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The row the menu is open for.
    pub fn row_key(&self) -> Option<&RowKey> {
        self.open.as_ref().map(|menu| &menu.key)
    }

    /// Index of the highlighted item.
    pub fn highlighted(&self) -> Option<usize> {
        self.open.as_ref().map(|menu| menu.highlighted)
    }

    /// Handle keyboard input while open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<RowMenuAction> {
        let menu = self.open.as_mut()?;
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if menu.highlighted + 1 < menu.items.len() {
                    menu.highlighted += 1;
                }
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                menu.highlighted = menu.highlighted.saturating_sub(1);
                None
            }
            (KeyCode::Enter, _) => {
                let action = RowMenuAction::Choose(menu.items[menu.highlighted], menu.key.clone());
                self.close();
                Some(action)
            }
            (KeyCode::Esc, _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('m'), KeyModifiers::NONE) => {
                self.close();
                Some(RowMenuAction::Cancel)
            }
            _ => None,
        }
    }

    /// Handle a mouse event while open.
    ///
    /// A left click on an item chooses it; a left click anywhere outside the
    /// popup closes the menu.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<RowMenuAction> {
        let menu = self.open.as_mut()?;
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let area = menu.area?;
        let position = Position::new(event.column, event.row);
        if !area.contains(position) {
            self.close();
            return Some(RowMenuAction::Cancel);
        }

        // Rows inside the border map onto items.
        let inner_top = area.y + 1;
        if event.row < inner_top {
            return None;
        }
        let index = (event.row - inner_top) as usize;
        let item = *menu.items.get(index)?;
        let action = RowMenuAction::Choose(item, menu.key.clone());
        self.close();
        Some(action)
    }

    /// Render the popup next to `anchor` (the cursor row), kept inside `screen`.
    pub fn render(&mut self, frame: &mut Frame, anchor: Rect, screen: Rect) {
        let Some(menu) = self.open.as_mut() else {
            return;
        };
        let t = theme();

        let width = menu
            .items
            .iter()
            .map(|item| item.label().len() as u16)
            .max()
            .unwrap_or(0)
            + 6;
        let height = menu.items.len() as u16 + 2;
        let area = popup_area(anchor, screen, width, height);
        menu.area = Some(area);

        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(Span::styled(" Row ", Style::default().fg(t.accent)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border_focused))
            .style(Style::default().bg(t.bg));

        let items: Vec<ListItem> = menu
            .items
            .iter()
            .map(|item| {
                let style = if *item == RowMenuItem::Delete {
                    Style::default().fg(t.danger)
                } else {
                    Style::default().fg(t.fg)
                };
                ListItem::new(item.label()).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(t.bg)
                    .bg(t.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(menu.highlighted));
        frame.render_stateful_widget(list, area, &mut state);
    }

    #[cfg(test)]
    fn set_area(&mut self, area: Rect) {
        if let Some(menu) = self.open.as_mut() {
            menu.area = Some(area);
        }
    }
}

/// Place a `width`×`height` popup just below `anchor`, or above it when there
/// is no room below, clamped to `screen`.
fn popup_area(anchor: Rect, screen: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let below = anchor.y + anchor.height;
    let y = if below + height <= screen.y + screen.height {
        below
    } else {
        anchor.y.saturating_sub(height).max(screen.y)
    };
    let x = (anchor.x + 2).min((screen.x + screen.width).saturating_sub(width));
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<RowMenuItem> {
        vec![RowMenuItem::Open, RowMenuItem::ToggleSelection, RowMenuItem::Delete]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_open_subscribes_and_close_releases() {
        let scope = InteractionScope::new();
        let mut menu = RowMenu::new(scope.clone());
        assert!(!scope.is_active());

        menu.open(RowKey::Position(3), items());
        assert!(menu.is_open());
        assert_eq!(scope.subscriber_count(), 1);

        menu.close();
        assert!(!menu.is_open());
        assert!(!scope.is_active());
    }

    #[test]
    fn test_reopen_keeps_single_subscription() {
        let scope = InteractionScope::new();
        let mut menu = RowMenu::new(scope.clone());
        menu.open(RowKey::Position(0), items());
        menu.open(RowKey::Position(1), items());
        assert_eq!(scope.subscriber_count(), 1);
        assert_eq!(menu.row_key(), Some(&RowKey::Position(1)));
    }

    #[test]
    fn test_drop_releases_subscription() {
        let scope = InteractionScope::new();
        {
            let mut menu = RowMenu::new(scope.clone());
            menu.open(RowKey::Position(0), items());
            assert!(scope.is_active());
        }
        assert!(!scope.is_active());
    }

    #[test]
    fn test_open_without_items_stays_closed() {
        let scope = InteractionScope::new();
        let mut menu = RowMenu::new(scope.clone());
        menu.open(RowKey::Position(0), Vec::new());
        assert!(!menu.is_open());
        assert!(!scope.is_active());
    }

    #[test]
    fn test_navigate_and_choose() {
        let mut menu = RowMenu::new(InteractionScope::new());
        menu.open(RowKey::Id("u1".to_string()), items());

        assert_eq!(menu.handle_input(key(KeyCode::Down)), None);
        assert_eq!(menu.handle_input(key(KeyCode::Char('j'))), None);
        assert_eq!(menu.handle_input(key(KeyCode::Down)), None);
        assert_eq!(menu.highlighted(), Some(2));
        menu.handle_input(key(KeyCode::Char('k')));
        assert_eq!(menu.highlighted(), Some(1));

        let action = menu.handle_input(key(KeyCode::Enter));
        assert_eq!(
            action,
            Some(RowMenuAction::Choose(
                RowMenuItem::ToggleSelection,
                RowKey::Id("u1".to_string())
            ))
        );
        assert!(!menu.is_open());
    }

    #[test]
    fn test_escape_cancels() {
        let mut menu = RowMenu::new(InteractionScope::new());
        menu.open(RowKey::Position(0), items());
        assert_eq!(menu.handle_input(key(KeyCode::Esc)), Some(RowMenuAction::Cancel));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_input_when_closed() {
        let mut menu = RowMenu::new(InteractionScope::new());
        assert_eq!(menu.handle_input(key(KeyCode::Enter)), None);
        assert_eq!(menu.handle_mouse(click(0, 0)), None);
    }

    #[test]
    fn test_click_outside_closes() {
        let scope = InteractionScope::new();
        let mut menu = RowMenu::new(scope.clone());
        menu.open(RowKey::Position(0), items());
        menu.set_area(Rect::new(10, 5, 20, 5));

        assert_eq!(menu.handle_mouse(click(2, 2)), Some(RowMenuAction::Cancel));
        assert!(!menu.is_open());
        assert!(!scope.is_active());
    }

    #[test]
    fn test_click_on_item_chooses() {
        let mut menu = RowMenu::new(InteractionScope::new());
        menu.open(RowKey::Position(4), items());
        menu.set_area(Rect::new(10, 5, 20, 5));

        // Border at row 5, items at rows 6..=8.
        assert_eq!(
            menu.handle_mouse(click(12, 8)),
            Some(RowMenuAction::Choose(RowMenuItem::Delete, RowKey::Position(4)))
        );
    }

    #[test]
    fn test_click_on_border_ignored() {
        let mut menu = RowMenu::new(InteractionScope::new());
        menu.open(RowKey::Position(0), items());
        menu.set_area(Rect::new(10, 5, 20, 5));
        assert_eq!(menu.handle_mouse(click(12, 5)), None);
        assert!(menu.is_open());
    }

    #[test]
    fn test_popup_area_flips_above() {
        let screen = Rect::new(0, 0, 80, 20);
        let below = popup_area(Rect::new(0, 3, 80, 1), screen, 20, 5);
        assert_eq!(below, Rect::new(2, 4, 20, 5));

        let above = popup_area(Rect::new(0, 18, 80, 1), screen, 20, 5);
        assert_eq!(above, Rect::new(2, 13, 20, 5));
    }
}
