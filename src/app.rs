//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application.

use tracing::{debug, info, trace, warn};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::error::AppError;
use crate::events::{Event, KeyContext};
use crate::grid::RowKey;
use crate::ui::{
    render_context_help, theme, DetailAction, DetailView, HelpAction, HelpView, ListAction,
    ListView, Notification, NotificationManager,
};

/// The current view/screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// The grid.
    #[default]
    Grid,
    /// Details of a single record.
    Detail,
    /// Help overlay on top of the grid.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    state: AppState,
    should_quit: bool,
    /// Shown in the header, usually the records file name.
    title: String,
    list_view: ListView,
    detail_view: Option<DetailView>,
    help_view: HelpView,
    notifications: NotificationManager,
}

impl App {
    /// Create the application around a ready list view.
    pub fn new(title: impl Into<String>, list_view: ListView) -> Self {
        let title = title.into();
        debug!(title = %title, "Creating application");
        Self {
            state: AppState::Grid,
            should_quit: false,
            title,
            list_view,
            detail_view: None,
            help_view: HelpView::new(),
            notifications: NotificationManager::new(),
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Get a reference to the list view.
    pub fn list_view(&self) -> &ListView {
        &self.list_view
    }

    /// The open detail view, if any.
    pub fn detail_view(&self) -> Option<&DetailView> {
        self.detail_view.as_ref()
    }

    /// Get a reference to the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Add an info notification.
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notifications.info(message);
    }

    /// Add a warning notification.
    pub fn notify_warning(&mut self, message: impl Into<String>) {
        self.notifications.warning(message);
    }

    /// Report an error that did not stop the application.
    pub fn handle_error(&mut self, error: &AppError) {
        warn!(error = %error, critical = error.is_critical(), "Error reported to the user");
        let mut message = error.user_message();
        if let Some(action) = error.suggested_action() {
            message.push(' ');
            message.push_str(action);
        }
        self.notifications.error(message);
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Mouse(mouse_event) => {
                if self.state == AppState::Grid {
                    if let Some(action) = self.list_view.handle_mouse(mouse_event) {
                        self.handle_list_action(action);
                    }
                }
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.notifications.tick(),
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        match self.state {
            AppState::Grid => {
                if let Some(action) = self.list_view.handle_input(key_event) {
                    self.handle_list_action(action);
                }
            }
            AppState::Detail => {
                let action = self
                    .detail_view
                    .as_mut()
                    .and_then(|view| view.handle_input(key_event));
                if let Some(DetailAction::Back) = action {
                    debug!("Back to the grid");
                    self.detail_view = None;
                    self.state = AppState::Grid;
                }
            }
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help_view.handle_input(key_event) {
                    self.state = AppState::Grid;
                }
            }
            AppState::Exiting => {}
        }
    }

    fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Open { key, row_index } => self.open_detail(key, row_index),
            ListAction::Help => {
                self.help_view.reset_scroll();
                self.state = AppState::Help;
            }
            ListAction::Quit => self.quit(),
            ListAction::Notify(kind, message) => {
                self.notifications.push(Notification::new(message, kind));
            }
        }
    }

    /// The row-click handler: show the clicked record.
    fn open_detail(&mut self, key: RowKey, row_index: usize) {
        let grid = self.list_view.grid();
        let Some(record) = grid.record(&key) else {
            warn!(row = %key, "Opened row no longer exists");
            return;
        };
        debug!(row = %key, row_index, "Opening record detail");
        self.detail_view = Some(DetailView::new(key, record, row_index, grid.columns()));
        self.state = AppState::Detail;
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        match self.state {
            AppState::Grid | AppState::Exiting => self.list_view.render(frame, chunks[1]),
            AppState::Detail => match &self.detail_view {
                Some(view) => view.render(frame, chunks[1]),
                None => self.list_view.render(frame, chunks[1]),
            },
            AppState::Help => {
                self.list_view.render(frame, chunks[1]);
                self.help_view.render(frame, chunks[1]);
            }
        }

        render_context_help(frame, chunks[2], self.key_context(), &self.status());
        self.notifications.render(frame, chunks[1]);
    }

    fn key_context(&self) -> KeyContext {
        match self.state {
            AppState::Grid | AppState::Exiting => self.list_view.key_context(),
            AppState::Detail => KeyContext::Detail,
            AppState::Help => KeyContext::Help,
        }
    }

    /// Right-hand side of the help bar.
    fn status(&self) -> String {
        let view = self.list_view.grid().view();
        if view.selected_count > 0 {
            format!("{} selected", view.selected_count)
        } else {
            String::new()
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let grid = self.list_view.grid();
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(t.bg).bg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    " {} records · {} columns",
                    grid.records().len(),
                    grid.columns().len()
                ),
                Style::default().fg(t.dim),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
