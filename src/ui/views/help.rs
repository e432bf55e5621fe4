//! Help overlay listing every key binding by context.
//!
//! Opened with `?` from the grid; closed with `?`, `q` or Escape.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::events::{get_keybindings_grouped, KeyContext, Keybinding};
use crate::ui::theme::theme;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help overlay.
    Close,
}

/// The help overlay.
pub struct HelpView {
    grouped_bindings: Vec<(KeyContext, Vec<Keybinding>)>,
    scroll: usize,
    /// Inner height from the last render.
    visible_height: usize,
}

impl HelpView {
    /// Create a new help view.
    pub fn new() -> Self {
        Self {
            grouped_bindings: get_keybindings_grouped(),
            scroll: 0,
            visible_height: 0,
        }
    }

    /// Scroll back to the top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn total_lines(&self) -> usize {
        // Header and blank line per section, one line per binding.
        self.grouped_bindings
            .iter()
            .map(|(_, bindings)| bindings.len() + 2)
            .sum()
    }

    fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.visible_height)
    }

    /// Handle keyboard input. Every key is consumed while help is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<HelpAction> {
        let page = self.visible_height.saturating_sub(2).max(1);
        match (key.code, key.modifiers) {
            (KeyCode::Char('?'), _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Esc, _) => return Some(HelpAction::Close),
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => self.scroll += 1,
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1)
            }
            (KeyCode::PageDown, _) | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.scroll += page
            }
            (KeyCode::PageUp, _) | (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.scroll = self.scroll.saturating_sub(page)
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => self.scroll = 0,
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => self.scroll = self.max_scroll(),
            _ => {}
        }
        self.scroll = self.scroll.min(self.max_scroll());
        None
    }

    /// Render the overlay centered in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let popup = centered_rect(area, 64, 80);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border_focused));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(self.build_content_lines()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);

        if self.total_lines() > self.visible_height {
            let mut state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                popup,
                &mut state,
            );
        }
    }

    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let t = theme();
        let key_width = self
            .grouped_bindings
            .iter()
            .flat_map(|(_, bindings)| bindings.iter())
            .map(|binding| binding.key.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(self.total_lines());
        for (context, bindings) in &self.grouped_bindings {
            lines.push(Line::from(Span::styled(
                context.display(),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            )));
            for binding in bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:>width$}", binding.key, width = key_width),
                        Style::default().fg(t.success),
                    ),
                    Span::raw("  "),
                    Span::styled(binding.description.clone(), Style::default().fg(t.fg)),
                ]));
            }
            lines.push(Line::default());
        }
        lines
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}

/// A rectangle `percent_x` by `percent_y` of `area`, centered in it.
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
