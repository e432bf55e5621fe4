//! Record detail view.
//!
//! Opened by activating a row. Shows every column as rendered in the grid,
//! followed by the record's raw fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::grid::record::value_text;
use crate::grid::{CellContent, Column, Record, RowKey};
use crate::ui::theme::theme;

/// Actions returned from the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    /// Return to the grid.
    Back,
}

/// The record detail view.
#[derive(Debug, Clone)]
pub struct DetailView {
    key: RowKey,
    /// Position of the row on its page when it was opened.
    row_index: usize,
    columns: Vec<(String, CellContent)>,
    fields: Vec<(String, String)>,
    scroll: u16,
}

impl DetailView {
    /// Build the view for `record`, rendering cells through `columns`.
    pub fn new(key: RowKey, record: &Record, row_index: usize, columns: &[Column]) -> Self {
        let columns = columns
            .iter()
            .map(|column| (column.title().to_string(), column.cell(record, row_index)))
            .collect();
        let fields = record
            .fields()
            .map(|field| {
                let text = record.lookup(field).map(value_text).unwrap_or_default();
                (field.to_string(), text)
            })
            .collect();
        Self {
            key,
            row_index,
            columns,
            fields,
            scroll: 0,
        }
    }

    /// The row shown.
    pub fn key(&self) -> &RowKey {
        &self.key
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<DetailAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Backspace, _) => Some(DetailAction::Back),
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = self.scroll.saturating_add(1).min(self.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.scroll = 0;
                None
            }
            _ => None,
        }
    }

    fn max_scroll(&self) -> u16 {
        self.lines().len().saturating_sub(1) as u16
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let t = theme();
        let label_width = self
            .columns
            .iter()
            .map(|(title, _)| title.chars().count())
            .chain(self.fields.iter().map(|(field, _)| field.chars().count()))
            .max()
            .unwrap_or(0);
        let label = |text: &str| {
            Span::styled(
                format!("{:<width$}  ", text, width = label_width),
                Style::default().fg(t.dim),
            )
        };
        let heading = |text: &'static str| {
            Line::from(Span::styled(
                text,
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            ))
        };

        let mut lines = vec![heading("Columns")];
        for (title, content) in &self.columns {
            let value = match content {
                CellContent::Empty => Span::styled("—", Style::default().fg(t.dim)),
                CellContent::Text(text) => Span::styled(text.clone(), Style::default().fg(t.fg)),
                CellContent::Badge { label, variant } => {
                    Span::styled(format!("● {}", label), Style::default().fg(t.badge(*variant)))
                }
                CellContent::Link { label, href } => Span::styled(
                    format!("{} <{}>", label, href),
                    Style::default().fg(t.link).add_modifier(Modifier::UNDERLINED),
                ),
            };
            lines.push(Line::from(vec![label(title), value]));
        }

        lines.push(Line::default());
        lines.push(heading("Fields"));
        for (field, text) in &self.fields {
            lines.push(Line::from(vec![
                label(field),
                Span::styled(text.clone(), Style::default().fg(t.fg)),
            ]));
        }
        lines
    }

    /// Render the view.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = Block::default()
            .title(Span::styled(
                format!(" Row {} · {} ", self.row_index + 1, self.key),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border_focused));
        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BadgeVariant, ColumnType};

    fn record() -> Record {
        Record::new()
            .with("id", "u1")
            .with("name", "Ann")
            .with("status", "active")
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("status", "Status")
                .kind(ColumnType::Badge)
                .badge_variant(|_| BadgeVariant::Success),
            Column::new("email", "Email"),
        ]
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_lines_list_columns_then_fields() {
        let view = DetailView::new(RowKey::Id("u1".to_string()), &record(), 0, &columns());
        let lines: Vec<String> = view.lines().iter().map(text).collect();
        assert_eq!(lines[0], "Columns");
        assert_eq!(lines[1], "Name    Ann");
        assert_eq!(lines[2], "Status  ● active");
        assert_eq!(lines[3], "Email   —");
        assert_eq!(lines[5], "Fields");
        assert_eq!(lines[6], "id      u1");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_back_and_scroll() {
        let mut view = DetailView::new(RowKey::Position(0), &record(), 0, &columns());
        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        for _ in 0..50 {
            assert_eq!(view.handle_input(down), None);
        }
        assert_eq!(view.scroll, view.max_scroll());

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(view.handle_input(esc), Some(DetailAction::Back));
    }
}
