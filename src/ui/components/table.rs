//! Grid table component.
//!
//! Draws the current page of a [`TableController`]: header with sort
//! indicators, optional selection checkboxes, typed cells (badges, links)
//! and the pagination footer with its page-button window.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::search_bar::highlight_text;
use crate::grid::{CellContent, GridView, TableController};
use crate::ui::theme::theme;

/// Widest a column may grow, in terminal cells.
const MAX_COLUMN_WIDTH: u16 = 40;
/// Width of the checkbox column.
const CHECKBOX_WIDTH: u16 = 3;

/// Renders one page of a grid.
pub struct GridTable<'a> {
    grid: &'a TableController,
    cursor: usize,
    focused_column: usize,
}

impl<'a> GridTable<'a> {
    /// Create a renderer for `grid` with the cursor on row `cursor` of the page.
    pub fn new(grid: &'a TableController, cursor: usize, focused_column: usize) -> Self {
        Self {
            grid,
            cursor,
            focused_column,
        }
    }

    /// Render the table into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let view = self.grid.view();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border))
            .title(Span::styled(
                format!(" {} rows ", view.total_rows),
                Style::default().fg(t.accent),
            ));

        if self.grid.is_empty_state() {
            let message = empty_message(self.grid);
            let paragraph = Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(t.dim),
            )))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let selectable = self.grid.config().selectable;
        let term = if self.grid.config().searchable {
            self.grid.search_term()
        } else {
            ""
        };

        let mut header_cells = Vec::with_capacity(self.grid.columns().len() + 1);
        if selectable {
            header_cells.push(Cell::from(header_checkbox(view)));
        }
        for (index, column) in self.grid.columns().iter().enumerate() {
            let mut title = column.title().to_string();
            if let Some(arrow) = view.sort.indicator(column.key()) {
                title.push(' ');
                title.push_str(arrow);
            }
            let mut style = Style::default().add_modifier(Modifier::BOLD);
            if index == self.focused_column {
                style = style.fg(t.accent).add_modifier(Modifier::UNDERLINED);
            }
            header_cells.push(Cell::from(Span::styled(title, style)));
        }

        let mut rendered: Vec<Vec<CellContent>> = Vec::with_capacity(view.rows.len());
        let rows: Vec<Row> = view
            .rows
            .iter()
            .map(|row| {
                let contents = self.grid.cells(row);
                let mut cells = Vec::with_capacity(contents.len() + 1);
                if selectable {
                    cells.push(Cell::from(if row.selected { "[x]" } else { "[ ]" }));
                }
                cells.extend(contents.iter().map(|content| Cell::from(cell_line(content, term))));
                rendered.push(contents);

                let style = if row.selected {
                    Style::default().bg(t.selected_bg)
                } else {
                    Style::default()
                };
                Row::new(cells).style(style)
            })
            .collect();

        let titles: Vec<&str> = self.grid.columns().iter().map(|c| c.title()).collect();
        let mut widths = Vec::with_capacity(titles.len() + 1);
        if selectable {
            widths.push(Constraint::Length(CHECKBOX_WIDTH));
        }
        widths.extend(column_widths(&titles, &rendered));

        let table = Table::new(rows, widths)
            .header(Row::new(header_cells).style(Style::default().fg(t.fg)).bottom_margin(0))
            .block(block)
            .column_spacing(1)
            .highlight_style(Style::default().bg(t.highlight_bg).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = TableState::default();
        if !view.rows.is_empty() {
            state.select(Some(self.cursor.min(view.rows.len() - 1)));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }
}

/// Message for the empty state.
fn empty_message(grid: &TableController) -> &'static str {
    if grid.columns().is_empty() {
        "No columns to show"
    } else if grid.records().is_empty() {
        "No records"
    } else {
        "No rows match the current search and filters"
    }
}

/// Header checkbox: all, some or none of the visible rows selected.
pub fn header_checkbox(view: &GridView) -> &'static str {
    if view.all_visible_selected {
        "[x]"
    } else if view.rows.iter().any(|row| row.selected) {
        "[-]"
    } else {
        "[ ]"
    }
}

/// Styled line for one cell.
pub fn cell_line(content: &CellContent, term: &str) -> Line<'static> {
    let t = theme();
    match content {
        CellContent::Empty => Line::default(),
        CellContent::Text(text) => highlight_text(text, term, Style::default().fg(t.fg)),
        CellContent::Badge { label, variant } => Line::from(Span::styled(
            format!("● {}", label),
            Style::default().fg(t.badge(*variant)),
        )),
        CellContent::Link { label, .. } => highlight_text(
            label,
            term,
            Style::default().fg(t.link).add_modifier(Modifier::UNDERLINED),
        ),
    }
}

/// Column widths fitted to titles and rendered content, capped at
/// [`MAX_COLUMN_WIDTH`]. The last column takes any remaining space.
pub fn column_widths(titles: &[&str], rows: &[Vec<CellContent>]) -> Vec<Constraint> {
    let count = titles.len();
    titles
        .iter()
        .enumerate()
        .map(|(index, title)| {
            // Room for a sort arrow after the title.
            let header = title.chars().count() + 2;
            let widest = rows
                .iter()
                .filter_map(|cells| cells.get(index))
                .map(|cell| match cell {
                    CellContent::Badge { label, .. } => label.chars().count() + 2,
                    other => other.label().chars().count(),
                })
                .max()
                .unwrap_or(0);
            let width = (header.max(widest) as u16).min(MAX_COLUMN_WIDTH);
            if index + 1 == count {
                Constraint::Min(width)
            } else {
                Constraint::Length(width)
            }
        })
        .collect()
}

/// Pagination footer text, e.g. `‹ 1 [2] 3 ›  page 2/3 · 25 rows · 10/page`.
pub fn pagination_line(view: &GridView) -> Line<'static> {
    let t = theme();
    let dim = Style::default().fg(t.dim);
    let mut spans = Vec::new();

    let prev_style = if view.has_prev_page() { Style::default().fg(t.fg) } else { dim };
    spans.push(Span::styled("‹ ", prev_style));
    for &page in &view.page_buttons {
        if page == view.current_page {
            spans.push(Span::styled(
                format!("[{}]", page),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(format!(" {} ", page), Style::default().fg(t.fg)));
        }
    }
    let next_style = if view.has_next_page() { Style::default().fg(t.fg) } else { dim };
    spans.push(Span::styled(" ›", next_style));

    let mut summary = format!(
        "  page {}/{} · {} rows · {}/page",
        view.current_page, view.total_pages, view.total_rows, view.page_size
    );
    if view.selected_count > 0 {
        summary.push_str(&format!(" · {} selected", view.selected_count));
    }
    spans.push(Span::styled(summary, dim));
    Line::from(spans)
}

/// Render the pagination footer.
pub fn render_pagination(frame: &mut Frame, area: Rect, view: &GridView) {
    frame.render_widget(Paragraph::new(pagination_line(view)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BadgeVariant, RowKey, VisibleRow};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn row(index: usize, selected: bool) -> VisibleRow {
        VisibleRow {
            key: RowKey::Position(index),
            source_index: index,
            row_index: index,
            selected,
        }
    }

    #[test]
    fn test_header_checkbox_states() {
        let mut view = GridView {
            rows: vec![row(0, false), row(1, false)],
            ..GridView::default()
        };
        assert_eq!(header_checkbox(&view), "[ ]");
        view.rows[1].selected = true;
        assert_eq!(header_checkbox(&view), "[-]");
        view.all_visible_selected = true;
        assert_eq!(header_checkbox(&view), "[x]");
    }

    #[test]
    fn test_pagination_line() {
        let view = GridView {
            total_rows: 25,
            total_pages: 3,
            current_page: 2,
            page_size: 10,
            page_buttons: vec![1, 2, 3],
            selected_count: 4,
            ..GridView::default()
        };
        assert_eq!(
            line_text(&pagination_line(&view)),
            "‹  1 [2] 3  ›  page 2/3 · 25 rows · 10/page · 4 selected"
        );
    }

    #[test]
    fn test_column_widths_fit_content() {
        let rows = vec![
            vec![CellContent::Text("Ann".to_string()), CellContent::Empty],
            vec![
                CellContent::Text("Bartholomew".to_string()),
                CellContent::Badge {
                    label: "active".to_string(),
                    variant: BadgeVariant::Success,
                },
            ],
        ];
        let widths = column_widths(&["Name", "Status"], &rows);
        assert_eq!(widths, vec![Constraint::Length(11), Constraint::Min(8)]);
    }

    #[test]
    fn test_column_widths_capped() {
        let long = "x".repeat(200);
        let rows = vec![vec![CellContent::Text(long), CellContent::Empty]];
        let widths = column_widths(&["A", "B"], &rows);
        assert_eq!(widths[0], Constraint::Length(MAX_COLUMN_WIDTH));
    }

    #[test]
    fn test_cell_line_labels() {
        let badge = CellContent::Badge {
            label: "banned".to_string(),
            variant: BadgeVariant::Danger,
        };
        assert_eq!(line_text(&cell_line(&badge, "")), "● banned");
        assert_eq!(line_text(&cell_line(&CellContent::Empty, "x")), "");
        let text = CellContent::Text("Ann Smith".to_string());
        assert_eq!(cell_line(&text, "smith").spans.len(), 2);
    }
}
