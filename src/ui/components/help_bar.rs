//! Contextual help bar component.
//!
//! One line at the bottom of the screen: key hints for the active context on
//! the left, an optional status message on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};
use crate::ui::theme::theme;

/// Render the help bar for `context`, with `status` right-aligned.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext, status: &str) {
    let status_width = (status.chars().count() as u16 + 1).min(area.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(status_width)])
        .split(area);

    let hints = Line::from(parse_hints_to_spans(get_context_hints(context)));
    frame.render_widget(Paragraph::new(hints), chunks[0]);

    if !status.is_empty() {
        let line = Line::from(Span::styled(status.to_string(), Style::default().fg(theme().dim)))
            .right_aligned();
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}

/// Split hint text into styled spans.
///
/// Bracketed keys use the accent color, descriptions are dimmed.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let t = theme();
    let key_style = Style::default().fg(t.accent);
    let text_style = Style::default().fg(t.dim);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' if !in_bracket => {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), text_style));
                }
                in_bracket = true;
                current.push(c);
            }
            ']' if in_bracket => {
                current.push(c);
                spans.push(Span::styled(std::mem::take(&mut current), key_style));
                in_bracket = false;
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, text_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_parse_hints_to_spans_simple() {
        let spans = parse_hints_to_spans("[j/k] move");
        assert_eq!(contents(&spans), vec!["[j/k]", " move"]);
        assert_eq!(spans[0].style.fg, Some(theme().accent));
    }

    #[test]
    fn test_parse_hints_to_spans_multiple_keys() {
        let spans = parse_hints_to_spans("[/] search  [space] select  [?] help");
        assert_eq!(spans.len(), 6);
        assert_eq!(spans[2].content, "[space]");
    }

    #[test]
    fn test_parse_hints_to_spans_empty() {
        assert!(parse_hints_to_spans("").is_empty());
    }

    #[test]
    fn test_parse_hints_to_spans_no_brackets() {
        assert_eq!(parse_hints_to_spans("just text").len(), 1);
    }

    #[test]
    fn test_every_context_parses() {
        for context in [
            KeyContext::Grid,
            KeyContext::Prompt,
            KeyContext::Menu,
            KeyContext::Detail,
            KeyContext::Help,
        ] {
            let spans = parse_hints_to_spans(get_context_hints(context));
            assert!(spans.iter().any(|s| s.content.starts_with('[')));
        }
    }
}
