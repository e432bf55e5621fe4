//! Query bar: the search prompt plus a summary of active filters and sort.
//!
//! Also provides [`highlight_text`], used by the grid to mark search matches
//! inside cells.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::input::TextInput;
use crate::grid::{FilterMap, SortConfig};
use crate::ui::theme::theme;

/// What the prompt is currently editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptTarget {
    /// The global search term.
    Search,
    /// The filter of one column.
    Filter {
        /// Column key.
        key: String,
        /// Column title, for the prompt label.
        title: String,
    },
}

/// An open search or filter prompt.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// What is being edited.
    pub target: PromptTarget,
    /// The text being edited.
    pub input: TextInput,
    /// Value to restore on cancel.
    pub original: String,
}

impl Prompt {
    /// Open a prompt pre-filled with `current`.
    pub fn new(target: PromptTarget, current: &str) -> Self {
        let mut input = TextInput::with_value(current);
        input.set_placeholder(match &target {
            PromptTarget::Search => "search all columns",
            PromptTarget::Filter { .. } => "contains…",
        });
        Self {
            target,
            input,
            original: current.to_string(),
        }
    }

    /// Prompt label shown before the input.
    pub fn label(&self) -> String {
        match &self.target {
            PromptTarget::Search => "/".to_string(),
            PromptTarget::Filter { title, .. } => format!("{} ~ ", title),
        }
    }
}

/// Highlight case-insensitive matches of `query` in `text`.
///
/// Matching runs on the lowercased text; each match is mapped back to the
/// original characters it came from, since lowercasing can change byte
/// lengths per character.
pub fn highlight_text(text: &str, query: &str, base: Style) -> Line<'static> {
    if query.is_empty() {
        return Line::from(Span::styled(text.to_string(), base));
    }

    // Byte range of the source character behind every lowercased byte.
    let mut lowered = String::with_capacity(text.len());
    let mut sources: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        let end = start + ch.len_utf8();
        lowered.extend(ch.to_lowercase());
        sources.resize(lowered.len(), (start, end));
    }
    let query_lower = query.to_lowercase();

    let t = theme();
    let matched = Style::default()
        .bg(t.warning)
        .fg(t.bg)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut last_end = 0;
    for (found_start, found) in lowered.match_indices(&query_lower) {
        let (start, _) = sources[found_start];
        let (_, end) = sources[found_start + found.len() - 1];
        if start < last_end {
            continue;
        }
        if start > last_end {
            spans.push(Span::styled(text[last_end..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), matched));
        last_end = end;
    }
    if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base));
    }

    Line::from(spans)
}

/// Render the query bar.
///
/// Shows the open prompt when there is one, otherwise a summary of the
/// search term, column filters and sort.
pub fn render_query_bar(
    frame: &mut Frame,
    area: Rect,
    prompt: Option<&Prompt>,
    search: &str,
    filters: &FilterMap,
    sort: &SortConfig,
) {
    if let Some(prompt) = prompt {
        prompt.input.render_inline(frame, area, &prompt.label(), true);
        return;
    }

    let t = theme();
    let mut spans = Vec::new();
    if !search.is_empty() {
        spans.push(Span::styled(format!("/{}", search), Style::default().fg(t.warning)));
        spans.push(Span::raw("  "));
    }
    for (key, value) in filters.iter() {
        spans.push(Span::styled(
            format!("{}~{}", key, value),
            Style::default().fg(t.accent),
        ));
        spans.push(Span::raw("  "));
    }
    if let Some(key) = sort.key() {
        spans.push(Span::styled(
            format!("sort: {} {}", key, sort.indicator(key).unwrap_or_default()),
            Style::default().fg(t.dim),
        ));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            "press / to search, f to filter a column",
            Style::default().fg(t.dim),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_matches() {
        let line = highlight_text("Admin and admin", "ADMIN", Style::default());
        assert_eq!(text_of(&line), vec!["Admin", " and ", "admin"]);
    }

    #[test]
    fn test_highlight_empty_query() {
        let line = highlight_text("hello", "", Style::default());
        assert_eq!(text_of(&line), vec!["hello"]);
    }

    #[test]
    fn test_highlight_no_match() {
        let line = highlight_text("hello", "xyz", Style::default());
        assert_eq!(text_of(&line), vec!["hello"]);
    }

    #[test]
    fn test_highlight_length_changing_lowercase() {
        let line = highlight_text("İstanbul", "ist", Style::default());
        assert_eq!(text_of(&line), vec!["İstanbul"]);

        let line = highlight_text("İstanbul", "İst", Style::default());
        assert_eq!(text_of(&line), vec!["İst", "anbul"]);
    }

    #[test]
    fn test_highlight_maps_shifted_offsets_back_to_chars() {
        // Same total byte length after lowercasing, different per-char offsets.
        let line = highlight_text("ẞİx", "ß", Style::default());
        assert_eq!(text_of(&line), vec!["ẞ", "İx"]);

        let line = highlight_text("ẞİx", "İ", Style::default());
        assert_eq!(text_of(&line), vec!["ẞ", "İ", "x"]);
    }

    #[test]
    fn test_prompt_labels() {
        let search = Prompt::new(PromptTarget::Search, "ann");
        assert_eq!(search.label(), "/");
        assert_eq!(search.input.value(), "ann");

        let filter = Prompt::new(
            PromptTarget::Filter {
                key: "name".to_string(),
                title: "Name".to_string(),
            },
            "",
        );
        assert_eq!(filter.label(), "Name ~ ");
        assert_eq!(filter.original, "");
    }
}
