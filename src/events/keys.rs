//! Key binding definitions.
//!
//! Maps key presses in the grid view to [`GridCommand`]s and provides the
//! short hint strings shown in the help bar for each [`KeyContext`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A command the grid view understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCommand {
    /// Move the cursor up one row.
    Up,
    /// Move the cursor down one row.
    Down,
    /// Go to the previous page.
    PrevPage,
    /// Go to the next page.
    NextPage,
    /// Go to the first page.
    FirstPage,
    /// Go to the last page.
    LastPage,
    /// Focus the column to the left.
    FocusLeft,
    /// Focus the column to the right.
    FocusRight,
    /// Start editing the search term.
    Search,
    /// Start editing the focused column's filter.
    Filter,
    /// Remove all column filters.
    ClearFilters,
    /// Sort by the focused column.
    Sort,
    /// Toggle selection of the row under the cursor.
    ToggleRow,
    /// Toggle selection of every visible row.
    ToggleAll,
    /// Deselect everything.
    ClearSelection,
    /// Show more rows per page.
    GrowPage,
    /// Show fewer rows per page.
    ShrinkPage,
    /// Open the row under the cursor.
    Open,
    /// Open the row menu.
    Menu,
    /// Remove the selected records.
    DeleteSelected,
    /// Show the help screen.
    Help,
    /// Quit the application.
    Quit,
}

/// Which part of the UI currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyContext {
    /// The grid itself.
    #[default]
    Grid,
    /// The search or filter prompt.
    Prompt,
    /// The row menu.
    Menu,
    /// The record detail view.
    Detail,
    /// The help screen.
    Help,
}

impl KeyContext {
    /// Section title in the help screen.
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::Grid => "Grid",
            KeyContext::Prompt => "Search & Filter Prompt",
            KeyContext::Menu => "Row Menu",
            KeyContext::Detail => "Record Detail",
            KeyContext::Help => "Help",
        }
    }
}

/// One documented key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    /// Key or keys, as shown to the user.
    pub key: &'static str,
    /// What the key does.
    pub description: String,
}

impl Keybinding {
    fn new(key: &'static str, description: &str) -> Self {
        Self {
            key,
            description: description.to_string(),
        }
    }
}

/// Every documented binding, grouped by the context it applies in.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, Vec<Keybinding>)> {
    vec![
        (
            KeyContext::Grid,
            vec![
                Keybinding::new("j/k, ↓/↑", "Move the cursor"),
                Keybinding::new("h/l, ←/→", "Previous / next page"),
                Keybinding::new("g/G", "First / last page"),
                Keybinding::new("[ / ]", "Focus column left / right"),
                Keybinding::new("/", "Search all columns"),
                Keybinding::new("f", "Filter the focused column"),
                Keybinding::new("F", "Clear all filters"),
                Keybinding::new("s", "Sort by the focused column (again to reverse)"),
                Keybinding::new("space", "Select the row"),
                Keybinding::new("a", "Select or deselect every visible row"),
                Keybinding::new("Esc", "Clear the selection"),
                Keybinding::new("+ / -", "More / fewer rows per page"),
                Keybinding::new("Enter", "Open the row"),
                Keybinding::new("m", "Row menu"),
                Keybinding::new("D", "Delete the selected rows"),
                Keybinding::new("?", "Toggle this help"),
                Keybinding::new("q, Ctrl+C", "Quit"),
            ],
        ),
        (
            KeyContext::Prompt,
            vec![
                Keybinding::new("Enter", "Apply and leave the prompt"),
                Keybinding::new("Esc", "Restore the previous value"),
                Keybinding::new("Ctrl+U", "Clear the input"),
                Keybinding::new("Ctrl+W", "Delete the word before the cursor"),
            ],
        ),
        (
            KeyContext::Menu,
            vec![
                Keybinding::new("j/k, ↓/↑", "Move"),
                Keybinding::new("Enter", "Choose"),
                Keybinding::new("Esc, click outside", "Close"),
            ],
        ),
        (
            KeyContext::Detail,
            vec![
                Keybinding::new("j/k, ↓/↑", "Scroll"),
                Keybinding::new("Esc, q", "Back to the grid"),
            ],
        ),
    ]
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Whether vim-style bindings are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// The grid command bound to `key`, if any.
    pub fn resolve(&self, key: &KeyEvent) -> Option<GridCommand> {
        let command = match (key.code, key.modifiers) {
            (KeyCode::Up, _) => GridCommand::Up,
            (KeyCode::Down, _) => GridCommand::Down,
            (KeyCode::Left, _) | (KeyCode::PageUp, _) => GridCommand::PrevPage,
            (KeyCode::Right, _) | (KeyCode::PageDown, _) => GridCommand::NextPage,
            (KeyCode::Home, _) => GridCommand::FirstPage,
            (KeyCode::End, _) => GridCommand::LastPage,
            (KeyCode::Enter, _) => GridCommand::Open,
            (KeyCode::Esc, _) => GridCommand::ClearSelection,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => GridCommand::Quit,
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => match c {
                'k' if self.vim_mode => GridCommand::Up,
                'j' if self.vim_mode => GridCommand::Down,
                'h' if self.vim_mode => GridCommand::PrevPage,
                'l' if self.vim_mode => GridCommand::NextPage,
                'g' if self.vim_mode => GridCommand::FirstPage,
                'G' if self.vim_mode => GridCommand::LastPage,
                '[' => GridCommand::FocusLeft,
                ']' => GridCommand::FocusRight,
                '/' => GridCommand::Search,
                'f' => GridCommand::Filter,
                'F' => GridCommand::ClearFilters,
                's' => GridCommand::Sort,
                ' ' => GridCommand::ToggleRow,
                'a' => GridCommand::ToggleAll,
                '+' | '=' => GridCommand::GrowPage,
                '-' => GridCommand::ShrinkPage,
                'm' => GridCommand::Menu,
                'D' => GridCommand::DeleteSelected,
                '?' => GridCommand::Help,
                'q' => GridCommand::Quit,
                _ => return None,
            },
            _ => return None,
        };
        Some(command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Help bar hints for a context. Keys are in brackets.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Grid => {
            "[j/k] move  [h/l] page  [/] search  [f] filter  [s] sort  [space] select  [Enter] open  [?] help  [q] quit"
        }
        KeyContext::Prompt => "[Enter] apply  [Esc] cancel  [Ctrl+U] clear",
        KeyContext::Menu => "[j/k] move  [Enter] choose  [Esc] close",
        KeyContext::Detail => "[j/k] scroll  [Esc] back",
        KeyContext::Help => "[Esc/?] close",
    }
}
