//! Theme and styling configuration.
//!
//! The active theme is chosen once at startup with [`init_theme`] and read
//! everywhere else through [`theme`].

use std::sync::OnceLock;

use ratatui::style::Color;

use crate::grid::BadgeVariant;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Primary background color.
    pub bg: Color,
    /// Accent for focus and titles.
    pub accent: Color,
    /// De-emphasized text.
    pub dim: Color,
    /// Unfocused borders.
    pub border: Color,
    /// Focused borders.
    pub border_focused: Color,
    /// Text inside inputs.
    pub input_fg: Color,
    /// Placeholder text inside inputs.
    pub input_placeholder: Color,
    /// Background of the cursor row.
    pub highlight_bg: Color,
    /// Background of selected rows.
    pub selected_bg: Color,
    /// Positive state.
    pub success: Color,
    /// Attention state.
    pub warning: Color,
    /// Negative state.
    pub danger: Color,
    /// Informational state.
    pub info: Color,
    /// Link text.
    pub link: Color,
}

impl Theme {
    /// Theme for dark terminals.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            accent: Color::Cyan,
            dim: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            input_fg: Color::White,
            input_placeholder: Color::DarkGray,
            highlight_bg: Color::Rgb(40, 44, 52),
            selected_bg: Color::Rgb(30, 60, 90),
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            info: Color::Blue,
            link: Color::LightBlue,
        }
    }

    /// Theme for light terminals.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            dim: Color::Gray,
            border: Color::Gray,
            border_focused: Color::Blue,
            input_fg: Color::Black,
            input_placeholder: Color::Gray,
            highlight_bg: Color::Rgb(225, 230, 240),
            selected_bg: Color::Rgb(200, 220, 245),
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            danger: Color::Red,
            info: Color::Blue,
            link: Color::Blue,
        }
    }

    /// The theme registered under `name`, falling back to dark.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Foreground color for a badge variant.
    pub fn badge(&self, variant: BadgeVariant) -> Color {
        match variant {
            BadgeVariant::Default => self.dim,
            BadgeVariant::Success => self.success,
            BadgeVariant::Warning => self.warning,
            BadgeVariant::Danger => self.danger,
            BadgeVariant::Info => self.info,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Install the application theme. Later calls are ignored.
pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized");
    }
}

/// The active theme (dark until [`init_theme`] is called).
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::dark)
}
