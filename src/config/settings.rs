//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Largest page size the settings file may request.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use.
    pub theme: String,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// Rows per page when neither the grid file nor the command line sets one.
    pub default_page_size: usize,
    /// Event poll interval in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            vim_mode: true,
            default_page_size: 10,
            tick_rate_ms: 250,
        }
    }
}

impl Settings {
    /// Reject values the application cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.theme.as_str(), "dark" | "light") {
            return Err(ConfigError::ValidationError(format!(
                "unknown theme '{}', expected 'dark' or 'light'",
                self.theme
            )));
        }
        if self.default_page_size == 0 || self.default_page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "default_page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let settings = Settings {
            theme: "neon".to_string(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("unknown theme"));
    }

    #[test]
    fn test_page_size_bounds() {
        let settings = Settings {
            default_page_size: MAX_PAGE_SIZE + 1,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("vim_mode = false").unwrap();
        assert!(!settings.vim_mode);
        assert_eq!(settings.default_page_size, 10);
        assert_eq!(settings.theme, "dark");
    }
}
