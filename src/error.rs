//! Top-level error type for datagrid.
//!
//! Wraps the settings, grid definition and record loading errors and turns
//! them into short messages for the status area or stderr.

use thiserror::Error;

use crate::config::ConfigError;
use crate::data::DataError;
use crate::grid::SchemaError;

/// Any error the application reports to the user.
///
/// The wrapped source errors keep their detail for the log; the
/// [`AppError::user_message`] text is what the user sees.
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings file or grid definition errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Column schema errors.
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Record file errors.
    #[error("{0}")]
    Data(#[from] DataError),

    /// Other file system errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal could not be set up or restored.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Anything else, already phrased for the user.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Terminal failure with a description.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Error with a user-facing message.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// One-line message for a toast or stderr.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "No configuration directory on this system. Set DATAGRID_CONFIG to a file path."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => "Could not create the settings directory.".to_string(),
                ConfigError::ReadError(_) => "Could not read the settings or grid file.".to_string(),
                ConfigError::WriteError(_) => "Could not write the settings file.".to_string(),
                ConfigError::ParseError(inner) => format!("Invalid TOML: {}", inner),
                ConfigError::SerializeError(_) => "Could not serialize the settings.".to_string(),
                ConfigError::ValidationError(msg) => format!("Invalid setting: {}", msg),
                ConfigError::Schema(e) => format!("Grid definition error: {}", e),
            },
            AppError::Schema(e) => format!("Grid definition error: {}", e),
            AppError::Data(e) => match e {
                DataError::Read(_) => {
                    "Could not read the records file. Please check the path.".to_string()
                }
                DataError::Json(_) | DataError::Line { .. } => {
                    format!("The records file is not valid JSON: {}", e)
                }
                DataError::NotAnArray(found) => {
                    format!("The records file must hold a JSON array, found {}.", found)
                }
            },
            AppError::Io(e) => format!("File error: {}", e),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical and stops the application.
    ///
    /// Critical errors happen before the grid can be shown, such as
    /// unreadable input or a broken terminal.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Schema(_) | AppError::Data(_) | AppError::Terminal(_)
        )
    }

    /// A hint on how to fix the error, when there is an obvious one.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Run 'datagrid --init-config' to write a fresh configuration file.")
            }
            AppError::Config(ConfigError::Schema(_)) | AppError::Schema(_) => {
                Some("Column keys in the grid file must be non-empty and unique.")
            }
            AppError::Data(DataError::NotAnArray(_)) => {
                Some("Wrap the records in [ ... ] or use a .jsonl file with one object per line.")
            }
            AppError::Data(DataError::Read(_)) => Some("Check the records path and permissions."),
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
