//! User interface components and views.
//!
//! Everything that draws with ratatui lives here: the grid table and its
//! companions as reusable components, and the screens built from them.

pub mod components;
pub mod theme;
pub mod views;

pub use components::{render_context_help, Notification, NotificationManager, NotificationType};
pub use theme::{init_theme, theme, Theme};
pub use views::{DetailAction, DetailView, HelpAction, HelpView, ListAction, ListView};
