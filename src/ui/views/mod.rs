//! Application views (screens).

mod detail;
mod help;
mod list;

pub use detail::{DetailAction, DetailView};
pub use help::{centered_rect, HelpAction, HelpView};
pub use list::{ListAction, ListView};
