//! Reusable UI components.

mod help_bar;
mod input;
mod notification;
mod row_menu;
mod search_bar;
mod table;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use notification::{Notification, NotificationManager, NotificationType};
pub use row_menu::{RowMenu, RowMenuAction, RowMenuItem};
pub use search_bar::{highlight_text, render_query_bar, Prompt, PromptTarget};
pub use table::{pagination_line, render_pagination, GridTable};
