//! Event handling for the application.
//!
//! This module turns terminal input into application events, maps keys to
//! grid commands and scopes mouse interest to the components that need it.

mod handler;
mod keys;
mod subscription;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::EventHandler;
pub use keys::{
    get_context_hints, get_keybindings_grouped, GridCommand, KeyBindings, KeyContext, Keybinding,
};
pub use subscription::{InteractionScope, OutsideClickSubscription};

/// An application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// A mouse event, only delivered while a component subscribes to clicks.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
