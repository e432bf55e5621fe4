//! Scoped interest in outside clicks.
//!
//! Components that close on a click outside themselves (menus, popups) hold an
//! [`OutsideClickSubscription`] while open. The event layer only captures and
//! forwards mouse events while at least one subscription is alive, and a
//! subscription releases itself when dropped, so closing or tearing down a
//! component can never leave the terminal in mouse-capture mode.

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

/// Shared counter of live outside-click subscriptions.
#[derive(Debug, Clone, Default)]
pub struct InteractionScope {
    subscribers: Rc<Cell<usize>>,
}

impl InteractionScope {
    /// Create a scope with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving mouse events until the returned guard is dropped.
    pub fn subscribe_outside_click(&self) -> OutsideClickSubscription {
        let count = self.subscribers.get() + 1;
        self.subscribers.set(count);
        trace!(subscribers = count, "Outside-click subscription acquired");
        OutsideClickSubscription {
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    /// Whether any component currently wants mouse events.
    pub fn is_active(&self) -> bool {
        self.subscribers.get() > 0
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.get()
    }
}

/// Guard for one outside-click subscription; releases on drop.
#[derive(Debug)]
#[must_use = "the subscription ends as soon as the guard is dropped"]
pub struct OutsideClickSubscription {
    subscribers: Rc<Cell<usize>>,
}

impl Drop for OutsideClickSubscription {
    fn drop(&mut self) {
        let count = self.subscribers.get().saturating_sub(1);
        self.subscribers.set(count);
        trace!(subscribers = count, "Outside-click subscription released");
    }
}
