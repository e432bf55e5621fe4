//! Event handler implementation.
//!
//! Polls for terminal events and converts them to application events.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEventKind,
};
use crossterm::execute;
use tracing::debug;

use super::{Event, InteractionScope};

/// The default tick rate for the event loop in milliseconds.
const TICK_RATE_MS: u64 = 250;

/// Handles application events by polling crossterm for terminal events.
///
/// Mouse capture follows the [`InteractionScope`]: it is switched on while
/// any outside-click subscription is alive and off otherwise.
pub struct EventHandler {
    /// The tick rate duration.
    tick_rate: Duration,
    /// Subscriptions deciding whether mouse events are wanted.
    scope: InteractionScope,
    /// Whether mouse capture is currently enabled on the terminal.
    capturing: bool,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new(scope: InteractionScope) -> Self {
        Self::with_tick_rate(scope, TICK_RATE_MS)
    }

    /// Create a new event handler with a custom tick rate.
    pub fn with_tick_rate(scope: InteractionScope, tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            scope,
            capturing: false,
        }
    }

    /// Poll for the next event.
    ///
    /// This method blocks until an event is available or the tick rate elapses.
    /// Returns `Event::Tick` if no event occurred within the tick rate.
    pub fn next(&mut self) -> io::Result<Event> {
        self.sync_mouse_capture()?;
        if event::poll(self.tick_rate)? {
            Ok(self.translate(event::read()?))
        } else {
            Ok(Event::Tick)
        }
    }

    /// Convert a terminal event into an application event.
    fn translate(&self, event: CrosstermEvent) -> Event {
        match event {
            // Only presses; release and repeat events would double-fire on Windows
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Key(_) => Event::Tick,
            CrosstermEvent::Mouse(mouse) if self.scope.is_active() => Event::Mouse(mouse),
            CrosstermEvent::Mouse(_) => Event::Tick,
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost | CrosstermEvent::Paste(_) => {
                Event::Tick
            }
        }
    }

    /// Enable or disable mouse capture to match the scope.
    fn sync_mouse_capture(&mut self) -> io::Result<()> {
        let wanted = self.scope.is_active();
        if wanted == self.capturing {
            return Ok(());
        }
        if wanted {
            execute!(io::stdout(), EnableMouseCapture)?;
        } else {
            execute!(io::stdout(), DisableMouseCapture)?;
        }
        debug!(capturing = wanted, "Mouse capture toggled");
        self.capturing = wanted;
        Ok(())
    }

    /// Turn mouse capture off, e.g. before restoring the terminal.
    pub fn release(&mut self) -> io::Result<()> {
        if self.capturing {
            execute!(io::stdout(), DisableMouseCapture)?;
            self.capturing = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventState, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    fn click() -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_event_handler_new() {
        let handler = EventHandler::new(InteractionScope::new());
        assert_eq!(handler.tick_rate, Duration::from_millis(TICK_RATE_MS));
        assert!(!handler.capturing);
    }

    #[test]
    fn test_event_handler_with_tick_rate() {
        let handler = EventHandler::with_tick_rate(InteractionScope::new(), 50);
        assert_eq!(handler.tick_rate, Duration::from_millis(50));
    }

    #[test]
    fn test_mouse_dropped_without_subscription() {
        let handler = EventHandler::new(InteractionScope::new());
        assert_eq!(handler.translate(click()), Event::Tick);
    }

    #[test]
    fn test_mouse_forwarded_while_subscribed() {
        let scope = InteractionScope::new();
        let handler = EventHandler::new(scope.clone());
        let guard = scope.subscribe_outside_click();
        assert!(matches!(handler.translate(click()), Event::Mouse(_)));
        drop(guard);
        assert_eq!(handler.translate(click()), Event::Tick);
    }

    #[test]
    fn test_key_release_ignored() {
        let handler = EventHandler::new(InteractionScope::new());
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(handler.translate(CrosstermEvent::Key(press)), Event::Key(press));

        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('j'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(handler.translate(CrosstermEvent::Key(release)), Event::Tick);
    }

    #[test]
    fn test_resize() {
        let handler = EventHandler::new(InteractionScope::new());
        assert_eq!(
            handler.translate(CrosstermEvent::Resize(80, 24)),
            Event::Resize(80, 24)
        );
    }
}
