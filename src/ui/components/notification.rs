//! Toast notifications.
//!
//! Short-lived messages stacked in the bottom-right corner, used to report
//! the outcome of bulk actions and degraded input. A message repeated while
//! still visible bumps a counter instead of stacking a duplicate.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::theme;

/// How many toasts are shown at once.
const MAX_VISIBLE: usize = 3;

/// The type of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
}

impl NotificationType {
    /// Icon shown before the message.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Warning => "⚠",
            NotificationType::Error => "✗",
        }
    }

    /// Theme color for this type.
    pub fn color(&self) -> Color {
        let t = theme();
        match self {
            NotificationType::Info => t.info,
            NotificationType::Success => t.success,
            NotificationType::Warning => t.warning,
            NotificationType::Error => t.danger,
        }
    }

    fn default_duration(&self) -> Duration {
        match self {
            NotificationType::Info | NotificationType::Success => Duration::from_secs(3),
            NotificationType::Warning | NotificationType::Error => Duration::from_secs(5),
        }
    }
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The message text.
    pub message: String,
    /// The type of notification.
    pub notification_type: NotificationType,
    /// How many times the message was raised while visible.
    pub repeats: usize,
    shown_at: Instant,
    duration: Duration,
}

impl Notification {
    /// Create a notification with the type's default duration.
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            repeats: 1,
            shown_at: Instant::now(),
            duration: notification_type.default_duration(),
        }
    }

    /// Override how long the toast stays up.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the toast has expired.
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() > self.duration
    }

    fn text(&self) -> String {
        if self.repeats > 1 {
            format!("{} {} (×{})", self.notification_type.icon(), self.message, self.repeats)
        } else {
            format!("{} {}", self.notification_type.icon(), self.message)
        }
    }
}

/// Queue of visible toasts.
#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
}

impl NotificationManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification, merging it into an identical visible one.
    pub fn push(&mut self, notification: Notification) {
        if let Some(existing) = self.notifications.iter_mut().find(|n| {
            n.message == notification.message && n.notification_type == notification.notification_type
        }) {
            existing.repeats += 1;
            existing.shown_at = notification.shown_at;
            return;
        }

        self.notifications.push_back(notification);
        while self.notifications.len() > MAX_VISIBLE {
            self.notifications.pop_front();
        }
    }

    /// Show an info notification.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Info));
    }

    /// Show a success notification.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Success));
    }

    /// Show a warning notification.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Warning));
    }

    /// Show an error notification.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Error));
    }

    /// Drop expired toasts. Called on every tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Check if there are any toasts.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Number of visible toasts.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Iterate over visible toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render the toasts stacked upwards from the bottom-right of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 48.min(area.width.saturating_sub(2));
        let inner_width = width.saturating_sub(2).max(1) as usize;
        let mut bottom = area.y + area.height.saturating_sub(1);

        for notification in self.notifications.iter().rev() {
            let text = notification.text();
            let lines = text.chars().count().div_ceil(inner_width).max(1) as u16;
            let height = lines + 2;
            if bottom < area.y + height {
                break;
            }
            bottom -= height;
            let toast_area = Rect::new(
                area.x + area.width.saturating_sub(width + 1),
                bottom,
                width,
                height,
            );
            render_notification(frame, toast_area, notification, text);
        }
    }
}

fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification, text: String) {
    let color = notification.notification_type.color();
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
