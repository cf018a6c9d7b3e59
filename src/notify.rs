//! Transient user-facing notifications
//!
//! Components that need to tell the user something (a failed load, a copied
//! id) take a `&mut impl Notifier` instead of reaching for global state. The
//! TUI implements it with toasts, headless mode with stderr.

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✗",
        }
    }
}

/// A single message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Message with its level icon, as shown in toasts and on stderr
    pub fn display_text(&self) -> String {
        format!("{} {}", self.level.icon(), self.message)
    }
}

/// Sink for notifications
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Headless notifier: prints to stderr so stdout stays clean for the listing
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, notification: Notification) {
        eprintln!("{}", notification.display_text());
    }
}

/// Notifier that keeps everything it receives (for tests)
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Vec<Notification>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}
