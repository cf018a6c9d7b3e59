//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a short duration.
//! Renders in the bottom-right corner on top of all other content.
//! [`ToastNotifier`] is how the rest of the app raises one.

use crate::notify::{Notification, NotificationLevel, Notifier};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// How long info/success toasts stay up
const TOAST_DURATION: Duration = Duration::from_secs(2);
/// Errors stay longer so they can be read
const ERROR_TOAST_DURATION: Duration = Duration::from_secs(5);

/// A toast notification that auto-dismisses
pub struct Toast {
    pub notification: Notification,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(notification: Notification) -> Self {
        let duration = match notification.level {
            NotificationLevel::Error => ERROR_TOAST_DURATION,
            _ => TOAST_DURATION,
        };
        Self {
            notification,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` widget to ensure toast is visible on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let text = self.notification.display_text();

        // 2 cells of padding each side plus the border
        let width = (text.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        // Bottom-right corner, clear of the footer
        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let accent = match self.notification.level {
            NotificationLevel::Info => theme.highlight,
            NotificationLevel::Success => theme.success,
            NotificationLevel::Error => theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.background));

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(paragraph, toast_area);
    }
}

/// Notifier that shows each notification as a toast (newest wins)
pub struct ToastNotifier<'a>(pub &'a mut Option<Toast>);

impl Notifier for ToastNotifier<'_> {
    fn notify(&mut self, notification: Notification) {
        *self.0 = Some(Toast::new(notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_notifier_replaces_current_toast() {
        let mut slot = None;
        {
            let mut notifier = ToastNotifier(&mut slot);
            notifier.notify(Notification::info("first"));
            notifier.notify(Notification::error("second"));
        }
        let toast = slot.unwrap();
        assert_eq!(toast.notification.message, "second");
        assert!(!toast.is_expired());
    }
}
