//! Notifications shown in the terminal.

use std::sync::Arc;

use nook_core::ports::{Notification, NotificationLevel, Notifier};
use nook_infra::InMemoryNotifier;

/// Prints every notification to stderr as it arrives and keeps it in the
/// notification center until it expires or is dismissed.
pub struct ConsoleNotifier {
    center: Arc<InMemoryNotifier>,
}

impl ConsoleNotifier {
    pub fn new(center: Arc<InMemoryNotifier>) -> Self {
        Self { center }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", notification.message);
        self.center.notify(notification);
    }
}
