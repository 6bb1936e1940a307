//! In-memory notification center: keeps recent notifications until they are
//! dismissed or expire.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use nook_core::ports::{Notification, NotificationLevel, Notifier};

const DEFAULT_TTL: Duration = Duration::from_secs(5);
const MAX_ENTRIES: usize = 50;

/// Transient notification store.
///
/// Notifications older than the TTL are no longer reported as active and are
/// pruned on the next access. At most `MAX_ENTRIES` are kept.
pub struct InMemoryNotifier {
    entries: Mutex<Vec<Notification>>,
    ttl: TimeDelta,
}

impl InMemoryNotifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Notifications still showing, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Utc::now())
    }

    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|n| now - n.created_at <= self.ttl);
        entries.clone()
    }

    /// Remove one notification. Returns false if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }

    pub fn dismiss_all(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(id = %notification.id, message = %notification.message, "Notification")
            }
            NotificationLevel::Error => {
                tracing::warn!(id = %notification.id, message = %notification.message, "Error notification")
            }
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push(notification);
        if entries.len() > MAX_ENTRIES {
            let overflow = entries.len() - MAX_ENTRIES;
            entries.drain(..overflow);
        }
    }
}
