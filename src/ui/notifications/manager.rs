// SPDX-License-Identifier: MPL-2.0
//! Toast queue.
//!
//! At most [`MAX_VISIBLE`] toasts are on screen; the rest wait in FIFO order
//! and are promoted as visible ones expire or get dismissed. Warnings and
//! errors are also written to the log when pushed.

use super::notification::{Notification, NotificationId, Severity};
use std::collections::VecDeque;
use std::time::Instant;

pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick,
}

#[derive(Debug, Default)]
pub struct Manager {
    /// Newest first.
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => log::warn!(
                "{} {:?}",
                notification.message_key(),
                notification.message_args()
            ),
            Severity::Error => log::error!(
                "{} {:?}",
                notification.message_key(),
                notification.message_args()
            ),
            Severity::Success | Severity::Info => {}
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Returns `true` if a toast with this id existed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Removes every toast whose key starts with `prefix`, e.g. stale upload
    /// errors once an upload succeeds.
    pub fn dismiss_matching(&mut self, prefix: &str) {
        let before = self.visible.len();
        self.visible.retain(|n| !n.message_key().starts_with(prefix));
        self.queue.retain(|n| !n.message_key().starts_with(prefix));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        let expired: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.is_expired(now))
            .map(Notification::id)
            .collect();
        for id in expired {
            self.dismiss(id);
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            self.visible.push_back(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn overflow_is_queued_then_promoted() {
        let mut manager = Manager::new();
        let first = Notification::success("collection-saved");
        let first_id = first.id();
        manager.push(first);
        for _ in 1..MAX_VISIBLE {
            manager.push(Notification::info("notification-link-copied"));
        }
        manager.push(Notification::warning("notification-image-load-failed"));
        assert_eq!((manager.visible_count(), manager.queued_count()), (3, 1));

        assert!(manager.dismiss(first_id));
        assert_eq!((manager.visible_count(), manager.queued_count()), (3, 0));
        assert!(!manager.dismiss(first_id));
    }

    #[test]
    fn tick_expires_success_but_not_errors() {
        let mut manager = Manager::new();
        manager.push(Notification::success("notification-collection-saved"));
        manager.push(Notification::error("error-storage-unavailable"));

        manager.tick_at(Instant::now() + Duration::from_secs(10));
        assert_eq!(manager.visible_count(), 1);
        assert_eq!(
            manager.visible().next().map(Notification::severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn dismiss_matching_keeps_other_keys() {
        let mut manager = Manager::new();
        manager.push(Notification::error("error-storage-unavailable"));
        manager.push(Notification::error("error-storage-empty"));
        manager.push(Notification::success("notification-collection-saved"));
        manager.push(Notification::error("error-catalog-unavailable"));

        manager.dismiss_matching("error-storage-");
        assert_eq!(manager.visible_count(), 2);
        assert_eq!(manager.queued_count(), 0);
        assert!(manager
            .visible()
            .all(|n| !n.message_key().starts_with("error-storage-")));
    }

    #[test]
    fn dismiss_message_is_handled() {
        let mut manager = Manager::new();
        let toast = Notification::error("error-io");
        let id = toast.id();
        manager.push(toast);
        manager.handle_message(&Message::Dismiss(id));
        assert!(!manager.has_notifications());
    }
}
