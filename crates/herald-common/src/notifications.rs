//! Visible diagnostics for the host UI.
//!
//! Speech failures and start-up problems are logged, and also queued here
//! so a settings panel or overlay can show them to the user.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    /// Creates an info notification with a 5-second TTL.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Info, title, body, Duration::from_secs(5))
    }

    /// Creates a warning notification with an 8-second TTL.
    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Warning, title, body, Duration::from_secs(8))
    }

    /// Creates an error notification with a 10-second TTL.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Error, title, body, Duration::from_secs(10))
    }

    fn with_level(
        level: NotificationLevel,
        title: impl Into<String>,
        body: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// Bounded queue that drops expired entries first, then the oldest.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        self.evict_expired();
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Returns all currently visible (non-expired) notifications.
    pub fn visible(&mut self) -> Vec<&Notification> {
        self.evict_expired();
        self.items.iter().collect()
    }

    /// Removes and returns everything queued, expired or not.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self) {
        self.items.retain(|n| !n.is_expired());
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_level_and_ttl() {
        let n = Notification::warning("Voice", "voice missing");
        assert_eq!(n.level, NotificationLevel::Warning);
        assert_eq!(n.ttl, Duration::from_secs(8));
        assert_eq!(n.body, "voice missing");

        let n = Notification::error("Voice", "no voices");
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.ttl, Duration::from_secs(10));
    }

    #[test]
    fn push_evicts_oldest_at_capacity() {
        let mut queue = NotificationQueue::new(2);
        queue.push(Notification::info("a", "1"));
        queue.push(Notification::info("b", "2"));
        queue.push(Notification::info("c", "3"));

        let titles: Vec<_> = queue.visible().iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn expired_entries_are_hidden() {
        let mut queue = NotificationQueue::default();
        let mut stale = Notification::info("old", "gone");
        stale.ttl = Duration::ZERO;
        queue.push(stale);
        queue.push(Notification::info("new", "here"));

        let visible = queue.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "new");
    }

    #[test]
    fn drain_empties_queue() {
        let mut queue = NotificationQueue::default();
        queue.push(Notification::error("x", "y"));
        assert_eq!(queue.len(), 1);

        let drained = queue.drain();
        assert_eq!(drained.len(), 1);
        assert!(queue.is_empty());
    }
}
