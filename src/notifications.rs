//! Transient in-app notifications (toasts).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);
/// Oldest notifications are dropped beyond this.
pub const MAX_NOTIFICATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notice>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(
        &mut self,
        kind: NoticeKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: Instant,
    ) {
        let notice = Notice {
            kind,
            title: title.into(),
            message: message.into(),
            created_at: now,
        };
        tracing::debug!("Notification: {} - {}", notice.title, notice.message);
        self.queue.push_back(notice);
        while self.queue.len() > MAX_NOTIFICATIONS {
            self.queue.pop_front();
        }
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push_at(NoticeKind::Success, title, message, Instant::now());
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push_at(NoticeKind::Error, title, message, Instant::now());
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push_at(NoticeKind::Info, title, message, Instant::now());
    }

    /// Drop expired notices. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.queue.len();
        self.queue
            .retain(|n| now.saturating_duration_since(n.created_at) < NOTIFICATION_TTL);
        self.queue.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn dismiss_all(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_keeps_newest_three() {
        let mut n = Notifications::new();
        let now = Instant::now();
        for i in 0..5 {
            n.push_at(NoticeKind::Info, format!("t{}", i), "", now);
        }
        let titles: Vec<_> = n.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["t2", "t3", "t4"]);
    }

    #[test]
    fn test_prune_expires_after_ttl() {
        let mut n = Notifications::new();
        let start = Instant::now();
        n.push_at(NoticeKind::Error, "old", "", start);
        n.push_at(NoticeKind::Success, "new", "", start + Duration::from_secs(2));

        assert!(!n.prune(start + Duration::from_secs(3)));
        assert!(n.prune(start + NOTIFICATION_TTL));
        assert_eq!(n.len(), 1);
        assert_eq!(n.iter().next().map(|n| n.title.as_str()), Some("new"));
    }
}
