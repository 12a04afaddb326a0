//! Transient notifications
//!
//! Every view turns its failures (and successes) into short-lived toasts
//! instead of propagating errors.

use std::time::{Duration, Instant};

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    /// How long a toast of this level stays visible
    pub fn ttl(&self) -> Duration {
        match self {
            ToastLevel::Success => Duration::from_secs(3),
            ToastLevel::Error => Duration::from_secs(5),
        }
    }
}

/// A single notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.level.ttl()
    }
}

/// Queue of pending notifications owned by one view
#[derive(Debug, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "Operation failed");
        self.push(ToastLevel::Error, message);
    }

    fn push(&mut self, level: ToastLevel, message: String) {
        self.toasts.push(Toast {
            level,
            message,
            created_at: Instant::now(),
        });
    }

    /// Toasts still visible at `now`; expired ones are dropped
    pub fn active(&mut self, now: Instant) -> &[Toast] {
        self.toasts.retain(|t| !t.is_expired(now));
        &self.toasts
    }

    /// Take every queued toast, leaving the queue empty
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain() {
        let mut notes = Notifications::new();
        notes.success("Course created successfully");
        notes.error("Failed to delete course");

        assert_eq!(notes.len(), 2);
        assert_eq!(notes.last().unwrap().level, ToastLevel::Error);

        let drained = notes.drain();
        assert_eq!(drained[0].message, "Course created successfully");
        assert!(notes.is_empty());
    }

    #[test]
    fn test_expiry_by_level() {
        let mut notes = Notifications::new();
        notes.success("saved");
        notes.error("failed");

        let start = notes.last().unwrap().created_at;

        // success toasts go first
        let later = start + Duration::from_secs(4);
        let active = notes.active(later);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "failed");

        assert!(notes.active(start + Duration::from_secs(6)).is_empty());
    }
}
