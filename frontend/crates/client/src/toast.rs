//! Toast notifications
//!
//! Time is passed in explicitly so expiry is deterministic; the UI calls
//! `prune(Instant::now())` on each frame or timer tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::signal::Signal;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
    pub shown_at: Instant,
}

impl Toast {
    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.duration
    }
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    next_id: AtomicU64,
    toasts: Signal<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible toasts, oldest first
    pub fn toasts(&self) -> Arc<Vec<Toast>> {
        self.toasts.get()
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.show_at(message, kind, None, Instant::now())
    }

    /// `duration` defaults to 4000 ms
    pub fn show_at(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Option<Duration>,
        now: Instant,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            message: message.into(),
            kind,
            duration: duration.unwrap_or(DEFAULT_TOAST_DURATION),
            shown_at: now,
        };
        self.toasts.update(|toasts| {
            let mut toasts = toasts.clone();
            toasts.push(toast.clone());
            toasts
        });
        id
    }

    pub fn remove(&self, id: u64) {
        self.toasts
            .update(|toasts| toasts.iter().filter(|t| t.id != id).cloned().collect());
    }

    /// Drop every toast that has expired by `now`; returns how many went
    pub fn prune(&self, now: Instant) -> usize {
        let before = self.toasts.get().len();
        self.toasts.update(|toasts| {
            toasts
                .iter()
                .filter(|t| t.expires_at() > now)
                .cloned()
                .collect()
        });
        before.saturating_sub(self.toasts.get().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_count_up_and_default_duration_applies() {
        let queue = ToastQueue::new();
        let now = Instant::now();
        let a = queue.show_at("Saved", ToastKind::Success, None, now);
        let b = queue.show_at("Oops", ToastKind::Error, Some(Duration::from_secs(1)), now);

        assert_eq!((a, b), (0, 1));
        let toasts = queue.toasts();
        assert_eq!(toasts[0].duration, DEFAULT_TOAST_DURATION);
        assert_eq!(toasts[1].duration, Duration::from_secs(1));
    }

    #[test]
    fn test_prune_removes_only_expired() {
        let queue = ToastQueue::new();
        let now = Instant::now();
        queue.show_at("short", ToastKind::Info, Some(Duration::from_millis(500)), now);
        queue.show_at("default", ToastKind::Info, None, now);

        assert_eq!(queue.prune(now + Duration::from_millis(499)), 0);
        assert_eq!(queue.prune(now + Duration::from_millis(500)), 1);
        assert_eq!(queue.toasts()[0].message, "default");
        assert_eq!(queue.prune(now + DEFAULT_TOAST_DURATION), 1);
        assert!(queue.toasts().is_empty());
    }

    #[test]
    fn test_remove() {
        let queue = ToastQueue::new();
        let id = queue.show("bye", ToastKind::Info);
        queue.remove(id);
        queue.remove(id);
        assert!(queue.toasts().is_empty());
    }
}
