//! Confirmation modal
//!
//! One prompt at a time. `open` hands back a receiver that resolves to
//! `true` on confirm and `false` on cancel; opening a new prompt cancels
//! the pending one.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::signal::Signal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ModalService {
    config: Signal<Option<ModalConfig>>,
    pending: Mutex<Option<oneshot::Sender<bool>>>,
}

impl ModalService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.config.get().is_some()
    }

    /// What the open modal shows
    pub fn config(&self) -> Arc<Option<ModalConfig>> {
        self.config.get()
    }

    pub fn open(&self, config: ModalConfig) -> oneshot::Receiver<bool> {
        let (tx, rx) = oneshot::channel();
        let previous = self.pending.lock().replace(tx);
        if let Some(previous) = previous {
            // The caller may have stopped waiting
            let _ = previous.send(false);
        }
        self.config.set(Some(config));
        rx
    }

    pub fn confirm(&self) {
        self.resolve(true);
    }

    pub fn cancel(&self) {
        self.resolve(false);
    }

    fn resolve(&self, answer: bool) {
        self.config.set(None);
        if let Some(tx) = self.pending.lock().take() {
            let _ = tx.send(answer);
        }
    }
}
