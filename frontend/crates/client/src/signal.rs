//! Snapshot cells
//!
//! A `Signal` holds an `Arc<T>` that is swapped whole on every write, so a
//! reader either sees the old value or the new one.

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Signal<T> {
    value: RwLock<Arc<T>>,
    version: AtomicU64,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(Arc::new(value)),
            version: AtomicU64::new(0),
        }
    }

    /// Current snapshot
    pub fn get(&self) -> Arc<T> {
        self.value.read().clone()
    }

    pub fn set(&self, value: T) {
        *self.value.write() = Arc::new(value);
        self.version.fetch_add(1, Ordering::Release);
    }

    /// Derive the next value from the current one under the write lock
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let mut guard = self.value.write();
        *guard = Arc::new(f(&guard));
        self.version.fetch_add(1, Ordering::Release);
    }

    /// Bumped on every write; lets renderers skip unchanged state
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signal").field(&*self.get()).finish()
    }
}
