//! Undo/redo history over immutable snapshots.
//!
//! The history is a list of snapshots plus a cursor. Committing an edit
//! truncates everything after the cursor and appends; undo/redo only move the
//! cursor. Continuous gestures (a drag) overwrite the snapshot under the
//! cursor in place, so the whole gesture is one undo step.
//!
//! Observers registered with [`History::subscribe`] run after every change
//! of the current snapshot.

use std::fmt;
use std::sync::Arc;

/// What `set_state` should store.
pub enum Action<'a, T> {
    /// Store this value as-is.
    Replace(T),
    /// Derive the new value from the current snapshot.
    Transform(Box<dyn FnOnce(&T) -> T + 'a>),
}

impl<'a, T> Action<'a, T> {
    pub fn transform(f: impl FnOnce(&T) -> T + 'a) -> Self {
        Action::Transform(Box::new(f))
    }
}

impl<T> From<T> for Action<'_, T> {
    fn from(value: T) -> Self {
        Action::Replace(value)
    }
}

/// History limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Keep at most this many snapshots, dropping the oldest. `None` = unbounded.
    pub max_snapshots: Option<usize>,
}

/// Handle returned by [`History::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<T> = Box<dyn FnMut(&T)>;

/// Snapshot history with a movable cursor.
pub struct History<T> {
    snapshots: Vec<Arc<T>>,
    index: usize,
    max_snapshots: Option<usize>,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_subscription: u64,
}

impl<T> History<T> {
    pub fn new(initial: T) -> Self {
        Self::with_config(initial, HistoryConfig::default())
    }

    pub fn with_config(initial: T, config: HistoryConfig) -> Self {
        Self {
            snapshots: vec![Arc::new(initial)],
            index: 0,
            max_snapshots: config.max_snapshots.map(|n| n.max(1)),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &T {
        &self.snapshots[self.index]
    }

    /// Shared handle to the snapshot under the cursor.
    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.snapshots[self.index])
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Store a new state.
    ///
    /// With `overwrite`, the snapshot under the cursor is replaced in place;
    /// length and index are unchanged. Without it, any redo branch is
    /// discarded and the new snapshot becomes the last one.
    pub fn set_state<'a>(&mut self, action: impl Into<Action<'a, T>>, overwrite: bool) {
        let next = match action.into() {
            Action::Replace(value) => value,
            Action::Transform(f) => f(self.current()),
        };

        if overwrite {
            log::trace!("history: overwrite snapshot {}", self.index);
            self.snapshots[self.index] = Arc::new(next);
        } else {
            self.snapshots.truncate(self.index + 1);
            self.snapshots.push(Arc::new(next));
            self.trim();
            self.index = self.snapshots.len() - 1;
            log::debug!("history: commit → {}/{}", self.index, self.snapshots.len());
        }
        self.notify();
    }

    /// Step back one snapshot. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        log::debug!("history: undo → {}", self.index);
        self.notify();
        true
    }

    /// Step forward one snapshot. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        log::debug!("history: redo → {}", self.index);
        self.notify();
        true
    }

    /// Drop the current snapshot and everything after it, returning to the
    /// previous one. Used to abandon an interrupted gesture. Returns `false`
    /// at the oldest snapshot.
    pub fn rollback(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.snapshots.truncate(self.index);
        self.index -= 1;
        log::debug!("history: rollback → {}/{}", self.index, self.snapshots.len());
        self.notify();
        true
    }

    /// Register an observer called with the current snapshot after each change.
    pub fn subscribe(&mut self, observer: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn trim(&mut self) {
        if let Some(max) = self.max_snapshots {
            let excess = self.snapshots.len().saturating_sub(max);
            if excess > 0 {
                self.snapshots.drain(..excess);
            }
        }
    }

    fn notify(&mut self) {
        let current = Arc::clone(&self.snapshots[self.index]);
        for (_, observer) in &mut self.observers {
            observer(&current);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("index", &self.index)
            .field("len", &self.snapshots.len())
            .field("current", self.current())
            .field("observers", &self.observers.len())
            .finish()
    }
}
