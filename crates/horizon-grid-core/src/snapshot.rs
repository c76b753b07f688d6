//! Identity-compared snapshots of shared state.
//!
//! A [`Snapshot<T>`] is an immutable, cheaply cloneable view of a value at
//! one point in time. Two snapshots compare equal only when they are the
//! *same* publication, never because their contents happen to match. Views
//! use this to decide whether to recompute: a new publication always counts
//! as a change, even if the published content is identical.
//!
//! [`SnapshotCell<T>`] owns the current snapshot of some state, replaces it
//! copy-on-write, and announces each publication through a [`Signal`].
//!
//! # Example
//!
//! ```
//! use horizon_grid_core::SnapshotCell;
//!
//! let cell = SnapshotCell::new(vec![1, 2, 3]);
//! let before = cell.current();
//!
//! // Publishing identical content still produces a new identity.
//! let after = cell.publish(vec![1, 2, 3]);
//! assert_eq!(*before, *after);
//! assert_ne!(before, after);
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::targets;
use crate::signal::Signal;

/// A global counter for generating unique snapshot generations.
static GENERATION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// An immutable, identity-compared view of a value.
///
/// Identity is a process-wide generation number, so it stays unique even if
/// the allocation of an old snapshot is reused for a new one. Generations
/// grow with every publication, so they also order snapshots in time.
pub struct Snapshot<T> {
    value: Arc<T>,
    generation: u64,
}

impl<T> Snapshot<T> {
    /// Publish a new snapshot with a fresh identity.
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
            generation: GENERATION_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The generation that identifies this publication.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if `self` was published after `other`.
    #[inline]
    pub fn is_newer_than(&self, other: &Snapshot<T>) -> bool {
        self.generation > other.generation
    }

    /// Returns `true` if both snapshots are the same publication.
    #[inline]
    pub fn same_identity(&self, other: &Snapshot<T>) -> bool {
        self.generation == other.generation
    }

    /// Access the snapshot's value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            generation: self.generation,
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl<T> Eq for Snapshot<T> {}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("generation", &self.generation)
            .field("value", &*self.value)
            .finish()
    }
}

/// Owner of the current snapshot of a piece of shared state.
pub struct SnapshotCell<T> {
    current: RwLock<Snapshot<T>>,
    changed: Arc<Signal<Snapshot<T>>>,
}

impl<T: Send + Sync + 'static> SnapshotCell<T> {
    /// Create a cell holding an initial snapshot of `value`.
    pub fn new(value: T) -> Self {
        Self {
            current: RwLock::new(Snapshot::new(value)),
            changed: Arc::new(Signal::new()),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> Snapshot<T> {
        self.current.read().clone()
    }

    /// Signal emitted after every publication with the new snapshot.
    pub fn changed(&self) -> &Arc<Signal<Snapshot<T>>> {
        &self.changed
    }

    /// Replace the state, publishing a new snapshot.
    pub fn publish(&self, value: T) -> Snapshot<T> {
        let snapshot = {
            // Taken under the lock so the current snapshot's generation only grows.
            let mut current = self.current.write();
            let snapshot = Snapshot::new(value);
            *current = snapshot.clone();
            snapshot
        };
        self.announce(&snapshot);
        snapshot
    }

    /// Modify a copy of the current state and publish it.
    ///
    /// If `modify` fails nothing is published and the current snapshot stays
    /// in place.
    pub fn update<E, F>(&self, modify: F) -> Result<Snapshot<T>, E>
    where
        T: Clone,
        F: FnOnce(&mut T) -> Result<(), E>,
    {
        let snapshot = {
            let mut current = self.current.write();
            let mut next = (*current.value).clone();
            modify(&mut next)?;
            let snapshot = Snapshot::new(next);
            *current = snapshot.clone();
            snapshot
        };
        self.announce(&snapshot);
        Ok(snapshot)
    }

    fn announce(&self, snapshot: &Snapshot<T>) {
        tracing::trace!(
            target: targets::SNAPSHOT,
            generation = snapshot.generation(),
            "publishing snapshot"
        );
        self.changed.emit(snapshot.clone());
    }
}

impl<T: Default + Send + Sync + 'static> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SnapshotCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotCell")
            .field("current", &*self.current.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_snapshot_identity_not_content() {
        let a = Snapshot::new(String::from("same"));
        let b = Snapshot::new(String::from("same"));
        assert_eq!(*a, *b);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_generations_increase() {
        let a = Snapshot::new(1);
        let b = Snapshot::new(1);
        assert!(b.generation() > a.generation());
        assert!(b.is_newer_than(&a));
        assert!(!a.is_newer_than(&b));
        assert!(!a.is_newer_than(&a.clone()));
    }

    #[test]
    fn test_cell_publish_emits() {
        let cell = SnapshotCell::new(0_i32);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        cell.changed().connect(move |snapshot: &Snapshot<i32>| {
            seen_clone.lock().push(**snapshot);
        });

        cell.publish(1);
        cell.publish(1);

        assert_eq!(*seen.lock(), vec![1, 1]);
        assert_eq!(*cell.current(), 1);
    }

    #[test]
    fn test_cell_update_failure_keeps_current() {
        let cell = SnapshotCell::new(vec![1]);
        let before = cell.current();

        let result: Result<_, &str> = cell.update(|_| Err("nope"));
        assert!(result.is_err());
        assert_eq!(cell.current(), before);

        let after = cell
            .update::<(), _>(|v| {
                v.push(2);
                Ok(())
            })
            .unwrap();
        assert_eq!(*after, vec![1, 2]);
        assert_ne!(after, before);
    }
}
