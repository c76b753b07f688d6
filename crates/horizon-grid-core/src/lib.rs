//! Core systems for Horizon Grid.
//!
//! This crate provides the foundational components the grid's cell
//! renderers are built on:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Snapshots**: Identity-compared views of shared state, published
//!   copy-on-write through a [`SnapshotCell`]
//! - **Logging**: `tracing` targets and span names
//!
//! # Snapshot Example
//!
//! ```
//! use horizon_grid_core::{Snapshot, SnapshotCell};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let cell = SnapshotCell::new(String::from("draft"));
//! let updates = Arc::new(AtomicUsize::new(0));
//!
//! let updates_clone = updates.clone();
//! cell.changed().connect(move |_snapshot: &Snapshot<String>| {
//!     updates_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! cell.publish(String::from("final"));
//! assert_eq!(updates.load(Ordering::SeqCst), 1);
//! assert_eq!(cell.current().as_str(), "final");
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod snapshot;

pub use error::SignalError;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use snapshot::{Snapshot, SnapshotCell};
