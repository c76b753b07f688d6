//! Cells that recompose when the form changes.
//!
//! When an editable column computes its props from the form state, or hands
//! rendering to a custom renderer, its cell must be rebuilt whenever the
//! form changes. A [`ReactiveCell`] holds the composition function together
//! with the last output and the [`FormSnapshot`] it was composed against.
//!
//! Recomposition is keyed on snapshot *identity*: a write that stores equal
//! content still publishes a new snapshot, and the cell recomposes. Deep
//! comparisons are never made. A snapshot older than the one the cell was
//! last composed against is ignored; this happens when a slot writes to the
//! form while an earlier emission is still being delivered.
//!
//! A cell can be driven in two ways:
//!
//! - [`ReactiveCell::subscribe`] connects it to a form's
//!   `snapshot_changed` signal; the returned guard keeps it connected.
//! - [`ReactiveCell::update`] polls a form view and recomposes if needed.

use std::fmt;
use std::sync::Arc;

use horizon_grid_core::logging::targets;
use horizon_grid_core::{ConnectionGuard, Signal};
use parking_lot::Mutex;

use super::element::Element;
use crate::model::{FormSnapshot, FormStateView};

/// Builds a cell's element from the form state.
pub type ComposeFn<R> = dyn Fn(&dyn FormStateView) -> Element<R> + Send + Sync;

struct GateState<R> {
    snapshot: FormSnapshot,
    output: Element<R>,
    compositions: u64,
}

/// A cell that recomposes whenever the form snapshot it observes changes.
///
/// Clones share state: updating one clone updates them all.
pub struct ReactiveCell<R> {
    compose: Arc<ComposeFn<R>>,
    state: Arc<Mutex<GateState<R>>>,
}

impl<R> ReactiveCell<R> {
    /// Returns `true` if a cell composed against `previous` must recompose
    /// for `next`: `next` is a later publication.
    #[inline]
    pub fn should_update(previous: &FormSnapshot, next: &FormSnapshot) -> bool {
        next.is_newer_than(previous)
    }

    /// The latest output.
    pub fn output(&self) -> Element<R> {
        self.state.lock().output.clone()
    }

    /// The snapshot the latest output was composed against.
    pub fn snapshot(&self) -> FormSnapshot {
        self.state.lock().snapshot.clone()
    }

    /// How many times the cell has been composed, including the first time.
    pub fn compositions(&self) -> u64 {
        self.state.lock().compositions
    }
}

impl<R: Send + Sync + 'static> ReactiveCell<R> {
    /// Compose the cell against `form` and remember the snapshot.
    pub fn new(compose: Arc<ComposeFn<R>>, form: &dyn FormStateView) -> Self {
        let snapshot = form.snapshot();
        let output = compose(form);
        Self {
            compose,
            state: Arc::new(Mutex::new(GateState {
                snapshot,
                output,
                compositions: 1,
            })),
        }
    }

    /// Recompose if the form's snapshot is newer than the one last seen.
    ///
    /// Returns `true` if the cell was recomposed. If a newer composition was
    /// stored while this one ran, the stale output is dropped.
    pub fn update(&self, form: &dyn FormStateView) -> bool {
        let next = form.snapshot();
        if !Self::should_update(&self.state.lock().snapshot, &next) {
            return false;
        }

        // Composition runs user callbacks; keep the lock released.
        let output = (self.compose)(form);

        let mut state = self.state.lock();
        if !Self::should_update(&state.snapshot, &next) {
            return false;
        }
        state.snapshot = next;
        state.output = output;
        state.compositions += 1;
        tracing::trace!(
            target: targets::CELL,
            generation = state.snapshot.generation(),
            compositions = state.compositions,
            "recomposed reactive cell"
        );
        true
    }

    /// Recompose on every snapshot published on `changed`.
    ///
    /// The cell stays connected until the returned guard is dropped.
    pub fn subscribe(&self, changed: &Arc<Signal<FormSnapshot>>) -> ConnectionGuard<FormSnapshot> {
        let cell = self.clone();
        changed.connect_scoped(move |snapshot: &FormSnapshot| {
            cell.update(snapshot);
        })
    }
}

impl<R> Clone for ReactiveCell<R> {
    fn clone(&self) -> Self {
        Self {
            compose: Arc::clone(&self.compose),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R> fmt::Debug for ReactiveCell<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ReactiveCell")
            .field("generation", &state.snapshot.generation())
            .field("compositions", &state.compositions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldPath, FormDocument};
    use serde_json::{Value, json};

    fn name_label() -> Arc<ComposeFn<()>> {
        Arc::new(|form: &dyn FormStateView| {
            match form.get_field_value(&FieldPath::from(["name"])) {
                Some(Value::String(name)) => Element::Label(name),
                _ => Element::Empty,
            }
        })
    }

    #[test]
    fn test_composes_immediately() {
        let form = FormDocument::from_value(json!({ "name": "Ada" }));
        let cell = ReactiveCell::new(name_label(), &form);
        assert_eq!(cell.compositions(), 1);
        assert_eq!(cell.output().display_text().as_deref(), Some("Ada"));
        assert_eq!(cell.snapshot(), form.snapshot());
    }

    #[test]
    fn test_update_skips_same_snapshot() {
        let form = FormDocument::new();
        let cell = ReactiveCell::new(name_label(), &form);
        assert!(!cell.update(&form));
        assert_eq!(cell.compositions(), 1);
    }

    #[test]
    fn test_update_recomposes_on_identical_content() {
        let form = FormDocument::from_value(json!({ "name": "Ada" }));
        let cell = ReactiveCell::new(name_label(), &form);

        form.set_field_value(&FieldPath::from(["name"]), json!("Ada")).unwrap();
        assert!(cell.update(&form));
        assert_eq!(cell.compositions(), 2);
    }

    #[test]
    fn test_subscribe_follows_signal() {
        let form = FormDocument::new();
        let cell = ReactiveCell::new(name_label(), &form);
        let guard = cell.subscribe(form.snapshot_changed());

        form.set_field_value(&FieldPath::from(["name"]), json!("Grace")).unwrap();
        assert_eq!(cell.output().display_text().as_deref(), Some("Grace"));
        assert_eq!(cell.compositions(), 2);

        drop(guard);
        assert_eq!(form.snapshot_changed().connection_count(), 0);
        form.set_field_value(&FieldPath::from(["name"]), json!("Linus")).unwrap();
        assert_eq!(cell.compositions(), 2);
    }

    #[test]
    fn test_update_ignores_older_snapshot() {
        let form = FormDocument::from_value(json!({ "name": "Ada" }));
        let older = form.snapshot();
        form.set_field_value(&FieldPath::from(["name"]), json!("Grace")).unwrap();

        let cell = ReactiveCell::new(name_label(), &form);
        assert!(!cell.update(&older));
        assert_eq!(cell.compositions(), 1);
        assert_eq!(cell.output().display_text().as_deref(), Some("Grace"));
    }

    #[test]
    fn test_write_during_emit_leaves_cell_on_latest_snapshot() {
        let form = Arc::new(FormDocument::from_value(json!({ "name": "Ada" })));

        // Connected before the cell: rewrites every "a" to "b".
        let weak = Arc::downgrade(&form);
        form.snapshot_changed().connect(move |snapshot: &FormSnapshot| {
            let name = snapshot.get_field_value(&FieldPath::from(["name"]));
            if let (Some(form), Some(Value::String(name))) = (weak.upgrade(), name) {
                if name == "a" {
                    form.set_field_value(&FieldPath::from(["name"]), json!("b")).unwrap();
                }
            }
        });

        let cell = ReactiveCell::new(name_label(), &*form);
        let _guard = cell.subscribe(form.snapshot_changed());

        form.set_field_value(&FieldPath::from(["name"]), json!("a")).unwrap();
        assert_eq!(cell.snapshot(), form.snapshot());
        assert_eq!(cell.output().display_text().as_deref(), Some("b"));
        assert_eq!(cell.compositions(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let form = FormDocument::new();
        let cell = ReactiveCell::new(name_label(), &form);
        let clone = cell.clone();

        form.set_field_value(&FieldPath::from(["name"]), json!("Ken")).unwrap();
        clone.update(&form);
        assert_eq!(cell.compositions(), 2);
    }
}
