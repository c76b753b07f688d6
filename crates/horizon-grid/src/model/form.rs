//! Form state shared by a table's editable rows.
//!
//! The editable-row controller owns a [`FormDocument`]: one JSON document
//! holding the in-progress values of every row being edited, keyed by
//! [`FieldPath`]. Cell renderers only ever see it through the read-only
//! [`FormStateView`] capability; they read values and hand out field paths,
//! and the field primitives bound to those paths perform the writes.
//!
//! Every write publishes a new [`FormSnapshot`]. Snapshots compare by
//! identity, so views that depend on the form can tell "the form changed"
//! apart from "the form holds equal content" without deep comparisons.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use horizon_grid_core::logging::targets;
use horizon_grid_core::{Signal, Snapshot, SnapshotCell};
use serde_json::{Map, Value};

use super::path::FieldPath;
use crate::error::{GridError, Result};

/// An immutable, identity-compared view of a form document.
pub type FormSnapshot = Snapshot<Value>;

/// Read-only access to form state.
///
/// This is the only form capability the cell renderer receives.
pub trait FormStateView: Send + Sync {
    /// Read the value at `path`, or `None` if nothing is stored there.
    fn get_field_value(&self, path: &FieldPath) -> Option<Value>;

    /// The current snapshot of the whole document.
    fn snapshot(&self) -> FormSnapshot;
}

impl FormStateView for FormSnapshot {
    fn get_field_value(&self, path: &FieldPath) -> Option<Value> {
        lookup(self.value(), path).cloned()
    }

    fn snapshot(&self) -> FormSnapshot {
        self.clone()
    }
}

/// Walk `path` through objects (by key) and arrays (by numeric index).
pub fn lookup<'a>(document: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.iter().try_fold(document, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// The mutable form document behind an editable table.
///
/// # Example
///
/// ```
/// use horizon_grid::model::{FieldPath, FormDocument, FormStateView};
/// use serde_json::json;
///
/// let form = FormDocument::new();
/// form.set_field_value(&FieldPath::from(["row-1", "name"]), json!("Ada")).unwrap();
///
/// assert_eq!(
///     form.get_field_value(&FieldPath::from(["row-1"])),
///     Some(json!({ "name": "Ada" }))
/// );
/// ```
pub struct FormDocument {
    cell: SnapshotCell<Value>,
}

impl Default for FormDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDocument {
    /// Create an empty form document.
    pub fn new() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }

    /// Create a form document with initial content.
    pub fn from_value(document: Value) -> Self {
        Self {
            cell: SnapshotCell::new(document),
        }
    }

    /// Signal emitted with the new snapshot after every write.
    pub fn snapshot_changed(&self) -> &Arc<Signal<FormSnapshot>> {
        self.cell.changed()
    }

    /// Write `value` at `path`, creating intermediate objects as needed.
    ///
    /// Numeric segments index into existing arrays, growing them with `null`
    /// if necessary. Descending into a scalar is an error and leaves the
    /// document untouched.
    pub fn set_field_value(&self, path: &FieldPath, value: Value) -> Result<FormSnapshot> {
        tracing::debug!(target: targets::FORM, %path, "setting field value");
        self.cell.update(|document| write_path(document, path, value))
    }

    /// Deep-merge `values` into the document.
    ///
    /// Objects merge key by key; any other value replaces what was there.
    pub fn set_fields_value(&self, values: Value) -> FormSnapshot {
        tracing::debug!(target: targets::FORM, "merging field values");
        match self.cell.update::<Infallible, _>(|document| {
            merge(document, values);
            Ok(())
        }) {
            Ok(snapshot) => snapshot,
            Err(never) => match never {},
        }
    }

    /// Replace the whole document.
    pub fn reset_fields(&self, document: Value) -> FormSnapshot {
        tracing::debug!(target: targets::FORM, "resetting form document");
        self.cell.publish(document)
    }

    /// A read-only view of this document for cell renderers.
    pub fn view(self: &Arc<Self>) -> Arc<dyn FormStateView> {
        Arc::clone(self) as Arc<dyn FormStateView>
    }
}

impl FormStateView for FormDocument {
    fn get_field_value(&self, path: &FieldPath) -> Option<Value> {
        lookup(self.cell.current().value(), path).cloned()
    }

    fn snapshot(&self) -> FormSnapshot {
        self.cell.current()
    }
}

impl fmt::Debug for FormDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDocument")
            .field("snapshot", &self.cell.current())
            .finish()
    }
}

fn write_path(document: &mut Value, path: &FieldPath, value: Value) -> Result<()> {
    let (last, parents) = path.split_last().ok_or(GridError::EmptyPath)?;

    let mut current = document;
    for segment in parents {
        current = child_mut(current, path, segment)?;
    }
    *child_mut(current, path, last)? = value;
    Ok(())
}

/// The slot for `segment` inside `container`, created if missing.
fn child_mut<'a>(
    container: &'a mut Value,
    path: &FieldPath,
    segment: &str,
) -> Result<&'a mut Value> {
    if container.is_null() {
        *container = Value::Object(Map::new());
    }
    match container {
        Value::Object(map) => Ok(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = segment
                .parse::<usize>()
                .map_err(|_| GridError::path_conflict(path.to_string(), segment))?;
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            Ok(&mut items[index])
        }
        _ => Err(GridError::path_conflict(path.to_string(), segment)),
    }
}

fn merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                merge(target_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, source) => *target = source,
    }
}
