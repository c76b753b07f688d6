//! The input to one cell render.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::model::{
    ColumnConfig, Declared, EmptyText, FormStateView, PathSegment, RenderMode, SchemaComponent,
    ValueType, ValueTypeDecl,
};

/// Everything the renderer needs to know about one cell.
///
/// A request is immutable once handed to the renderer. Resolving a computed
/// value type produces a new request rather than changing this one.
///
/// # Example
///
/// ```
/// use horizon_grid::cell::CellRenderRequest;
/// use horizon_grid::model::{RenderMode, ValueType};
/// use serde_json::{Value, json};
///
/// let request: CellRenderRequest<Value> = CellRenderRequest::new(json!("Ada"), 3)
///     .with_value_type(ValueType::Text)
///     .with_record_key("user-7")
///     .with_mode(RenderMode::Read);
///
/// assert_eq!(request.row_index, 3);
/// ```
pub struct CellRenderRequest<R> {
    /// The cell value. `None` if absent.
    pub text: Option<Value>,
    /// The declared value type.
    pub value_type: Option<ValueTypeDecl<R>>,
    /// Position of the row.
    pub row_index: usize,
    /// The row entity.
    pub row_data: Option<Arc<R>>,
    /// Placeholder for empty values.
    pub empty_text: Option<EmptyText>,
    /// The column the cell belongs to.
    pub column: Option<Arc<ColumnConfig<R>>>,
    /// Which consumer is rendering.
    pub context: Option<SchemaComponent>,
    /// Stable identifier of the row.
    pub record_key: Option<PathSegment>,
    /// Read or edit.
    pub mode: RenderMode,
    /// Prefix namespacing the table's values inside a larger form.
    pub prefix_name: Option<PathSegment>,
    /// The form state editable cells bind to.
    pub form: Option<Arc<dyn FormStateView>>,
}

impl<R> CellRenderRequest<R> {
    /// Create a read-mode request for `text` in row `row_index`.
    pub fn new(text: impl Into<Value>, row_index: usize) -> Self {
        Self::with_text(Some(text.into()), row_index)
    }

    /// Create a read-mode request whose value may be absent.
    pub fn with_text(text: Option<Value>, row_index: usize) -> Self {
        Self {
            text,
            value_type: None,
            row_index,
            row_data: None,
            empty_text: None,
            column: None,
            context: None,
            record_key: None,
            mode: RenderMode::Read,
            prefix_name: None,
            form: None,
        }
    }

    /// Set a fixed value type.
    pub fn with_value_type(self, value_type: ValueType) -> Self {
        self.with_value_type_decl(Some(Declared::Static(value_type)))
    }

    /// Set a value type computed from the row.
    pub fn with_value_type_fn<F>(self, resolve: F) -> Self
    where
        F: Fn(&R, Option<SchemaComponent>) -> Option<ValueType> + Send + Sync + 'static,
    {
        self.with_value_type_decl(Some(Declared::Computed(Arc::new(resolve))))
    }

    /// Replace the value type declaration.
    pub fn with_value_type_decl(mut self, value_type: Option<ValueTypeDecl<R>>) -> Self {
        self.value_type = value_type;
        self
    }

    /// Set the row entity.
    pub fn with_row_data(mut self, row: impl Into<Arc<R>>) -> Self {
        self.row_data = Some(row.into());
        self
    }

    /// Set the empty-text placeholder.
    pub fn with_empty_text(mut self, empty_text: impl Into<EmptyText>) -> Self {
        self.empty_text = Some(empty_text.into());
        self
    }

    /// Set the column.
    pub fn with_column(mut self, column: impl Into<Arc<ColumnConfig<R>>>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the rendering consumer.
    pub fn with_context(mut self, context: SchemaComponent) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the row's stable key.
    pub fn with_record_key(mut self, key: impl Into<PathSegment>) -> Self {
        self.record_key = Some(key.into());
        self
    }

    /// Set read or edit mode.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the form path prefix.
    pub fn with_prefix_name(mut self, prefix: impl Into<PathSegment>) -> Self {
        self.prefix_name = Some(prefix.into());
        self
    }

    /// Set the form state.
    pub fn with_form(mut self, form: Arc<dyn FormStateView>) -> Self {
        self.form = Some(form);
        self
    }

    /// The row discriminator used in form paths: the record key if it is
    /// non-empty, otherwise the row index.
    pub fn row_key(&self) -> PathSegment {
        match &self.record_key {
            Some(key) if key.is_truthy() => key.clone(),
            _ => PathSegment::from(self.row_index),
        }
    }

    /// Returns `true` if a non-empty prefix is set.
    pub fn has_prefix(&self) -> bool {
        self.prefix_name.as_ref().is_some_and(PathSegment::is_truthy)
    }
}

impl<R> Clone for CellRenderRequest<R> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            value_type: self.value_type.clone(),
            row_index: self.row_index,
            row_data: self.row_data.clone(),
            empty_text: self.empty_text.clone(),
            column: self.column.clone(),
            context: self.context,
            record_key: self.record_key.clone(),
            mode: self.mode,
            prefix_name: self.prefix_name.clone(),
            form: self.form.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for CellRenderRequest<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRenderRequest")
            .field("text", &self.text)
            .field("value_type", &self.value_type)
            .field("row_index", &self.row_index)
            .field("row_data", &self.row_data)
            .field("empty_text", &self.empty_text)
            .field("column", &self.column)
            .field("context", &self.context)
            .field("record_key", &self.record_key)
            .field("mode", &self.mode)
            .field("prefix_name", &self.prefix_name)
            .field("form", &self.form.as_ref().map(|form| form.snapshot().generation()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_key_prefers_truthy_record_key() {
        let request: CellRenderRequest<Value> = CellRenderRequest::new(json!(1), 4);
        assert_eq!(request.row_key(), PathSegment::from(4));

        let request = request.with_record_key("");
        assert_eq!(request.row_key(), PathSegment::from(4));

        let request = request.with_record_key(0);
        assert_eq!(request.row_key(), PathSegment::from(4));

        let request = request.with_record_key("r-9");
        assert_eq!(request.row_key(), PathSegment::from("r-9"));
    }

    #[test]
    fn test_has_prefix() {
        let request: CellRenderRequest<Value> = CellRenderRequest::new(json!(1), 0);
        assert!(!request.has_prefix());
        assert!(!request.clone().with_prefix_name("").has_prefix());
        assert!(request.with_prefix_name("users").has_prefix());
    }

    #[test]
    fn test_clone_keeps_computed_declaration() {
        let request: CellRenderRequest<Value> =
            CellRenderRequest::new(json!("x"), 0).with_value_type_fn(|_, _| None);
        let copy = request.clone();
        assert!(copy.value_type.as_ref().is_some_and(Declared::is_computed));
    }
}
