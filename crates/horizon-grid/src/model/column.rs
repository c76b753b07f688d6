//! Column configuration consumed by the cell renderer.
//!
//! A [`ColumnConfig`] is owned by the table schema and read-only to the
//! renderer. Most of its settings can be fixed or computed per row (see
//! [`Declared`]); computed field and form-item props additionally see the
//! form state, which makes the cells of that column recompose whenever the
//! form changes.
//!
//! # Example
//!
//! ```
//! use horizon_grid::model::{ColumnConfig, ValueEnum, ValueType};
//! use serde_json::{json, Value};
//!
//! let status: ColumnConfig<Value> = ColumnConfig::new()
//!     .with_data_index("status")
//!     .with_title("Status")
//!     .with_value_type(ValueType::Select)
//!     .with_value_enum(ValueEnum::from_iter([
//!         (json!("open"), "Open"),
//!         (json!("closed"), "Closed"),
//!     ]));
//!
//! assert_eq!(status.column_key().as_deref(), Some("status"));
//! assert!(!status.is_reactive());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::declared::Declared;
use super::form::FormStateView;
use super::path::{DataIndex, PathSegment};
use super::value::{SchemaComponent, ValueType};
use crate::cell::{Element, RenderFormItemConfig, RenderFormItemSchema};

/// Free-form props forwarded to the field primitive.
pub type FieldProps = Map<String, Value>;

/// Computes a row's value type from the row and the rendering consumer.
///
/// Returning `None` falls back to [`ValueType::Text`].
pub type ValueTypeFn<R> = dyn Fn(&R, Option<SchemaComponent>) -> Option<ValueType> + Send + Sync;

/// A value type, fixed or computed per row.
pub type ValueTypeDecl<R> = Declared<ValueType, ValueTypeFn<R>>;

/// Computes the enumerated value set from the row, if there is one.
pub type ValueEnumFn<R> = dyn Fn(Option<&R>) -> ValueEnum + Send + Sync;

/// An enumerated value set, fixed or computed per row.
pub type ValueEnumDecl<R> = Declared<ValueEnum, ValueEnumFn<R>>;

/// Computes field props. Read-mode cells pass no form.
pub type FieldPropsFn<R> =
    dyn Fn(Option<&dyn FormStateView>, &PropsContext<R>) -> FieldProps + Send + Sync;

/// Field props, fixed or computed.
pub type FieldPropsDecl<R> = Declared<FieldProps, FieldPropsFn<R>>;

/// Computes form-item props.
pub type FormItemPropsFn<R> =
    dyn Fn(Option<&dyn FormStateView>, &PropsContext<R>) -> FormItemProps + Send + Sync;

/// Form-item props, fixed or computed.
pub type FormItemPropsDecl<R> = Declared<FormItemProps, FormItemPropsFn<R>>;

/// Remote source for enumerated options, called by the field primitive with
/// the column's params.
pub type OptionsRequest = Arc<dyn Fn(&Value) -> ValueEnum + Send + Sync>;

/// A custom edit-mode renderer.
///
/// Receives the column schema, a configuration whose
/// [`default_render`](RenderFormItemConfig::default_render) yields the
/// element the cell would have rendered without it, and the form view.
pub type RenderFormItemFn<R> = dyn Fn(
        &RenderFormItemSchema<R>,
        &RenderFormItemConfig<R>,
        &dyn FormStateView,
    ) -> Element<R>
    + Send
    + Sync;

/// One entry of an enumerated value set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumOption {
    /// The stored value.
    pub value: Value,
    /// The label shown for the value.
    pub text: String,
    /// Optional status badge, such as `"success"` or `"error"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether the option can be picked while editing.
    #[serde(default)]
    pub disabled: bool,
}

impl EnumOption {
    /// Creates an enabled option without status.
    pub fn new(value: impl Into<Value>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            status: None,
            disabled: false,
        }
    }

    /// Sets the status badge.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets whether the option is disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// An ordered set of enumerated values, as used by selects and badges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueEnum(Vec<EnumOption>);

impl ValueEnum {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option.
    pub fn with_option(mut self, option: EnumOption) -> Self {
        self.0.push(option);
        self
    }

    /// The options in declaration order.
    pub fn options(&self) -> &[EnumOption] {
        &self.0
    }

    /// The option stored under `value`.
    pub fn get(&self, value: &Value) -> Option<&EnumOption> {
        self.0.iter().find(|option| &option.value == value)
    }

    /// The label for `value`.
    pub fn text_for(&self, value: &Value) -> Option<&str> {
        self.get(value).map(|option| option.text.as_str())
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V: Into<Value>, T: Into<String>> FromIterator<(V, T)> for ValueEnum {
    fn from_iter<I: IntoIterator<Item = (V, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(value, text)| EnumOption::new(value, text))
                .collect(),
        )
    }
}

/// Props for the validated field wrapper around an editable cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormItemProps {
    /// Initial value used when the cell has no value of its own.
    pub initial_value: Option<Value>,
    /// Substitutions for validation messages; override the defaults.
    pub message_variables: BTreeMap<String, String>,
    /// Everything else (rules, tooltips, ...), forwarded verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormItemProps {
    /// Creates empty form-item props.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial value.
    pub fn with_initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    /// Adds a message variable.
    pub fn with_message_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.message_variables.insert(name.into(), value.into());
        self
    }

    /// Adds an extra prop.
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// What computed field and form-item props are told about the cell.
pub struct PropsContext<R> {
    /// The row key (the record key, or the row index if it has none).
    /// `None` in read mode.
    pub row_key: Option<PathSegment>,
    /// The row index. `None` in read mode.
    pub row_index: Option<usize>,
    /// The column being rendered.
    pub column: Option<Arc<ColumnConfig<R>>>,
    /// The row entity.
    pub entity: Option<Arc<R>>,
    /// `true` when the cell is being edited.
    pub is_editable: bool,
}

impl<R> Clone for PropsContext<R> {
    fn clone(&self) -> Self {
        Self {
            row_key: self.row_key.clone(),
            row_index: self.row_index,
            column: self.column.clone(),
            entity: self.entity.clone(),
            is_editable: self.is_editable,
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for PropsContext<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropsContext")
            .field("row_key", &self.row_key)
            .field("row_index", &self.row_index)
            .field("column", &self.column)
            .field("entity", &self.entity)
            .field("is_editable", &self.is_editable)
            .finish()
    }
}

/// Per-column declarations read by the cell renderer.
pub struct ColumnConfig<R> {
    /// Unique column key.
    pub key: Option<PathSegment>,
    /// Where the column's value lives in the row.
    pub data_index: Option<DataIndex>,
    /// Column title, also used as the `label` message variable.
    pub title: Option<String>,
    /// The column's declared value type.
    pub value_type: Option<ValueTypeDecl<R>>,
    /// Enumerated value set.
    pub value_enum: Option<ValueEnumDecl<R>>,
    /// Remote source for enumerated options.
    pub request: Option<OptionsRequest>,
    /// Params passed to `request`.
    pub params: Option<Value>,
    /// Props for the field primitive.
    pub field_props: Option<FieldPropsDecl<R>>,
    /// Props for the validated field wrapper.
    pub form_item_props: Option<FormItemPropsDecl<R>>,
    /// Custom edit-mode renderer.
    pub render_form_item: Option<Arc<RenderFormItemFn<R>>>,
    /// Initial value for new rows.
    pub initial_value: Option<Value>,
}

impl<R> Default for ColumnConfig<R> {
    fn default() -> Self {
        Self {
            key: None,
            data_index: None,
            title: None,
            value_type: None,
            value_enum: None,
            request: None,
            params: None,
            field_props: None,
            form_item_props: None,
            render_form_item: None,
            initial_value: None,
        }
    }
}

impl<R> ColumnConfig<R> {
    /// Creates an empty column configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column key.
    pub fn with_key(mut self, key: impl Into<PathSegment>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the data index.
    pub fn with_data_index(mut self, data_index: impl Into<DataIndex>) -> Self {
        self.data_index = Some(data_index.into());
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a fixed value type.
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(Declared::Static(value_type));
        self
    }

    /// Sets a value type computed per row.
    pub fn with_value_type_fn<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&R, Option<SchemaComponent>) -> Option<ValueType> + Send + Sync + 'static,
    {
        self.value_type = Some(Declared::Computed(Arc::new(resolve)));
        self
    }

    /// Sets a fixed enumerated value set.
    pub fn with_value_enum(mut self, value_enum: ValueEnum) -> Self {
        self.value_enum = Some(Declared::Static(value_enum));
        self
    }

    /// Sets an enumerated value set computed per row.
    pub fn with_value_enum_fn<F>(mut self, resolve: F) -> Self
    where
        F: Fn(Option<&R>) -> ValueEnum + Send + Sync + 'static,
    {
        self.value_enum = Some(Declared::Computed(Arc::new(resolve)));
        self
    }

    /// Sets the remote options source.
    pub fn with_request<F>(mut self, request: F) -> Self
    where
        F: Fn(&Value) -> ValueEnum + Send + Sync + 'static,
    {
        self.request = Some(Arc::new(request));
        self
    }

    /// Sets the request params.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets fixed field props.
    pub fn with_field_props(mut self, props: FieldProps) -> Self {
        self.field_props = Some(Declared::Static(props));
        self
    }

    /// Sets field props computed from the form and cell context.
    pub fn with_field_props_fn<F>(mut self, resolve: F) -> Self
    where
        F: Fn(Option<&dyn FormStateView>, &PropsContext<R>) -> FieldProps + Send + Sync + 'static,
    {
        self.field_props = Some(Declared::Computed(Arc::new(resolve)));
        self
    }

    /// Sets fixed form-item props.
    pub fn with_form_item_props(mut self, props: FormItemProps) -> Self {
        self.form_item_props = Some(Declared::Static(props));
        self
    }

    /// Sets form-item props computed from the form and cell context.
    pub fn with_form_item_props_fn<F>(mut self, resolve: F) -> Self
    where
        F: Fn(Option<&dyn FormStateView>, &PropsContext<R>) -> FormItemProps
            + Send
            + Sync
            + 'static,
    {
        self.form_item_props = Some(Declared::Computed(Arc::new(resolve)));
        self
    }

    /// Sets a custom edit-mode renderer.
    pub fn with_render_form_item<F>(mut self, render: F) -> Self
    where
        F: Fn(&RenderFormItemSchema<R>, &RenderFormItemConfig<R>, &dyn FormStateView) -> Element<R>
            + Send
            + Sync
            + 'static,
    {
        self.render_form_item = Some(Arc::new(render));
        self
    }

    /// Sets the initial value.
    pub fn with_initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    /// The key used to register the column's field: the key if it is
    /// non-empty, otherwise the data index as a string.
    pub fn column_key(&self) -> Option<String> {
        match &self.key {
            Some(key) if key.is_truthy() => Some(key.to_key()),
            _ => self.data_index.as_ref().map(ToString::to_string),
        }
    }

    /// Returns `true` if an enumerated value set is declared.
    pub fn has_value_enum(&self) -> bool {
        self.value_enum.is_some()
    }

    /// Returns `true` if editing this column depends on changing form state:
    /// it has a custom renderer, or computed field or form-item props.
    pub fn is_reactive(&self) -> bool {
        self.render_form_item.is_some()
            || self.field_props.as_ref().is_some_and(Declared::is_computed)
            || self.form_item_props.as_ref().is_some_and(Declared::is_computed)
    }
}

impl<R> fmt::Debug for ColumnConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfig")
            .field("key", &self.key)
            .field("data_index", &self.data_index)
            .field("title", &self.title)
            .field("value_type", &self.value_type)
            .field("value_enum", &self.value_enum)
            .field("request", &self.request.as_ref().map(|_| ".."))
            .field("params", &self.params)
            .field("field_props", &self.field_props)
            .field("form_item_props", &self.form_item_props)
            .field("render_form_item", &self.render_form_item.as_ref().map(|_| ".."))
            .field("initial_value", &self.initial_value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_key_prefers_truthy_key() {
        let column: ColumnConfig<Value> = ColumnConfig::new().with_key("k").with_data_index("d");
        assert_eq!(column.column_key().as_deref(), Some("k"));

        let column: ColumnConfig<Value> = ColumnConfig::new().with_key("").with_data_index("d");
        assert_eq!(column.column_key().as_deref(), Some("d"));

        let column: ColumnConfig<Value> =
            ColumnConfig::new().with_data_index(DataIndex::path(["a", "b"]));
        assert_eq!(column.column_key().as_deref(), Some("a,b"));

        assert_eq!(ColumnConfig::<Value>::new().column_key(), None);
    }

    #[test]
    fn test_is_reactive() {
        let column: ColumnConfig<Value> = ColumnConfig::new().with_field_props(FieldProps::new());
        assert!(!column.is_reactive());

        let column: ColumnConfig<Value> =
            ColumnConfig::new().with_field_props_fn(|_, _| FieldProps::new());
        assert!(column.is_reactive());

        let column: ColumnConfig<Value> =
            ColumnConfig::new().with_form_item_props_fn(|_, _| FormItemProps::new());
        assert!(column.is_reactive());

        let column: ColumnConfig<Value> = ColumnConfig::new()
            .with_render_form_item(|_, config, _| config.default_render.render());
        assert!(column.is_reactive());
    }

    #[test]
    fn test_value_enum_lookup() {
        let value_enum = ValueEnum::new()
            .with_option(EnumOption::new("open", "Open").with_status("processing"))
            .with_option(EnumOption::new(1, "One").with_disabled(true));

        assert_eq!(value_enum.text_for(&json!("open")), Some("Open"));
        assert_eq!(value_enum.get(&json!(1)).map(|o| o.disabled), Some(true));
        assert_eq!(value_enum.text_for(&json!("missing")), None);
        assert_eq!(value_enum.len(), 2);
    }

    #[test]
    fn test_form_item_props_serde() {
        let props: FormItemProps = serde_json::from_value(json!({
            "initialValue": 5,
            "messageVariables": { "label": "Age" },
            "rules": [{ "required": true }]
        }))
        .unwrap();

        assert_eq!(props.initial_value, Some(json!(5)));
        assert_eq!(props.message_variables.get("label").map(String::as_str), Some("Age"));
        assert_eq!(props.extra.get("rules"), Some(&json!([{ "required": true }])));
    }
}
