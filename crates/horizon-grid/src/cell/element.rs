//! Element descriptions produced by the cell renderer.
//!
//! The renderer does not paint anything. It returns an [`Element`] tree that
//! tells the view layer what to show: raw text, a placeholder, the field
//! primitive with its props, or the validated wrapper around it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::reactive::ReactiveCell;
use crate::model::{
    EmptyText, FieldPath, FieldProps, FormItemProps, OptionsRequest, PathSegment, RenderMode,
    ValueEnum, ValueType, is_empty_cell_value,
};

/// How the validated wrapper shows validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// In a popover anchored to the field, keeping row height stable.
    #[default]
    Popover,
    /// Below the field.
    Inline,
}

/// The output of rendering one cell.
pub enum Element<R> {
    /// Nothing.
    Empty,
    /// The raw cell value, displayed as is.
    Text(Value),
    /// The empty-text placeholder.
    Placeholder(EmptyText),
    /// A plain label, typically produced by custom renderers.
    Label(String),
    /// The field primitive.
    Field(FieldElement<R>),
    /// The validated wrapper around an editable element.
    FormItem(FormItemElement<R>),
    /// An element recomposed whenever the form changes.
    Reactive(ReactiveCell<R>),
}

impl<R> Element<R> {
    /// Returns `true` for [`Element::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Element::Empty)
    }

    /// The field element, if this is one.
    pub fn as_field(&self) -> Option<&FieldElement<R>> {
        match self {
            Element::Field(field) => Some(field),
            _ => None,
        }
    }

    /// The wrapper element, if this is one.
    pub fn as_form_item(&self) -> Option<&FormItemElement<R>> {
        match self {
            Element::FormItem(item) => Some(item),
            _ => None,
        }
    }

    /// The reactive cell, if this is one.
    pub fn as_reactive(&self) -> Option<&ReactiveCell<R>> {
        match self {
            Element::Reactive(cell) => Some(cell),
            _ => None,
        }
    }

    /// The element as it currently appears: reactive cells are replaced by
    /// their latest output.
    pub fn current(&self) -> Element<R> {
        match self {
            Element::Reactive(cell) => cell.output().current(),
            other => other.clone(),
        }
    }

    /// The text a read-only display of this element would show.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Element::Empty => None,
            Element::Text(value) => Some(value_text(value)),
            Element::Placeholder(empty_text) => empty_text.render(),
            Element::Label(label) => Some(label.clone()),
            Element::Field(field) => field.display_text(),
            Element::FormItem(item) => item.child.display_text(),
            Element::Reactive(cell) => cell.output().display_text(),
        }
    }
}

impl<R> Clone for Element<R> {
    fn clone(&self) -> Self {
        match self {
            Element::Empty => Element::Empty,
            Element::Text(value) => Element::Text(value.clone()),
            Element::Placeholder(empty_text) => Element::Placeholder(empty_text.clone()),
            Element::Label(label) => Element::Label(label.clone()),
            Element::Field(field) => Element::Field(field.clone()),
            Element::FormItem(item) => Element::FormItem(item.clone()),
            Element::Reactive(cell) => Element::Reactive(cell.clone()),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Element<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Empty => f.write_str("Empty"),
            Element::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Element::Placeholder(empty_text) => {
                f.debug_tuple("Placeholder").field(empty_text).finish()
            }
            Element::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Element::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Element::FormItem(item) => f.debug_tuple("FormItem").field(item).finish(),
            Element::Reactive(cell) => f.debug_tuple("Reactive").field(cell).finish(),
        }
    }
}

/// The property bag handed to the field primitive, shared by read and edit
/// cells.
pub struct FieldWiring<R> {
    /// The resolved enumerated value set.
    pub value_enum: Option<ValueEnum>,
    /// Remote options source.
    pub request: Option<OptionsRequest>,
    /// Params for `request`.
    pub params: Option<Value>,
    /// The value to display: the cell value, or the row index for index tags.
    pub text: Option<Value>,
    /// Read or edit.
    pub mode: RenderMode,
    /// The resolved value type. `None` when absent or unresolved.
    pub value_type: Option<ValueType>,
    /// The row entity.
    pub record: Option<Arc<R>>,
    /// Placeholder for empty values.
    pub empty_text: Option<EmptyText>,
    /// Registration key, prefix plus column key.
    pub field_key: Option<String>,
}

impl<R> Clone for FieldWiring<R> {
    fn clone(&self) -> Self {
        Self {
            value_enum: self.value_enum.clone(),
            request: self.request.clone(),
            params: self.params.clone(),
            text: self.text.clone(),
            mode: self.mode,
            value_type: self.value_type.clone(),
            record: self.record.clone(),
            empty_text: self.empty_text.clone(),
            field_key: self.field_key.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for FieldWiring<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldWiring")
            .field("value_enum", &self.value_enum)
            .field("request", &self.request.as_ref().map(|_| ".."))
            .field("params", &self.params)
            .field("text", &self.text)
            .field("mode", &self.mode)
            .field("value_type", &self.value_type)
            .field("record", &self.record)
            .field("empty_text", &self.empty_text)
            .field("field_key", &self.field_key)
            .finish()
    }
}

/// The field primitive.
pub struct FieldElement<R> {
    /// Sibling key, the row key in edit mode.
    pub key: Option<PathSegment>,
    /// The form path the field is bound to. `None` in read mode.
    pub name: Option<FieldPath>,
    /// Set when an outer wrapper (or none at all) handles form binding.
    pub ignore_form_item: bool,
    /// Resolved field props.
    pub field_props: FieldProps,
    /// Shared wiring.
    pub wiring: FieldWiring<R>,
}

impl<R> FieldElement<R> {
    /// Read or edit.
    pub fn mode(&self) -> RenderMode {
        self.wiring.mode
    }

    /// What a read-only field would show: the enum label for the value if
    /// there is one, the value itself, or the placeholder when it is empty.
    pub fn display_text(&self) -> Option<String> {
        let text = self.wiring.text.as_ref();
        if is_empty_cell_value(text) {
            return self.wiring.empty_text.as_ref().and_then(EmptyText::render);
        }
        let value = text?;
        let label = self
            .wiring
            .value_enum
            .as_ref()
            .and_then(|value_enum| value_enum.text_for(value));
        Some(label.map_or_else(|| value_text(value), str::to_string))
    }
}

impl<R> Clone for FieldElement<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            name: self.name.clone(),
            ignore_form_item: self.ignore_form_item,
            field_props: self.field_props.clone(),
            wiring: self.wiring.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for FieldElement<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldElement")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("ignore_form_item", &self.ignore_form_item)
            .field("field_props", &self.field_props)
            .field("wiring", &self.wiring)
            .finish()
    }
}

/// The validated, error-displaying wrapper around an editable cell.
pub struct FormItemElement<R> {
    /// Sibling key, the row key.
    pub key: PathSegment,
    /// The form path validated by this wrapper.
    pub name: FieldPath,
    /// How errors are shown.
    pub error_type: ErrorType,
    /// Resolved form-item props.
    pub props: FormItemProps,
    /// Substitutions for validation messages.
    pub message_variables: BTreeMap<String, String>,
    /// Value the field starts with.
    pub initial_value: Option<Value>,
    /// The wrapped element.
    pub child: Box<Element<R>>,
}

impl<R> Clone for FormItemElement<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            name: self.name.clone(),
            error_type: self.error_type,
            props: self.props.clone(),
            message_variables: self.message_variables.clone(),
            initial_value: self.initial_value.clone(),
            child: self.child.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for FormItemElement<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormItemElement")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("error_type", &self.error_type)
            .field("props", &self.props)
            .field("message_variables", &self.message_variables)
            .field("initial_value", &self.initial_value)
            .field("child", &self.child)
            .finish()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(text: Option<Value>) -> FieldElement<()> {
        FieldElement {
            key: None,
            name: None,
            ignore_form_item: true,
            field_props: FieldProps::new(),
            wiring: FieldWiring {
                value_enum: None,
                request: None,
                params: None,
                text,
                mode: RenderMode::Read,
                value_type: None,
                record: None,
                empty_text: Some(EmptyText::from("-")),
                field_key: None,
            },
        }
    }

    #[test]
    fn test_display_text_of_simple_elements() {
        assert_eq!(Element::<()>::Empty.display_text(), None);
        assert_eq!(Element::<()>::Text(json!("abc")).display_text().as_deref(), Some("abc"));
        assert_eq!(Element::<()>::Text(json!(0)).display_text().as_deref(), Some("0"));
        assert_eq!(
            Element::<()>::Placeholder(EmptyText::Hidden).display_text(),
            None
        );
    }

    #[test]
    fn test_field_display_text_uses_value_enum() {
        let mut element = field(Some(json!("open")));
        assert_eq!(element.display_text().as_deref(), Some("open"));

        element.wiring.value_enum = Some(ValueEnum::from_iter([(json!("open"), "Open")]));
        assert_eq!(element.display_text().as_deref(), Some("Open"));

        let empty = field(Some(json!("")));
        assert_eq!(empty.display_text().as_deref(), Some("-"));
    }

    #[test]
    fn test_form_item_displays_child() {
        let item = FormItemElement {
            key: PathSegment::from(1),
            name: FieldPath::from(["1", "name"]),
            error_type: ErrorType::Popover,
            props: FormItemProps::new(),
            message_variables: BTreeMap::new(),
            initial_value: None,
            child: Box::new(Element::Field(field(Some(json!(42))))),
        };
        let element = Element::FormItem(item);
        assert_eq!(element.display_text().as_deref(), Some("42"));
        assert!(element.as_form_item().is_some());
        assert!(element.as_field().is_none());
    }

    #[test]
    fn test_error_type_serde() {
        assert_eq!(serde_json::to_value(ErrorType::Popover).unwrap(), json!("popover"));
    }
}
