//! Edit-mode composition.
//!
//! An editable cell becomes a [`FormItemElement`] wrapping the field
//! primitive, addressed at a path unique to the row and column:
//!
//! ```text
//! [prefix?, row discriminator, column discriminator]
//! ```
//!
//! With a prefix the row discriminator is always the row index; without one
//! it is the record key, falling back to the row index. The column
//! discriminator is the column key, then its data index, then the row index.
//!
//! Columns with a custom renderer hand the inner element to it. The renderer
//! can still ask for the default element through
//! [`RenderFormItemConfig::default_render`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use horizon_grid_core::logging::{span_names, targets};
use serde_json::Value;

use super::element::{Element, FieldElement, FieldWiring, FormItemElement};
use super::request::CellRenderRequest;
use super::wiring::resolve_field_props;
use crate::model::{
    ColumnConfig, FieldPath, FormItemProps, FormStateView, PathPart, PathSegment,
    PropsContext, SchemaComponent, build_path, is_nullish,
};
use crate::settings::RenderSettings;

/// Describes the column to a custom renderer.
pub struct RenderFormItemSchema<R> {
    /// The column being rendered.
    pub column: Arc<ColumnConfig<R>>,
    /// The row index.
    pub index: usize,
    /// Always `true`: custom renderers only run for editable cells.
    pub is_editable: bool,
    /// The consumer, [`SchemaComponent::Table`].
    pub context: SchemaComponent,
}

/// Tells a custom renderer about the cell it renders.
pub struct RenderFormItemConfig<R> {
    /// Produces the element the cell would have had without the custom
    /// renderer.
    pub default_render: DefaultRender<R>,
    /// The consumer, [`SchemaComponent::Form`].
    pub context: SchemaComponent,
    /// The row's record key, as given.
    pub record_key: Option<PathSegment>,
    /// The row's current values in the form.
    pub record: Option<Value>,
    /// Always `true`.
    pub is_editable: bool,
}

/// The default element of a cell with a custom renderer.
pub struct DefaultRender<R> {
    element: FormItemElement<R>,
}

impl<R> DefaultRender<R> {
    /// The wrapped field primitive, exactly as rendered without a custom
    /// renderer.
    pub fn render(&self) -> Element<R> {
        Element::FormItem(self.element.clone())
    }
}

impl<R> Clone for DefaultRender<R> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for DefaultRender<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DefaultRender").field(&self.element).finish()
    }
}

impl<R: fmt::Debug> fmt::Debug for RenderFormItemSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderFormItemSchema")
            .field("column", &self.column)
            .field("index", &self.index)
            .field("is_editable", &self.is_editable)
            .field("context", &self.context)
            .finish()
    }
}

impl<R: fmt::Debug> fmt::Debug for RenderFormItemConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderFormItemConfig")
            .field("default_render", &self.default_render)
            .field("context", &self.context)
            .field("record_key", &self.record_key)
            .field("record", &self.record)
            .field("is_editable", &self.is_editable)
            .finish()
    }
}

/// Builds the element of one editable cell from the form state.
///
/// Owns everything it needs so it can be re-run by a reactive cell.
pub(crate) struct EditComposer<R> {
    request: CellRenderRequest<R>,
    wiring: FieldWiring<R>,
    settings: Arc<RenderSettings>,
}

impl<R> EditComposer<R> {
    pub(crate) fn new(
        request: CellRenderRequest<R>,
        wiring: FieldWiring<R>,
        settings: Arc<RenderSettings>,
    ) -> Self {
        Self {
            request,
            wiring,
            settings,
        }
    }

    /// The cell's form path.
    pub(crate) fn field_path(&self) -> FieldPath {
        let request = &self.request;
        let index = request.row_index;

        let row = if request.has_prefix() {
            PathPart::from(index)
        } else {
            request
                .record_key
                .as_ref()
                .map_or_else(|| PathPart::from(index), PathPart::from)
        };

        let column = request.column.as_deref();
        let field = match (
            column.and_then(|c| c.key.as_ref()),
            column.and_then(|c| c.data_index.as_ref()),
        ) {
            (Some(key), _) => PathPart::from(key),
            (None, Some(data_index)) => PathPart::from(data_index),
            (None, None) => PathPart::from(index),
        };

        build_path([request.prefix_name.as_ref().map(PathPart::from), Some(row), Some(field)])
    }

    /// The path of a custom renderer's wrapper: row key and column
    /// discriminator only, skipping empty keys.
    fn custom_path(&self, row_key: &PathSegment) -> FieldPath {
        let column = self.request.column.as_deref();
        let key = column.and_then(|c| c.key.as_ref()).filter(|key| key.is_truthy());
        let data_index = column
            .and_then(|c| c.data_index.as_ref())
            .filter(|data_index| data_index.is_truthy());

        let field = match (key, data_index) {
            (Some(key), _) => PathPart::from(key),
            (None, Some(data_index)) => PathPart::from(data_index),
            (None, None) => PathPart::from(self.request.row_index),
        };
        build_path([Some(PathPart::from(row_key)), Some(field)])
    }

    fn message_variables(&self, form_item_props: &FormItemProps) -> BTreeMap<String, String> {
        let column = self.request.column.as_deref();
        let label = column
            .and_then(|c| c.title.clone())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| self.settings.default_label.clone());
        let type_label = column
            .and_then(|c| c.value_type.as_ref())
            .and_then(|value_type| value_type.as_static())
            .map(|value_type| value_type.as_str().to_string())
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| self.settings.default_type_label.clone());

        let mut variables = BTreeMap::from([
            ("label".to_string(), label),
            ("type".to_string(), type_label),
        ]);
        variables.extend(form_item_props.message_variables.clone());
        variables
    }

    fn initial_value(&self, form_item_props: &FormItemProps) -> Option<Value> {
        [
            self.request.text.as_ref(),
            form_item_props.initial_value.as_ref(),
            self.request.column.as_deref().and_then(|c| c.initial_value.as_ref()),
        ]
        .into_iter()
        .find(|value| !is_nullish(*value))
        .flatten()
        .cloned()
    }

    /// Compose the cell against `form`.
    pub(crate) fn compose(&self, form: &dyn FormStateView) -> Element<R> {
        let _span = tracing::trace_span!(
            target: targets::CELL,
            span_names::CELL_COMPOSE,
            row_index = self.request.row_index
        )
        .entered();

        let request = &self.request;
        let column = request.column.as_deref();
        let row_key = request.row_key();
        let name = self.field_path();

        let context = PropsContext {
            row_key: Some(row_key.clone()),
            row_index: Some(request.row_index),
            column: request.column.clone(),
            entity: request.row_data.clone(),
            is_editable: true,
        };

        let form_item_props = column
            .and_then(|c| c.form_item_props.as_ref())
            .map(|props| props.resolve_with(|resolve| resolve(Some(form), &context)))
            .unwrap_or_default();
        let message_variables = self.message_variables(&form_item_props);
        let initial_value = self.initial_value(&form_item_props);

        let input = Element::Field(FieldElement {
            key: Some(row_key.clone()),
            name: Some(name.clone()),
            ignore_form_item: true,
            field_props: resolve_field_props(column, Some(form), &context),
            wiring: self.wiring.clone(),
        });

        let wrap = |name: FieldPath, child: Element<R>| FormItemElement {
            key: row_key.clone(),
            name,
            error_type: self.settings.error_type,
            props: form_item_props.clone(),
            message_variables: message_variables.clone(),
            initial_value: initial_value.clone(),
            child: Box::new(child),
        };

        let Some((column, render)) = request
            .column
            .as_ref()
            .and_then(|c| c.render_form_item.as_ref().map(|render| (c, render)))
        else {
            tracing::trace!(target: targets::CELL, %name, "composed editable cell");
            return Element::FormItem(wrap(name, input));
        };

        let schema = RenderFormItemSchema {
            column: Arc::clone(column),
            index: request.row_index,
            is_editable: true,
            context: SchemaComponent::Table,
        };
        let config = RenderFormItemConfig {
            default_render: DefaultRender {
                element: wrap(name, input),
            },
            context: SchemaComponent::Form,
            record_key: request.record_key.clone(),
            record: form.get_field_value(&build_path([Some(PathPart::from(&row_key))])),
            is_editable: true,
        };

        let rendered = render(&schema, &config, form);
        let custom_name = self.custom_path(&row_key);
        tracing::trace!(
            target: targets::CELL,
            name = %custom_name,
            "composed custom editable cell"
        );
        Element::FormItem(wrap(custom_name, rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::ErrorType;
    use crate::model::{DataIndex, FormDocument, FormSnapshot, RenderMode, ValueType};
    use serde_json::json;

    fn composer(request: CellRenderRequest<Value>) -> EditComposer<Value> {
        let request = request.with_mode(RenderMode::Edit);
        let settings = Arc::new(RenderSettings::default());
        let wiring = FieldWiring::from_request(&request, None, &settings);
        EditComposer::new(request, wiring, settings)
    }

    fn path(segments: &[&str]) -> FieldPath {
        FieldPath::from(segments.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_path_with_prefix_uses_row_index() {
        let column: ColumnConfig<Value> = ColumnConfig::new().with_data_index("name");
        let request = CellRenderRequest::new(json!("a"), 3)
            .with_column(column)
            .with_prefix_name("users")
            .with_record_key("r-1");
        assert_eq!(composer(request).field_path(), path(&["users", "3", "name"]));
    }

    #[test]
    fn test_path_without_prefix_uses_record_key() {
        let column: ColumnConfig<Value> = ColumnConfig::new().with_data_index("name");
        let request = CellRenderRequest::new(json!("a"), 3)
            .with_column(column)
            .with_record_key("r-1");
        assert_eq!(composer(request).field_path(), path(&["r-1", "name"]));
    }

    #[test]
    fn test_path_fallbacks() {
        let request: CellRenderRequest<Value> = CellRenderRequest::new(json!("a"), 2);
        assert_eq!(composer(request).field_path(), path(&["2", "2"]));

        // The column key wins over the data index, even when empty.
        let column: ColumnConfig<Value> = ColumnConfig::new()
            .with_key("")
            .with_data_index(DataIndex::path(["address", "city"]));
        let request = CellRenderRequest::new(json!("a"), 2).with_column(column);
        assert_eq!(composer(request).field_path(), path(&["2", ""]));

        let column: ColumnConfig<Value> =
            ColumnConfig::new().with_data_index(DataIndex::path(["address", "city"]));
        let request = CellRenderRequest::new(json!("a"), 2)
            .with_column(column)
            .with_record_key(0);
        assert_eq!(composer(request).field_path(), path(&["0", "address", "city"]));
    }

    #[test]
    fn test_message_variables() {
        let column: ColumnConfig<Value> = ColumnConfig::new()
            .with_data_index("age")
            .with_value_type(ValueType::Digit)
            .with_form_item_props(
                FormItemProps::new().with_message_variable("label", "Age (years)"),
            );
        let request = CellRenderRequest::new(json!(3), 0).with_column(column);
        let form = FormDocument::new();

        let element = composer(request).compose(&form);
        let item = element.as_form_item().unwrap();
        assert_eq!(item.message_variables["label"], "Age (years)");
        assert_eq!(item.message_variables["type"], "digit");

        let request: CellRenderRequest<Value> = CellRenderRequest::new(json!(3), 0)
            .with_column(ColumnConfig::new().with_title("").with_value_type_fn(|_, _| None));
        let element = composer(request).compose(&form);
        let item = element.as_form_item().unwrap();
        assert_eq!(item.message_variables["label"], "this field");
        assert_eq!(item.message_variables["type"], "text");
    }

    #[test]
    fn test_initial_value_fallbacks() {
        let form = FormDocument::new();
        let column = || -> ColumnConfig<Value> {
            ColumnConfig::new()
                .with_data_index("n")
                .with_initial_value(3)
                .with_form_item_props(FormItemProps::new().with_initial_value(2))
        };

        let request = CellRenderRequest::new(json!(1), 0).with_column(column());
        let element = composer(request).compose(&form);
        assert_eq!(element.as_form_item().unwrap().initial_value, Some(json!(1)));

        let request = CellRenderRequest::with_text(Some(Value::Null), 0).with_column(column());
        let element = composer(request).compose(&form);
        assert_eq!(element.as_form_item().unwrap().initial_value, Some(json!(2)));

        // An empty string is a value.
        let request = CellRenderRequest::new(json!(""), 0).with_column(column());
        let element = composer(request).compose(&form);
        assert_eq!(element.as_form_item().unwrap().initial_value, Some(json!("")));

        let column: ColumnConfig<Value> = ColumnConfig::new().with_initial_value(3);
        let request = CellRenderRequest::with_text(None, 0).with_column(column);
        let element = composer(request).compose(&form);
        assert_eq!(element.as_form_item().unwrap().initial_value, Some(json!(3)));
    }

    #[test]
    fn test_compose_wraps_field() {
        let column: ColumnConfig<Value> = ColumnConfig::new().with_data_index("name");
        let request = CellRenderRequest::new(json!("Ada"), 1)
            .with_column(column)
            .with_record_key("u1");
        let form = FormDocument::new();

        let element = composer(request).compose(&form);
        let item = element.as_form_item().unwrap();
        assert_eq!(item.key, PathSegment::from("u1"));
        assert_eq!(item.name, path(&["u1", "name"]));
        assert_eq!(item.error_type, ErrorType::Popover);

        let field = item.child.as_field().unwrap();
        assert_eq!(field.key, Some(PathSegment::from("u1")));
        assert_eq!(field.name, Some(path(&["u1", "name"])));
        assert!(field.ignore_form_item);
        assert_eq!(field.mode(), RenderMode::Edit);
    }

    #[test]
    fn test_custom_renderer_receives_schema_and_config() {
        let column: ColumnConfig<Value> = ColumnConfig::new()
            .with_key("")
            .with_data_index("status")
            .with_render_form_item(|schema, config, form| {
                assert_eq!(schema.index, 4);
                assert!(schema.is_editable);
                assert_eq!(schema.context, SchemaComponent::Table);
                assert_eq!(config.context, SchemaComponent::Form);
                assert_eq!(config.record_key, Some(PathSegment::from("")));
                assert!(config.is_editable);
                let label = config
                    .record
                    .as_ref()
                    .map_or("none".to_string(), |r| r["status"].to_string());
                assert!(form.get_field_value(&FieldPath::from(["4"])).is_some());
                Element::Label(label)
            });
        let request = CellRenderRequest::new(json!("open"), 4)
            .with_column(column)
            .with_record_key("");
        let form: FormSnapshot = FormSnapshot::new(json!({ "4": { "status": "closed" } }));

        let element = composer(request).compose(&form);
        let item = element.as_form_item().unwrap();
        assert_eq!(item.name, path(&["4", "status"]));
        assert_eq!(item.child.display_text().as_deref(), Some("\"closed\""));
    }

    #[test]
    fn test_default_render_matches_plain_wrapper() {
        let column: ColumnConfig<Value> = ColumnConfig::new()
            .with_data_index("name")
            .with_render_form_item(|_, config, _| config.default_render.render());
        let request = CellRenderRequest::new(json!("Ada"), 0)
            .with_column(column)
            .with_record_key("u1")
            .with_prefix_name("people");
        let form = FormDocument::new();

        let element = composer(request).compose(&form);
        let outer = element.as_form_item().unwrap();
        assert_eq!(outer.name, path(&["u1", "name"]));

        let inner = outer.child.as_form_item().unwrap();
        assert_eq!(inner.name, path(&["people", "0", "name"]));
        assert!(inner.child.as_field().is_some());
    }

    #[test]
    fn test_empty_record_key_paths() {
        let column = || -> ColumnConfig<Value> {
            ColumnConfig::new()
                .with_data_index("name")
                .with_render_form_item(|_, config, _| config.default_render.render())
        };
        let form = FormDocument::new();

        // The prefixed path ignores the record key; the wrapper skips the empty one.
        let request = CellRenderRequest::new(json!("Ada"), 7)
            .with_column(column())
            .with_record_key("")
            .with_prefix_name("people");
        let element = composer(request).compose(&form);
        let outer = element.as_form_item().unwrap();
        assert_eq!(outer.name, path(&["7", "name"]));
        assert_eq!(outer.key, PathSegment::from(7));
        let inner = outer.child.as_form_item().unwrap();
        assert_eq!(inner.name, path(&["people", "7", "name"]));

        // Without a prefix an empty record key is still present.
        let request = CellRenderRequest::new(json!("Ada"), 7)
            .with_column(column())
            .with_record_key("");
        let element = composer(request).compose(&form);
        let outer = element.as_form_item().unwrap();
        assert_eq!(outer.name, path(&["7", "name"]));
        let inner = outer.child.as_form_item().unwrap();
        assert_eq!(inner.name, path(&["", "name"]));
    }
}
