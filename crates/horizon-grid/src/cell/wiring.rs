//! Field wiring shared by read and edit cells.

use serde_json::Value;

use super::element::{FieldElement, FieldWiring};
use super::request::CellRenderRequest;
use crate::model::{ColumnConfig, FieldProps, FormStateView, PropsContext, ValueType};
use crate::settings::RenderSettings;

impl<R> FieldWiring<R> {
    /// Build the field primitive's property bag for `request`.
    ///
    /// `value_type` is the resolved tag, `None` when none was declared or a
    /// computed declaration could not be resolved.
    pub fn from_request(
        request: &CellRenderRequest<R>,
        value_type: Option<&ValueType>,
        settings: &RenderSettings,
    ) -> Self {
        let column = request.column.as_deref();

        let text = if value_type.is_some_and(ValueType::is_index) {
            Some(Value::from(request.row_index))
        } else {
            request.text.clone()
        };

        Self {
            value_enum: column
                .and_then(|column| column.value_enum.as_ref())
                .map(|value_enum| {
                    value_enum.resolve_with(|resolve| resolve(request.row_data.as_deref()))
                }),
            request: column.and_then(|column| column.request.clone()),
            params: column.and_then(|column| column.params.clone()),
            text,
            mode: request.mode,
            value_type: value_type.cloned(),
            record: request.row_data.clone(),
            empty_text: request.empty_text.clone(),
            field_key: column
                .and_then(ColumnConfig::column_key)
                .filter(|key| !key.is_empty())
                .map(|key| format!("{}{key}", settings.field_key_prefix)),
        }
    }
}

/// Resolve the column's field props against `form`.
pub(crate) fn resolve_field_props<R>(
    column: Option<&ColumnConfig<R>>,
    form: Option<&dyn FormStateView>,
    context: &PropsContext<R>,
) -> FieldProps {
    column
        .and_then(|column| column.field_props.as_ref())
        .map(|props| props.resolve_with(|resolve| resolve(form, context)))
        .unwrap_or_default()
}

/// The field primitive for a read-mode cell.
///
/// Field props are resolved without a form handle.
pub(crate) fn read_field<R>(
    request: &CellRenderRequest<R>,
    wiring: FieldWiring<R>,
) -> FieldElement<R> {
    let context = PropsContext {
        row_key: None,
        row_index: None,
        column: request.column.clone(),
        entity: request.row_data.clone(),
        is_editable: false,
    };

    FieldElement {
        key: None,
        name: None,
        ignore_form_item: true,
        field_props: resolve_field_props(request.column.as_deref(), None, &context),
        wiring,
    }
}
