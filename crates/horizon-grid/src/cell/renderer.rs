//! The cell render dispatcher.

use std::sync::Arc;

use horizon_grid_core::logging::{span_names, targets};

use super::compose::EditComposer;
use super::element::{Element, FieldWiring};
use super::reactive::ReactiveCell;
use super::request::CellRenderRequest;
use super::resolve::{ResolvedCell, TypeResolution, resolve_value_type};
use super::wiring::read_field;
use crate::model::{FormStateView, RenderMode, is_empty_cell_value};
use crate::settings::RenderSettings;

/// Decides how a table cell is presented.
///
/// Rendering runs in two phases: [`resolve_value_type`] turns the declared
/// value type into a concrete tag, then [`CellRenderer::render_resolved`]
/// picks the output:
///
/// 1. Plain-text cells in read mode skip the field primitive and show their
///    raw value, or the placeholder when the value is empty.
/// 2. Other read-mode cells become a read-only [`FieldElement`].
/// 3. Edit-mode cells become a [`FormItemElement`] bound to the form, wrapped
///    in a [`ReactiveCell`] when the column depends on the form state.
///
/// Rendering never fails. An edit-mode cell without a form renders as
/// [`Element::Empty`].
///
/// [`FieldElement`]: super::FieldElement
/// [`FormItemElement`]: super::FormItemElement
///
/// # Example
///
/// ```
/// use horizon_grid::cell::{CellRenderRequest, CellRenderer, Element};
/// use horizon_grid::model::{ColumnConfig, EmptyText, ValueType};
/// use serde_json::{Value, json};
///
/// let renderer = CellRenderer::new();
/// let column: ColumnConfig<Value> = ColumnConfig::new().with_data_index("name");
///
/// let request = CellRenderRequest::with_text(None, 0)
///     .with_column(column)
///     .with_value_type(ValueType::Text)
///     .with_empty_text(EmptyText::from("-"));
///
/// let element = renderer.render(&request);
/// assert!(matches!(element, Element::Placeholder(_)));
/// assert_eq!(element.display_text().as_deref(), Some("-"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CellRenderer {
    settings: Arc<RenderSettings>,
}

impl CellRenderer {
    /// Create a renderer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given settings.
    pub fn with_settings(settings: RenderSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// The renderer's settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render one cell.
    pub fn render<R: Send + Sync + 'static>(&self, request: &CellRenderRequest<R>) -> Element<R> {
        let _span = tracing::trace_span!(
            target: targets::CELL,
            span_names::CELL_RENDER,
            row_index = request.row_index,
            mode = ?request.mode
        )
        .entered();
        self.render_resolved(resolve_value_type(request))
    }

    /// Render a cell whose value type has been resolved.
    pub fn render_resolved<R: Send + Sync + 'static>(
        &self,
        cell: ResolvedCell<'_, R>,
    ) -> Element<R> {
        let request = cell.request.as_ref();

        if Self::is_fast_path(request, &cell.value_type) {
            return Self::render_plain(request);
        }

        let wiring = FieldWiring::from_request(request, cell.value_type.concrete(), &self.settings);
        match request.mode {
            RenderMode::Read => Element::Field(read_field(request, wiring)),
            RenderMode::Edit => self.render_editable(request, wiring),
        }
    }

    /// Read-mode cells with a plain-text (or no) tag and no enumerated value
    /// set are displayed without the field primitive.
    ///
    /// Computed value types that could not be resolved never qualify.
    fn is_fast_path<R>(request: &CellRenderRequest<R>, value_type: &TypeResolution) -> bool {
        let plain = match value_type {
            TypeResolution::Absent => true,
            TypeResolution::Concrete(value_type) => value_type.is_plain_text(),
            TypeResolution::Unresolved => false,
        };
        plain
            && request.mode == RenderMode::Read
            && !request.column.as_ref().is_some_and(|column| column.has_value_enum())
    }

    fn render_plain<R>(request: &CellRenderRequest<R>) -> Element<R> {
        let text = request.text.as_ref();
        tracing::trace!(
            target: targets::CELL,
            empty = is_empty_cell_value(text),
            "plain text fast path"
        );
        match text {
            Some(value) if !is_empty_cell_value(text) => Element::Text(value.clone()),
            _ => request
                .empty_text
                .clone()
                .map_or(Element::Empty, Element::Placeholder),
        }
    }

    fn render_editable<R: Send + Sync + 'static>(
        &self,
        request: &CellRenderRequest<R>,
        wiring: FieldWiring<R>,
    ) -> Element<R> {
        let Some(form) = request.form.clone() else {
            tracing::debug!(
                target: targets::CELL,
                row_index = request.row_index,
                "editable cell without a form renders nothing"
            );
            return Element::Empty;
        };

        let reactive = request.column.as_ref().is_some_and(|column| column.is_reactive());
        // The composer is handed the form on every call and must not keep it
        // alive from inside the form's own subscribers.
        let mut owned = request.clone();
        owned.form = None;
        let composer = EditComposer::new(owned, wiring, Arc::clone(&self.settings));

        if !reactive {
            return composer.compose(form.as_ref());
        }

        let composer = Arc::new(composer);
        let compose = move |form: &dyn FormStateView| composer.compose(form);
        Element::Reactive(ReactiveCell::new(Arc::new(compose), form.as_ref()))
    }
}
