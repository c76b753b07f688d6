//! Value type resolution, the first phase of a cell render.

use std::borrow::Cow;

use horizon_grid_core::logging::targets;

use super::request::CellRenderRequest;
use crate::model::{Declared, ValueType};

/// The outcome of resolving a request's value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeResolution {
    /// No value type was declared.
    Absent,
    /// A concrete tag.
    Concrete(ValueType),
    /// A computed declaration that could not run because the row is missing.
    Unresolved,
}

impl TypeResolution {
    /// The concrete tag, if any.
    pub fn concrete(&self) -> Option<&ValueType> {
        match self {
            TypeResolution::Concrete(value_type) => Some(value_type),
            _ => None,
        }
    }
}

/// A request whose value type has been resolved.
pub struct ResolvedCell<'a, R> {
    /// The request to render. A computed value type is replaced with the
    /// static tag it resolved to; every other field is unchanged.
    pub request: Cow<'a, CellRenderRequest<R>>,
    /// The resolution outcome.
    pub value_type: TypeResolution,
}

/// Resolve the request's declared value type.
///
/// A computed declaration is invoked with the row and the rendering context
/// only when row data is present, and falls back to [`ValueType::Text`] if it
/// yields nothing or an empty tag. Resolution is a single step: the resolver returns a tag,
/// never another resolver.
pub fn resolve_value_type<R>(request: &CellRenderRequest<R>) -> ResolvedCell<'_, R> {
    match (&request.value_type, &request.row_data) {
        (None, _) => ResolvedCell {
            request: Cow::Borrowed(request),
            value_type: TypeResolution::Absent,
        },
        (Some(Declared::Static(value_type)), _) => ResolvedCell {
            request: Cow::Borrowed(request),
            value_type: TypeResolution::Concrete(value_type.clone()),
        },
        (Some(Declared::Computed(resolve)), Some(row)) => {
            let value_type = resolve(row.as_ref(), request.context)
                .filter(|value_type| !value_type.as_str().is_empty())
                .unwrap_or(ValueType::Text);
            tracing::trace!(target: targets::CELL, %value_type, "resolved computed value type");
            let resolved = request
                .clone()
                .with_value_type_decl(Some(Declared::Static(value_type.clone())));
            ResolvedCell {
                request: Cow::Owned(resolved),
                value_type: TypeResolution::Concrete(value_type),
            }
        }
        (Some(Declared::Computed(_)), None) => {
            tracing::debug!(
                target: targets::CELL,
                row_index = request.row_index,
                "computed value type without row data left unresolved"
            );
            ResolvedCell {
                request: Cow::Borrowed(request),
                value_type: TypeResolution::Unresolved,
            }
        }
    }
}
