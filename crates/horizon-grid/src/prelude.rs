//! Prelude module for Horizon Grid.
//!
//! ```ignore
//! use horizon_grid::prelude::*;
//! ```

// ============================================================================
// Rendering
// ============================================================================

pub use crate::cell::{
    CellRenderRequest, CellRenderer, Element, ErrorType, FieldElement, FormItemElement,
    ReactiveCell, RenderFormItemConfig, RenderFormItemSchema,
};
pub use crate::settings::RenderSettings;

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    ColumnConfig, DataIndex, Declared, EmptyText, EnumOption, FieldPath, FieldProps,
    FormDocument, FormItemProps, FormSnapshot, FormStateView, PathSegment, PropsContext,
    RenderMode, SchemaComponent, ValueEnum, ValueType, build_path,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::GridError;
