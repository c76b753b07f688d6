//! Data model for grid cells.
//!
//! This module holds everything the cell renderer reads: field paths and
//! the [`build_path`] helper, value types, column configuration, and the
//! form state editable rows are bound to.
//!
//! # Key Types
//!
//! - [`FieldPath`]: the address of a value in a form document
//! - [`ValueType`]: how a cell's value is represented
//! - [`ColumnConfig`]: per-column declarations, fixed or computed
//! - [`Declared`]: a setting given as a value or a function
//! - [`FormDocument`] / [`FormStateView`]: form state and its read-only view

mod column;
mod declared;
mod form;
mod path;
mod value;

pub use column::{
    ColumnConfig, EnumOption, FieldProps, FieldPropsDecl, FieldPropsFn, FormItemProps,
    FormItemPropsDecl, FormItemPropsFn, OptionsRequest, PropsContext, RenderFormItemFn, ValueEnum,
    ValueEnumDecl, ValueEnumFn, ValueTypeDecl, ValueTypeFn,
};
pub use declared::Declared;
pub use form::{FormDocument, FormSnapshot, FormStateView, lookup};
pub use path::{DataIndex, FieldPath, PathPart, PathSegment, build_path};
pub use value::{EmptyText, RenderMode, SchemaComponent, ValueType, is_empty_cell_value, is_nullish};
