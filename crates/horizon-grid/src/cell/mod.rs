//! Cell rendering.
//!
//! [`CellRenderer`] turns a [`CellRenderRequest`] into an [`Element`]. Read
//! cells with plain text are shown as is; everything else goes through the
//! field primitive, described by a [`FieldElement`]. Editable cells are bound
//! to the form through a [`FormItemElement`] with a unique field path, and
//! cells whose column depends on the form state are wrapped in a
//! [`ReactiveCell`] that recomposes when the form changes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_grid::cell::{CellRenderRequest, CellRenderer};
//! use horizon_grid::model::{ColumnConfig, FieldPath, FormDocument, RenderMode, ValueType};
//! use serde_json::{Value, json};
//!
//! let form = Arc::new(FormDocument::new());
//! let column: ColumnConfig<Value> = ColumnConfig::new()
//!     .with_data_index("email")
//!     .with_title("Email")
//!     .with_value_type(ValueType::Text);
//!
//! let request = CellRenderRequest::new(json!("ada@example.com"), 0)
//!     .with_column(column)
//!     .with_value_type(ValueType::Text)
//!     .with_record_key("user-1")
//!     .with_mode(RenderMode::Edit)
//!     .with_form(form.view());
//!
//! let element = CellRenderer::new().render(&request);
//! let item = element.as_form_item().unwrap();
//! assert_eq!(item.name, FieldPath::from(["user-1", "email"]));
//! assert_eq!(item.message_variables["label"], "Email");
//! ```

mod compose;
mod element;
mod reactive;
mod renderer;
mod request;
mod resolve;
mod wiring;

pub use compose::{DefaultRender, RenderFormItemConfig, RenderFormItemSchema};
pub use element::{Element, ErrorType, FieldElement, FieldWiring, FormItemElement};
pub use reactive::{ComposeFn, ReactiveCell};
pub use renderer::CellRenderer;
pub use request::CellRenderRequest;
pub use resolve::{ResolvedCell, TypeResolution, resolve_value_type};
