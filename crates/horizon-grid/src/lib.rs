//! Horizon Grid - cell rendering for editable data tables.
//!
//! For every table cell, Horizon Grid decides how the value is presented:
//! plain text with an empty-text placeholder, the generic field primitive in
//! read mode, or an editable field bound to a shared form document at a
//! unique path, complete with a validated wrapper.
//!
//! # Example
//!
//! ```
//! use horizon_grid::prelude::*;
//! use serde_json::{Value, json};
//!
//! let renderer = CellRenderer::new();
//! let column: ColumnConfig<Value> = ColumnConfig::new()
//!     .with_data_index("status")
//!     .with_value_type(ValueType::Select)
//!     .with_value_enum(ValueEnum::from_iter([(json!("open"), "Open")]));
//!
//! let request = CellRenderRequest::new(json!("open"), 0).with_column(column);
//! let element = renderer.render(&request);
//! assert_eq!(element.display_text().as_deref(), Some("Open"));
//! ```
//!
//! # Crate Layout
//!
//! - [`model`]: paths, value types, column configuration and form state
//! - [`cell`]: the render dispatcher and the elements it produces
//! - [`settings`]: configurable fallbacks, loadable from TOML

pub mod cell;
mod error;
pub mod model;
pub mod prelude;
pub mod settings;

pub use cell::{CellRenderRequest, CellRenderer, Element};
pub use error::{GridError, Result};
pub use settings::RenderSettings;

pub use horizon_grid_core;
