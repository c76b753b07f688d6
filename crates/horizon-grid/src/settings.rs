//! Render settings.
//!
//! The strings the edit-mode composer falls back to, and the prefix used for
//! field registration keys, are configurable per renderer. Settings are
//! plain serde structs and can be loaded from TOML:
//!
//! ```
//! use horizon_grid::RenderSettings;
//!
//! let settings = RenderSettings::from_toml_str(r#"default_label = "dieses Feld""#).unwrap();
//! assert_eq!(settings.default_label, "dieses Feld");
//! assert_eq!(settings.field_key_prefix, "table-field-");
//! ```

use serde::{Deserialize, Serialize};

use crate::cell::ErrorType;
use crate::error::Result;

/// Settings used by [`CellRenderer`](crate::CellRenderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Prepended to the column key to form the field registration key.
    pub field_key_prefix: String,
    /// The `label` message variable when the column has no title.
    pub default_label: String,
    /// The `type` message variable when the column has no fixed value type.
    pub default_type_label: String,
    /// How the validated wrapper displays errors.
    pub error_type: ErrorType,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            field_key_prefix: "table-field-".to_string(),
            default_label: "this field".to_string(),
            default_type_label: "text".to_string(),
            error_type: ErrorType::Popover,
        }
    }
}

impl RenderSettings {
    /// Parse settings from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Serialize the settings to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Set the field key prefix.
    pub fn with_field_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.field_key_prefix = prefix.into();
        self
    }

    /// Set the default `label` message variable.
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Set the default `type` message variable.
    pub fn with_default_type_label(mut self, label: impl Into<String>) -> Self {
        self.default_type_label = label.into();
        self
    }

    /// Set the error display.
    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = error_type;
        self
    }
}
