//! Error types for Horizon Grid.
//!
//! Cell rendering itself never fails: it degrades to empty output instead.
//! These errors come from the surrounding layers, loading render settings
//! and writing to a [`FormDocument`](crate::model::FormDocument).

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur outside the render path.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Render settings could not be parsed.
    #[error("Invalid render settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// Render settings could not be serialized.
    #[error("Failed to serialize render settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    /// A form write tried to descend into a scalar value.
    #[error("Cannot write '{path}': segment '{segment}' is not a container")]
    PathConflict { path: String, segment: String },

    /// A form write addressed the empty path.
    #[error("Cannot write a field at the empty path")]
    EmptyPath,
}

impl GridError {
    /// Create a path conflict error.
    pub fn path_conflict(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::PathConflict {
            path: path.into(),
            segment: segment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_conflict_display() {
        let err = GridError::path_conflict("rows.0.name.first", "name");
        assert_eq!(
            err.to_string(),
            "Cannot write 'rows.0.name.first': segment 'name' is not a container"
        );
    }

    #[test]
    fn test_settings_error_from_toml() {
        let err: GridError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid render settings"));
    }
}
