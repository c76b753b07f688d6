//! Field paths for addressing values in a hierarchical form document.
//!
//! A [`FieldPath`] is the address of one editable cell inside the form
//! document that backs a table's editable rows, for example
//! `["row-7", "status"]`. Paths are assembled from [`PathPart`]s with
//! [`build_path`], which drops missing parts, stringifies numeric segments
//! and flattens nested data indices one level.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// One component of a path: a string key or an integer.
///
/// Numeric segments are stringified when a [`FieldPath`] is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A string key.
    Key(String),
    /// An integer, such as a row index.
    Index(i64),
}

impl PathSegment {
    /// Returns `false` for the empty string and for zero.
    ///
    /// Some fallbacks (for example the row key of a custom renderer) skip
    /// such segments in favour of the next candidate, while others only
    /// skip missing values.
    pub fn is_truthy(&self) -> bool {
        match self {
            PathSegment::Key(key) => !key.is_empty(),
            PathSegment::Index(n) => *n != 0,
        }
    }

    /// The segment as it appears in a [`FieldPath`].
    pub fn to_key(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(n) => n.to_string(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<i64> for PathSegment {
    fn from(n: i64) -> Self {
        PathSegment::Index(n)
    }
}

impl From<i32> for PathSegment {
    fn from(n: i32) -> Self {
        PathSegment::Index(n as i64)
    }
}

impl From<usize> for PathSegment {
    fn from(n: usize) -> Self {
        PathSegment::Index(n as i64)
    }
}

/// Where a column reads its value from a row.
///
/// Either a single field or a nested path such as `["user", "name"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataIndex {
    /// A single field of the row.
    Field(PathSegment),
    /// A nested field, outermost segment first.
    Path(Vec<PathSegment>),
}

impl DataIndex {
    /// Returns `false` only for an empty or zero single field.
    ///
    /// Nested paths are always truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            DataIndex::Field(segment) => segment.is_truthy(),
            DataIndex::Path(_) => true,
        }
    }
}

/// Nested paths display comma separated, `user,name`.
impl fmt::Display for DataIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIndex::Field(segment) => segment.fmt(f),
            DataIndex::Path(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    segment.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

impl From<PathSegment> for DataIndex {
    fn from(segment: PathSegment) -> Self {
        DataIndex::Field(segment)
    }
}

impl From<&str> for DataIndex {
    fn from(key: &str) -> Self {
        DataIndex::Field(key.into())
    }
}

impl From<String> for DataIndex {
    fn from(key: String) -> Self {
        DataIndex::Field(key.into())
    }
}

impl From<i64> for DataIndex {
    fn from(n: i64) -> Self {
        DataIndex::Field(n.into())
    }
}

impl From<i32> for DataIndex {
    fn from(n: i32) -> Self {
        DataIndex::Field(n.into())
    }
}

impl From<usize> for DataIndex {
    fn from(n: usize) -> Self {
        DataIndex::Field(n.into())
    }
}

impl From<Vec<PathSegment>> for DataIndex {
    fn from(segments: Vec<PathSegment>) -> Self {
        DataIndex::Path(segments)
    }
}

impl DataIndex {
    /// Build a nested data index.
    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        DataIndex::Path(segments.into_iter().map(Into::into).collect())
    }
}

/// Input to [`build_path`]: a single segment or a sequence flattened one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPart {
    /// A single segment.
    Segment(PathSegment),
    /// Several segments spliced into the path in order.
    Nested(Vec<PathSegment>),
}

impl From<PathSegment> for PathPart {
    fn from(segment: PathSegment) -> Self {
        PathPart::Segment(segment)
    }
}

impl From<&PathSegment> for PathPart {
    fn from(segment: &PathSegment) -> Self {
        PathPart::Segment(segment.clone())
    }
}

impl From<&str> for PathPart {
    fn from(key: &str) -> Self {
        PathPart::Segment(key.into())
    }
}

impl From<String> for PathPart {
    fn from(key: String) -> Self {
        PathPart::Segment(key.into())
    }
}

impl From<i64> for PathPart {
    fn from(n: i64) -> Self {
        PathPart::Segment(n.into())
    }
}

impl From<i32> for PathPart {
    fn from(n: i32) -> Self {
        PathPart::Segment(n.into())
    }
}

impl From<usize> for PathPart {
    fn from(n: usize) -> Self {
        PathPart::Segment(n.into())
    }
}

impl From<Vec<PathSegment>> for PathPart {
    fn from(segments: Vec<PathSegment>) -> Self {
        PathPart::Nested(segments)
    }
}

impl From<&DataIndex> for PathPart {
    fn from(index: &DataIndex) -> Self {
        match index {
            DataIndex::Field(segment) => PathPart::Segment(segment.clone()),
            DataIndex::Path(segments) => PathPart::Nested(segments.clone()),
        }
    }
}

/// The address of a value in a hierarchical form document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// The empty path, addressing the whole document.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// The path's segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Append a segment.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    /// Consume the path and return its segments.
    pub fn into_segments(self) -> Vec<String> {
        self.0
    }
}

impl Deref for FieldPath {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<const N: usize> From<[&str; N]> for FieldPath {
    fn from(segments: [&str; N]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }
}

/// Assemble a [`FieldPath`] from possibly-missing parts.
///
/// Missing parts are dropped, numeric segments are stringified and nested
/// parts are flattened one level. Order is preserved.
///
/// # Example
///
/// ```
/// use horizon_grid::model::{build_path, FieldPath};
///
/// let path = build_path([Some("a".into()), Some(2.into()), None, Some("b".into())]);
/// assert_eq!(path, FieldPath::from(["a", "2", "b"]));
///
/// assert!(build_path([None]).is_empty());
/// ```
pub fn build_path<I>(parts: I) -> FieldPath
where
    I: IntoIterator<Item = Option<PathPart>>,
{
    let mut path = FieldPath::root();
    for part in parts.into_iter().flatten() {
        match part {
            PathPart::Segment(segment) => path.push(segment.to_key()),
            PathPart::Nested(segments) => {
                for segment in segments {
                    path.push(segment.to_key());
                }
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path_drops_missing_and_stringifies() {
        let path = build_path([Some("a".into()), Some(2.into()), None, Some("b".into())]);
        assert_eq!(path, FieldPath::from(["a", "2", "b"]));
    }

    #[test]
    fn test_build_path_all_missing() {
        assert_eq!(build_path([None]), FieldPath::root());
        assert!(build_path(Vec::new()).is_empty());
    }

    #[test]
    fn test_build_path_flattens_one_level() {
        let nested = DataIndex::path(["user", "name"]);
        let path = build_path([Some("list".into()), Some(0.into()), Some((&nested).into())]);
        assert_eq!(path, FieldPath::from(["list", "0", "user", "name"]));
    }

    #[test]
    fn test_build_path_keeps_empty_string() {
        let path = build_path([Some("".into()), Some(1.into())]);
        assert_eq!(path.segments(), &["".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_segment_truthiness() {
        assert!(PathSegment::from("k").is_truthy());
        assert!(!PathSegment::from("").is_truthy());
        assert!(!PathSegment::from(0).is_truthy());
        assert!(PathSegment::from(3usize).is_truthy());
        assert!(DataIndex::Path(Vec::new()).is_truthy());
        assert!(!DataIndex::from("").is_truthy());
    }

    #[test]
    fn test_data_index_display() {
        assert_eq!(DataIndex::from("name").to_string(), "name");
        assert_eq!(DataIndex::path(["user", "name"]).to_string(), "user,name");
        assert_eq!(DataIndex::from(4).to_string(), "4");
    }

    #[test]
    fn test_field_path_display() {
        assert_eq!(FieldPath::from(["rows", "3", "title"]).to_string(), "rows.3.title");
    }
}
