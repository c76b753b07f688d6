//! Value types, render modes and cell values.
//!
//! A [`ValueType`] tells the field primitive how a cell's data should be
//! represented: plain text, a select over an enumerated value set, a date
//! picker, a row number and so on. Cell values themselves are plain
//! `serde_json::Value`s; an absent value is `None`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a cell's value is represented by the field primitive.
///
/// Unknown tags are kept verbatim in [`ValueType::Other`] and passed through
/// to the field primitive, which decides how to handle them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Textarea,
    /// Masked text.
    Password,
    /// The row number, starting at zero.
    Index,
    /// The row number with a badge border.
    IndexBorder,
    /// One value out of an enumerated set.
    Select,
    /// Hierarchical select.
    TreeSelect,
    /// Several values out of an enumerated set.
    Checkbox,
    /// One value out of an enumerated set, shown as radio buttons.
    Radio,
    /// Radio buttons styled as a button group.
    RadioButton,
    /// Cascading select over nested options.
    Cascader,
    /// A calendar date.
    Date,
    /// A date and time.
    DateTime,
    /// A range of dates.
    DateRange,
    /// A range of date-times.
    DateTimeRange,
    /// A time of day.
    Time,
    /// Relative time ("3 minutes ago").
    FromNow,
    /// A number.
    Digit,
    /// A numeric range.
    DigitRange,
    /// A currency amount.
    Money,
    /// A percentage.
    Percent,
    /// A progress bar.
    Progress,
    /// A duration in seconds.
    Second,
    /// A star rating.
    Rate,
    /// A boolean switch.
    Switch,
    /// A color swatch.
    Color,
    /// An avatar image.
    Avatar,
    /// An image.
    Image,
    /// A code block.
    Code,
    /// A JSON code block.
    JsonCode,
    /// Row actions.
    Option,
    /// Any tag not known to this crate.
    Other(String),
}

impl ValueType {
    /// The tag string used by the field primitive.
    pub fn as_str(&self) -> &str {
        match self {
            ValueType::Text => "text",
            ValueType::Textarea => "textarea",
            ValueType::Password => "password",
            ValueType::Index => "index",
            ValueType::IndexBorder => "indexBorder",
            ValueType::Select => "select",
            ValueType::TreeSelect => "treeSelect",
            ValueType::Checkbox => "checkbox",
            ValueType::Radio => "radio",
            ValueType::RadioButton => "radioButton",
            ValueType::Cascader => "cascader",
            ValueType::Date => "date",
            ValueType::DateTime => "dateTime",
            ValueType::DateRange => "dateRange",
            ValueType::DateTimeRange => "dateTimeRange",
            ValueType::Time => "time",
            ValueType::FromNow => "fromNow",
            ValueType::Digit => "digit",
            ValueType::DigitRange => "digitRange",
            ValueType::Money => "money",
            ValueType::Percent => "percent",
            ValueType::Progress => "progress",
            ValueType::Second => "second",
            ValueType::Rate => "rate",
            ValueType::Switch => "switch",
            ValueType::Color => "color",
            ValueType::Avatar => "avatar",
            ValueType::Image => "image",
            ValueType::Code => "code",
            ValueType::JsonCode => "jsonCode",
            ValueType::Option => "option",
            ValueType::Other(tag) => tag,
        }
    }

    /// Returns `true` for the tags rendered as plain text.
    #[inline]
    pub fn is_plain_text(&self) -> bool {
        matches!(self, ValueType::Text | ValueType::Textarea)
    }

    /// Returns `true` for the tags that display the row number instead of
    /// the cell value.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, ValueType::Index | ValueType::IndexBorder)
    }
}

impl FromStr for ValueType {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(match tag {
            "text" => ValueType::Text,
            "textarea" => ValueType::Textarea,
            "password" => ValueType::Password,
            "index" => ValueType::Index,
            "indexBorder" => ValueType::IndexBorder,
            "select" => ValueType::Select,
            "treeSelect" => ValueType::TreeSelect,
            "checkbox" => ValueType::Checkbox,
            "radio" => ValueType::Radio,
            "radioButton" => ValueType::RadioButton,
            "cascader" => ValueType::Cascader,
            "date" => ValueType::Date,
            "dateTime" => ValueType::DateTime,
            "dateRange" => ValueType::DateRange,
            "dateTimeRange" => ValueType::DateTimeRange,
            "time" => ValueType::Time,
            "fromNow" => ValueType::FromNow,
            "digit" => ValueType::Digit,
            "digitRange" => ValueType::DigitRange,
            "money" => ValueType::Money,
            "percent" => ValueType::Percent,
            "progress" => ValueType::Progress,
            "second" => ValueType::Second,
            "rate" => ValueType::Rate,
            "switch" => ValueType::Switch,
            "color" => ValueType::Color,
            "avatar" => ValueType::Avatar,
            "image" => ValueType::Image,
            "code" => ValueType::Code,
            "jsonCode" => ValueType::JsonCode,
            "option" => ValueType::Option,
            other => ValueType::Other(other.to_string()),
        })
    }
}

impl From<&str> for ValueType {
    fn from(tag: &str) -> Self {
        match tag.parse() {
            Ok(value_type) => value_type,
            Err(never) => match never {},
        }
    }
}

impl From<String> for ValueType {
    fn from(tag: String) -> Self {
        ValueType::from(tag.as_str())
    }
}

impl From<ValueType> for String {
    fn from(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which consumer is rendering: resolvers and custom renderers receive this
/// to vary their output by call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaComponent {
    /// A table cell.
    Table,
    /// A form field.
    Form,
    /// A list item.
    List,
    /// A descriptions (key/value) panel.
    Descriptions,
    /// A card list.
    CardList,
}

impl SchemaComponent {
    /// The tag string used by resolvers.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaComponent::Table => "table",
            SchemaComponent::Form => "form",
            SchemaComponent::List => "list",
            SchemaComponent::Descriptions => "descriptions",
            SchemaComponent::CardList => "cardList",
        }
    }
}

impl fmt::Display for SchemaComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the row a cell belongs to is being displayed or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Display only.
    #[default]
    Read,
    /// In-place editing bound to the form state.
    Edit,
}

/// Placeholder shown for empty cells.
#[derive(Clone)]
pub enum EmptyText {
    /// Show nothing at all.
    Hidden,
    /// A fixed placeholder, such as `"-"`.
    Text(String),
    /// A placeholder produced on demand.
    Factory(std::sync::Arc<dyn Fn() -> String + Send + Sync>),
}

impl EmptyText {
    /// The text a display should show, if any.
    pub fn render(&self) -> Option<String> {
        match self {
            EmptyText::Hidden => None,
            EmptyText::Text(text) => Some(text.clone()),
            EmptyText::Factory(factory) => Some(factory()),
        }
    }

    /// Create a placeholder from a factory function.
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        EmptyText::Factory(std::sync::Arc::new(factory))
    }
}

impl Default for EmptyText {
    fn default() -> Self {
        EmptyText::Text("-".to_string())
    }
}

impl From<&str> for EmptyText {
    fn from(text: &str) -> Self {
        EmptyText::Text(text.to_string())
    }
}

impl From<String> for EmptyText {
    fn from(text: String) -> Self {
        EmptyText::Text(text)
    }
}

impl fmt::Debug for EmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyText::Hidden => f.write_str("Hidden"),
            EmptyText::Text(text) => f.debug_tuple("Text").field(text).finish(),
            EmptyText::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Returns `true` for the values displayed as the empty-text placeholder:
/// absent, `null` and the empty string.
///
/// `0`, `false` and empty collections are real values and are displayed.
pub fn is_empty_cell_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Returns `true` if the value is absent or `null`.
pub fn is_nullish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}
