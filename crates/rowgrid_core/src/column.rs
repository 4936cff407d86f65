use crate::{Row, SortDirection, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Comparator receiving both rows and the requested direction.
///
/// The function is responsible for honoring the direction itself.
#[derive(Clone)]
pub struct SortFn(Arc<dyn Fn(&Row, &Row, SortDirection) -> Ordering + Send + Sync>);

impl SortFn {
    pub fn new(f: impl Fn(&Row, &Row, SortDirection) -> Ordering + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn compare(&self, a: &Row, b: &Row, direction: SortDirection) -> Ordering {
        (self.0)(a, b, direction)
    }
}

/// Turns a cell value into its display text.
#[derive(Clone)]
pub struct FormatFn(Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>);

impl FormatFn {
    pub fn new(f: impl Fn(&Value, &Row) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn format(&self, value: &Value, row: &Row) -> String {
        (self.0)(value, row)
    }
}

/// Insert-form validator: `Err` carries the message shown next to the field.
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>);

impl Validator {
    pub fn new(f: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn validate(&self, value: &Value) -> Result<(), String> {
        (self.0)(value)
    }
}

/// Generates a value for columns the insert form must not ask for (ids, timestamps).
#[derive(Clone)]
pub struct AutoValue(Arc<dyn Fn() -> Value + Send + Sync>);

impl AutoValue {
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn generate(&self) -> Value {
        (self.0)()
    }
}

macro_rules! opaque_debug {
    ($($ty:ty),*) => {
        $(impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($ty), "(..)"))
            }
        })*
    };
}

opaque_debug!(SortFn, FormatFn, Validator, AutoValue);

/// How raw form input for a column is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[default]
    Text,
    Integer,
    Float,
    Bool,
    Date,
    Unknown,
}

impl ColumnKind {
    /// Parse a raw input string. Empty input is null for every kind but text.
    pub fn parse(self, raw: &str) -> Result<Value, String> {
        let trimmed = raw.trim();

        if trimmed.is_empty() && self != ColumnKind::Text {
            return Ok(Value::Null);
        }

        match self {
            ColumnKind::Text | ColumnKind::Unknown => Ok(Value::Text(raw.to_string())),
            ColumnKind::Integer => trimmed
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("'{}' is not an integer", trimmed)),
            ColumnKind::Float => trimmed
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| format!("'{}' is not a number", trimmed)),
            ColumnKind::Bool => match trimmed.to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err(format!("'{}' is not a boolean", trimmed)),
            },
            ColumnKind::Date => Value::Text(trimmed.to_string())
                .as_date()
                .map(Value::Date)
                .ok_or_else(|| format!("'{}' is not a date (YYYY-MM-DD)", trimmed)),
        }
    }
}

/// Checked/unchecked values written by a checkbox editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxValues {
    pub checked: String,
    pub unchecked: String,
}

impl CheckboxValues {
    /// Parses the `"checked:unchecked"` shorthand.
    pub fn parse(spec: &str) -> Option<Self> {
        let (checked, unchecked) = spec.split_once(':')?;
        Some(Self {
            checked: checked.to_string(),
            unchecked: unchecked.to_string(),
        })
    }

    pub fn pick(&self, is_checked: bool) -> &str {
        if is_checked {
            &self.checked
        } else {
            &self.unchecked
        }
    }
}

fn default_true() -> bool {
    true
}

/// Description of one table column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Field name in each row.
    pub name: String,

    /// Header text; falls back to `name`.
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub is_key: bool,

    #[serde(default)]
    pub sortable: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default = "default_true")]
    pub searchable: bool,

    #[serde(default = "default_true")]
    pub editable: bool,

    /// Filters and search match the formatted text instead of the raw value.
    #[serde(default)]
    pub filter_formatted: bool,

    #[serde(default)]
    pub kind: ColumnKind,

    #[serde(default)]
    pub checkbox: Option<CheckboxValues>,

    #[serde(skip)]
    pub sort_fn: Option<SortFn>,

    #[serde(skip)]
    pub formatter: Option<FormatFn>,

    #[serde(skip)]
    pub validator: Option<Validator>,

    #[serde(skip)]
    pub auto_value: Option<AutoValue>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            is_key: false,
            sortable: false,
            hidden: false,
            searchable: true,
            editable: true,
            filter_formatted: false,
            kind: ColumnKind::default(),
            checkbox: None,
            sort_fn: None,
            formatter: None,
            validator: None,
            auto_value: None,
        }
    }

    pub fn key(name: impl Into<String>) -> Self {
        Self::new(name).with_key()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_key(mut self) -> Self {
        self.is_key = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_checkbox(mut self, values: CheckboxValues) -> Self {
        self.checkbox = Some(values);
        self
    }

    pub fn with_sort_fn(
        mut self,
        f: impl Fn(&Row, &Row, SortDirection) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_fn = Some(SortFn::new(f));
        self.sortable = true;
        self
    }

    pub fn with_formatter(mut self, f: impl Fn(&Value, &Row) -> String + Send + Sync + 'static) -> Self {
        self.formatter = Some(FormatFn::new(f));
        self
    }

    pub fn filter_formatted(mut self) -> Self {
        self.filter_formatted = true;
        self
    }

    pub fn with_validator(
        mut self,
        f: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Validator::new(f));
        self
    }

    pub fn with_auto_value(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.auto_value = Some(AutoValue::new(f));
        self
    }

    /// Display text for a cell of this column.
    pub fn format(&self, value: &Value, row: &Row) -> String {
        match &self.formatter {
            Some(formatter) => formatter.format(value, row),
            None => value.as_display_string(),
        }
    }

    /// Text that filters and search compare against.
    pub fn match_text(&self, value: &Value, row: &Row) -> String {
        if self.filter_formatted {
            self.format(value, row)
        } else {
            value.as_display_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_input_by_kind() {
        assert_eq!(ColumnKind::Integer.parse(" 42 "), Ok(Value::Int(42)));
        assert_eq!(ColumnKind::Float.parse("1.5"), Ok(Value::Float(1.5)));
        assert_eq!(ColumnKind::Bool.parse("Yes"), Ok(Value::Bool(true)));
        assert_eq!(ColumnKind::Text.parse(""), Ok(Value::text("")));
        assert_eq!(ColumnKind::Integer.parse(""), Ok(Value::Null));
        assert!(ColumnKind::Integer.parse("abc").is_err());
        assert!(ColumnKind::Date.parse("2024-13-40").is_err());
    }

    #[test]
    fn checkbox_shorthand() {
        let values = CheckboxValues::parse("Y:N").unwrap();
        assert_eq!(values.pick(true), "Y");
        assert_eq!(values.pick(false), "N");
        assert!(CheckboxValues::parse("YN").is_none());
    }

    #[test]
    fn formatted_match_text_requires_flag() {
        let row = Row::new();
        let column = ColumnDescriptor::new("price").with_formatter(|v, _| format!("${}", v));
        assert_eq!(column.match_text(&Value::Int(5), &row), "5");
        assert_eq!(column.format(&Value::Int(5), &row), "$5");

        let column = column.filter_formatted();
        assert_eq!(column.match_text(&Value::Int(5), &row), "$5");
    }

    #[test]
    fn deserializes_with_defaults() {
        let column: ColumnDescriptor = serde_json::from_str(r#"{"name": "id", "is_key": true}"#).unwrap();
        assert!(column.is_key);
        assert!(column.searchable);
        assert!(!column.sortable);
        assert_eq!(column.title(), "id");
        assert_eq!(column.kind, ColumnKind::Text);
    }
}
