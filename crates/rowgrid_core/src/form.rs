use crate::{ColumnDescriptor, Row, Value};
use indexmap::IndexMap;
use std::fmt;

/// Raw input for one field of the insert form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValue {
    Text(String),
    Checked(bool),
}

/// Unparsed insert-form input, keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct RowDraft {
    values: IndexMap<String, DraftValue>,
}

impl RowDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(field.into(), DraftValue::Text(value.into()));
        self
    }

    pub fn checked(mut self, field: impl Into<String>, checked: bool) -> Self {
        self.values.insert(field.into(), DraftValue::Checked(checked));
        self
    }

    pub fn get(&self, field: &str) -> Option<&DraftValue> {
        self.values.get(field)
    }
}

/// Per-field validation messages, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(IndexMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn push(&mut self, field: &str, message: String) {
        self.0.insert(field.to_string(), message);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Turn a draft into a row: auto values first, then checkbox mapping,
/// parsing by column kind, and finally the column validator.
///
/// Every column is visited so all problems are reported at once.
pub(crate) fn build_row(
    columns: &[ColumnDescriptor],
    draft: &RowDraft,
) -> Result<Row, ValidationErrors> {
    let mut row = Row::with_capacity(columns.len());
    let mut errors = ValidationErrors::default();

    for column in columns {
        if let Some(auto_value) = &column.auto_value {
            row.insert(column.name.clone(), auto_value.generate());
            continue;
        }

        let raw = match (draft.get(&column.name), &column.checkbox) {
            (Some(DraftValue::Checked(checked)), Some(values)) => {
                values.pick(*checked).to_string()
            }
            (Some(DraftValue::Checked(checked)), None) => checked.to_string(),
            (Some(DraftValue::Text(text)), _) => text.clone(),
            (None, Some(values)) => values.pick(false).to_string(),
            (None, None) => String::new(),
        };

        let value = match column.kind.parse(&raw) {
            Ok(value) => value,
            Err(message) => {
                errors.push(&column.name, message);
                continue;
            }
        };

        if let Some(validator) = &column.validator {
            if let Err(message) = validator.validate(&value) {
                errors.push(&column.name, message);
                continue;
            }
        }

        row.insert(column.name.clone(), value);
    }

    if errors.is_empty() {
        Ok(row)
    } else {
        log::debug!("Insert form rejected: {}", errors);
        Err(errors)
    }
}

/// Where `insert_draft` places the new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    #[default]
    End,
    Begin,
}

impl From<&Value> for DraftValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => DraftValue::Checked(*b),
            other => DraftValue::Text(other.as_display_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CheckboxValues, ColumnKind};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn columns() -> Vec<ColumnDescriptor> {
        let next_id = Arc::new(AtomicI64::new(100));
        vec![
            ColumnDescriptor::key("id")
                .with_kind(ColumnKind::Integer)
                .with_auto_value(move || Value::Int(next_id.fetch_add(1, Ordering::SeqCst))),
            ColumnDescriptor::new("name").with_validator(|v| {
                if v.as_display_string().trim().is_empty() {
                    Err("Name is required".to_string())
                } else {
                    Ok(())
                }
            }),
            ColumnDescriptor::new("price").with_kind(ColumnKind::Float),
            ColumnDescriptor::new("in_stock")
                .with_checkbox(CheckboxValues::parse("Y:N").unwrap()),
        ]
    }

    #[test]
    fn builds_row_from_draft() {
        let draft = RowDraft::new()
            .text("name", "Lamp")
            .text("price", "19.5")
            .checked("in_stock", true);

        let row = build_row(&columns(), &draft).unwrap();
        assert_eq!(row["id"], Value::Int(100));
        assert_eq!(row["name"], Value::text("Lamp"));
        assert_eq!(row["price"], Value::Float(19.5));
        assert_eq!(row["in_stock"], Value::text("Y"));
    }

    #[test]
    fn unchecked_checkbox_uses_second_value() {
        let draft = RowDraft::new().text("name", "Lamp");
        let row = build_row(&columns(), &draft).unwrap();
        assert_eq!(row["in_stock"], Value::text("N"));
        assert_eq!(row["price"], Value::Null);
    }

    #[test]
    fn collects_every_error() {
        let draft = RowDraft::new().text("name", "  ").text("price", "cheap");

        let errors = build_row(&columns(), &draft).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("price"), Some("'cheap' is not a number"));
        assert!(errors.to_string().starts_with("name: Name is required"));
    }
}
