use crate::ExportError;
use rowgrid_core::{Row, RowStore, Value};

/// Rows projected onto a fixed column list, ready to be written out.
///
/// Headers are column ids. A row without a value for a column exports a null.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ExportTable {
    pub fn new<'a>(columns: Vec<String>, rows: impl IntoIterator<Item = &'a Row>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// The whole filtered and sorted view, without the page slice.
    pub fn from_store(store: &RowStore, columns: &[&str]) -> Result<Self, ExportError> {
        let columns = resolve_columns(store, columns)?;
        Ok(Self::new(columns, store.data_ignoring_pagination()))
    }

    /// Only the rows `get()` returns, so the current page when paginated.
    pub fn from_page(store: &RowStore, columns: &[&str]) -> Result<Self, ExportError> {
        let columns = resolve_columns(store, columns)?;
        Ok(Self::new(columns, store.get()))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn resolve_columns(store: &RowStore, columns: &[&str]) -> Result<Vec<String>, ExportError> {
    if columns.is_empty() {
        return Ok(store
            .visible_columns()
            .into_iter()
            .map(str::to_string)
            .collect());
    }

    columns
        .iter()
        .map(|name| match store.column(name) {
            Some(column) => Ok(column.name.clone()),
            None => Err(ExportError::Failed(format!("Unknown column: {}", name))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowgrid_core::row_from;

    #[test]
    fn missing_fields_become_null() {
        let rows = vec![
            row_from([("id", Value::Int(1)), ("name", Value::text("Lamp"))]),
            row_from([("id", Value::Int(2))]),
        ];

        let table = ExportTable::new(vec!["name".to_string(), "id".to_string()], &rows);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0], vec![Value::text("Lamp"), Value::Int(1)]);
        assert_eq!(table.rows()[1], vec![Value::Null, Value::Int(2)]);
    }
}
