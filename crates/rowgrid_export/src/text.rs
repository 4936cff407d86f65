use crate::{ExportError, ExportTable, Exporter};
use std::io::Write;

/// Tab-separated display strings, header first.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn export(&self, table: &ExportTable, writer: &mut dyn Write) -> Result<(), ExportError> {
        if !table.columns().is_empty() {
            writeln!(writer, "{}", table.columns().join("\t"))?;
        }

        for row in table.rows() {
            let fields: Vec<String> = row
                .iter()
                .map(|v| {
                    if v.is_null() {
                        "NULL".to_string()
                    } else {
                        v.as_display_string()
                    }
                })
                .collect();
            writeln!(writer, "{}", fields.join("\t"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowgrid_core::{Value, row_from};

    #[test]
    fn exports_table_as_tsv() {
        let rows = vec![
            row_from([("id", Value::Int(1)), ("name", Value::text("Alice"))]),
            row_from([("id", Value::Int(2)), ("name", Value::Null)]),
        ];
        let table = ExportTable::new(vec!["id".to_string(), "name".to_string()], &rows);

        let mut buf = Vec::new();
        TextExporter.export(&table, &mut buf).unwrap();

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "id\tname");
        assert_eq!(lines[1], "1\tAlice");
        assert_eq!(lines[2], "2\tNULL");
    }

    #[test]
    fn exports_empty_table() {
        let table = ExportTable::new(vec!["x".to_string()], Vec::<&rowgrid_core::Row>::new());

        let mut buf = Vec::new();
        TextExporter.export(&table, &mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "x\n");
    }
}
