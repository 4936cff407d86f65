use crate::{ExportError, ExportTable, Exporter};
use rowgrid_core::Value;
use std::io::Write;

pub struct JsonExporter {
    pub pretty: bool,
}

impl Exporter for JsonExporter {
    fn name(&self) -> &'static str {
        if self.pretty {
            "JSON (pretty)"
        } else {
            "JSON (compact)"
        }
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn export(&self, table: &ExportTable, writer: &mut dyn Write) -> Result<(), ExportError> {
        let json_value = rows_to_json_array(table);

        if self.pretty {
            serde_json::to_writer_pretty(writer, &json_value)?;
        } else {
            serde_json::to_writer(writer, &json_value)?;
        }

        Ok(())
    }
}

fn rows_to_json_array(table: &ExportTable) -> serde_json::Value {
    serde_json::Value::Array(
        table
            .rows()
            .iter()
            .map(|row| row_to_json_object(table.columns(), row))
            .collect(),
    )
}

fn row_to_json_object(columns: &[String], row: &[Value]) -> serde_json::Value {
    let mut map = serde_json::Map::new();

    for (column, value) in columns.iter().zip(row.iter()) {
        map.insert(column.clone(), serde_json::Value::from(value));
    }

    serde_json::Value::Object(map)
}
