use crate::{ExportError, ExportTable, Exporter};
use csv::Writer;
use rowgrid_core::Value;
use std::io::Write;

pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn export(&self, table: &ExportTable, writer: &mut dyn Write) -> Result<(), ExportError> {
        let mut csv_writer = Writer::from_writer(writer);

        csv_writer.write_record(table.columns())?;

        for row in table.rows() {
            for value in row {
                csv_writer.write_field(value_to_csv_field(value))?;
            }
            csv_writer.write_record(None::<&[u8]>)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn value_to_csv_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Float(f) => {
            if f.is_nan() {
                "NaN".to_string()
            } else if f.is_infinite() {
                if f.is_sign_positive() {
                    "Infinity".to_string()
                } else {
                    "-Infinity".to_string()
                }
            } else {
                f.to_string()
            }
        }
        Value::DateTime(dt) => dt.to_rfc3339(),
        other => other.as_display_string(),
    }
}
