mod csv;
mod file;
mod json;
mod table;
mod text;

use rowgrid_core::RowStore;
use std::io::Write;
use thiserror::Error;

pub use csv::CsvExporter;
pub use file::{CsvFileTarget, DEFAULT_CSV_FILE_NAME, write_csv_file};
pub use json::JsonExporter;
pub use table::ExportTable;
pub use text::TextExporter;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export failed: {0}")]
    Failed(String),
}

/// Writes an [`ExportTable`] in one output format.
pub trait Exporter {
    fn name(&self) -> &'static str;

    fn extension(&self) -> &'static str;

    fn export(&self, table: &ExportTable, writer: &mut dyn Write) -> Result<(), ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    JsonPretty,
    JsonCompact,
    Text,
}

impl ExportFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::JsonPretty => "JSON (pretty)",
            Self::JsonCompact => "JSON (compact)",
            Self::Text => "Text",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::JsonPretty | Self::JsonCompact => "json",
            Self::Text => "txt",
        }
    }
}

pub fn export(
    table: &ExportTable,
    format: ExportFormat,
    writer: &mut dyn Write,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => CsvExporter.export(table, writer),
        ExportFormat::JsonPretty => JsonExporter { pretty: true }.export(table, writer),
        ExportFormat::JsonCompact => JsonExporter { pretty: false }.export(table, writer),
        ExportFormat::Text => TextExporter.export(table, writer),
    }
}

/// CSV of every row in the current view, ignoring pagination.
///
/// An empty `columns` list exports the store's visible columns.
pub fn export_csv(
    store: &RowStore,
    columns: &[&str],
    writer: &mut dyn Write,
) -> Result<(), ExportError> {
    let table = ExportTable::from_store(store, columns)?;
    log::debug!(
        "Exporting {} rows x {} columns as CSV",
        table.row_count(),
        table.columns().len()
    );
    CsvExporter.export(&table, writer)
}
