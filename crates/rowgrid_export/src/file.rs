use crate::{ExportError, export_csv};
use rowgrid_core::RowStore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_CSV_FILE_NAME: &str = "spreadsheet.csv";

/// File name a CSV export is saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFileTarget {
    file_name: String,
}

impl CsvFileTarget {
    /// Blank or missing names fall back to `spreadsheet.csv`; a `.csv`
    /// extension is appended when absent.
    pub fn resolve(file_name: Option<&str>) -> Self {
        let trimmed = file_name.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Self {
                file_name: DEFAULT_CSV_FILE_NAME.to_string(),
            };
        }

        let file_name = if trimmed.to_ascii_lowercase().ends_with(".csv") {
            trimmed.to_string()
        } else {
            format!("{}.csv", trimmed)
        };

        Self { file_name }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// Export the store's full view as CSV into `dir`.
///
/// Without an explicit `file_name` the store's configured CSV name is used.
/// Returns the path written.
pub fn write_csv_file(
    store: &RowStore,
    columns: &[&str],
    dir: &Path,
    file_name: Option<&str>,
) -> Result<PathBuf, ExportError> {
    let target = CsvFileTarget::resolve(file_name.or(store.csv_file_name()));
    let path = target.path_in(dir);

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    export_csv(store, columns, &mut writer)?;
    writer.flush()?;

    log::info!("Exported {} rows to {}", store.data_num(), path.display());
    Ok(path)
}
