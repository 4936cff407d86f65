use std::fs;
use std::path::Path;

use anyhow::Context;
use rowgrid_core::{Row, RowStore, TableConfig};
use serde::Deserialize;

/// On-disk table: configuration plus the initial rows.
#[derive(Debug, Deserialize)]
pub struct TableFile {
    pub settings: TableConfig,

    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TableFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read table file {}", path.display()))?;

        let file: TableFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse table file {}", path.display()))?;

        log::info!(
            "Loaded {} rows and {} columns from {}",
            file.rows.len(),
            file.settings.columns.len(),
            path.display()
        );

        Ok(file)
    }

    pub fn into_store(self) -> anyhow::Result<RowStore> {
        RowStore::new(self.settings, self.rows).context("Invalid table")
    }
}
