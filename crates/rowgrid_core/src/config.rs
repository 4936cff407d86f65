use crate::{
    ColumnDescriptor, ConfigError, PaginationSettings, SelectMode, SortInfo, TableHooks, Value,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Everything a table needs to build its row store.
///
/// Hooks on columns (comparators, formatters, validators) are attached in code
/// after loading; the rest round-trips through JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableConfig {
    pub columns: Vec<ColumnDescriptor>,

    /// Table-level key designation, alternative to `is_key` on a column.
    #[serde(default)]
    pub key_field: Option<String>,

    #[serde(default)]
    pub pagination: PaginationSettings,

    /// Split search text on whitespace and match any term.
    #[serde(default)]
    pub multi_column_search: bool,

    #[serde(default)]
    pub select_mode: SelectMode,

    /// Keys selected when the store is created.
    #[serde(default)]
    pub selected: Vec<Value>,

    /// Sort applied when the store is created.
    #[serde(default)]
    pub default_sort: Option<SortInfo>,

    #[serde(default)]
    pub csv_file_name: Option<String>,

    #[serde(skip)]
    pub hooks: TableHooks,
}

impl TableConfig {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = Some(field.into());
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationSettings) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_multi_column_search(mut self, enabled: bool) -> Self {
        self.multi_column_search = enabled;
        self
    }

    pub fn with_select_mode(mut self, mode: SelectMode) -> Self {
        self.select_mode = mode;
        self
    }

    pub fn with_selected(mut self, keys: Vec<Value>) -> Self {
        self.selected = keys;
        self
    }

    pub fn with_default_sort(mut self, sort: SortInfo) -> Self {
        self.default_sort = Some(sort);
        self
    }

    pub fn with_hooks(mut self, hooks: TableHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_csv_file_name(mut self, name: impl Into<String>) -> Self {
        self.csv_file_name = Some(name.into());
        self
    }

    /// Load a table configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check the configuration and resolve the key field.
    pub fn validate(&self) -> Result<String, ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ConfigError::DuplicateColumn(column.name.clone()));
            }
        }

        let marked: Vec<&str> = self
            .columns
            .iter()
            .filter(|c| c.is_key)
            .map(|c| c.name.as_str())
            .collect();

        let key_field = match (self.key_field.as_deref(), marked.as_slice()) {
            (None, []) => return Err(ConfigError::NoKeyColumn),
            (None, [only]) => only.to_string(),
            (Some(field), []) => field.to_string(),
            (Some(field), [only]) if field == *only => field.to_string(),
            (table_level, marked) => {
                let mut names: Vec<String> = table_level.map(str::to_string).into_iter().collect();
                names.extend(
                    marked
                        .iter()
                        .filter(|name| Some(**name) != table_level)
                        .map(|name| name.to_string()),
                );
                return Err(ConfigError::MultipleKeyColumns(names));
            }
        };

        if self.column(&key_field).is_none() {
            return Err(ConfigError::UnknownKeyField(key_field));
        }

        let pagination = &self.pagination;
        if pagination.size_per_page == Some(0) || pagination.size_per_page_list.contains(&0) {
            return Err(ConfigError::InvalidPageSize);
        }

        Ok(key_field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id"),
            ColumnDescriptor::new("name"),
        ]
    }

    #[test]
    fn resolves_key_from_column_flag() {
        let config = TableConfig::new(vec![
            ColumnDescriptor::key("id"),
            ColumnDescriptor::new("name"),
        ]);
        assert_eq!(config.validate().unwrap(), "id");
    }

    #[test]
    fn resolves_key_from_table_field() {
        let config = TableConfig::new(columns()).with_key_field("name");
        assert_eq!(config.validate().unwrap(), "name");
    }

    #[test]
    fn rejects_missing_key() {
        let config = TableConfig::new(columns());
        assert!(matches!(config.validate(), Err(ConfigError::NoKeyColumn)));
    }

    #[test]
    fn rejects_multiple_keys() {
        let config = TableConfig::new(vec![
            ColumnDescriptor::key("id"),
            ColumnDescriptor::key("name"),
        ]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MultipleKeyColumns(names)) if names == vec!["id", "name"]
        ));

        let config = TableConfig::new(vec![
            ColumnDescriptor::key("id"),
            ColumnDescriptor::new("name"),
        ])
        .with_key_field("name");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MultipleKeyColumns(_))
        ));
    }

    #[test]
    fn same_key_declared_twice_is_fine() {
        let config = TableConfig::new(vec![
            ColumnDescriptor::key("id"),
            ColumnDescriptor::new("name"),
        ])
        .with_key_field("id");
        assert_eq!(config.validate().unwrap(), "id");
    }

    #[test]
    fn rejects_unknown_key_field_and_duplicates() {
        let config = TableConfig::new(columns()).with_key_field("sku");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownKeyField(field)) if field == "sku"
        ));

        let config = TableConfig::new(vec![
            ColumnDescriptor::key("id"),
            ColumnDescriptor::new("id"),
        ]);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateColumn(_))));

        assert!(matches!(
            TableConfig::default().validate(),
            Err(ConfigError::NoColumns)
        ));
    }

    #[test]
    fn rejects_zero_page_size() {
        let config = TableConfig::new(vec![ColumnDescriptor::key("id")])
            .with_pagination(PaginationSettings::enabled().with_size_per_page(0));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPageSize)));
    }

    #[test]
    fn saves_and_loads_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("table.json");

        let config = TableConfig::new(vec![
            ColumnDescriptor::key("id").sortable(),
            ColumnDescriptor::new("name").with_title("Product"),
        ])
        .with_pagination(PaginationSettings::enabled().with_size_per_page(25))
        .with_default_sort(SortInfo::desc("id"))
        .with_csv_file_name("products.csv");
        config.save(&path).expect("save");

        let loaded = TableConfig::load(&path).expect("load");
        assert_eq!(loaded.columns.len(), 2);
        assert_eq!(loaded.columns[1].title(), "Product");
        assert_eq!(loaded.pagination.initial_size(), 25);
        assert_eq!(loaded.default_sort, Some(SortInfo::desc("id")));
        assert_eq!(loaded.csv_file_name.as_deref(), Some("products.csv"));
        assert_eq!(loaded.validate().unwrap(), "id");
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write");

        assert!(matches!(TableConfig::load(&path), Err(ConfigError::Parse(_))));
        assert!(matches!(
            TableConfig::load(&dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
