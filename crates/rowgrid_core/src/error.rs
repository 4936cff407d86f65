use crate::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate row key: {0}")]
    DuplicateKey(String),

    #[error("Row has no value for key column '{0}'")]
    MissingKey(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column is not sortable: {0}")]
    NotSortable(String),

    #[error("Column is not editable: {0}")]
    NotEditable(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid page {page} with size {size}: both must be at least 1")]
    InvalidPage { page: usize, size: usize },

    #[error("Row index {index} out of range for view of {len} rows")]
    RowIndexOutOfRange { index: usize, len: usize },

    #[error("Form validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid table configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Table has no columns")]
    NoColumns,

    #[error("No key column defined; mark one column with is_key or set key_field")]
    NoKeyColumn,

    #[error("Multiple key columns defined: {}", .0.join(", "))]
    MultipleKeyColumns(Vec<String>),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Key field '{0}' does not name a column")]
    UnknownKeyField(String),

    #[error("Page sizes must be at least 1")]
    InvalidPageSize,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}
