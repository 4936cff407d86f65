mod column;
mod config;
mod error;
mod filter;
mod form;
mod hooks;
mod key;
mod pagination;
mod search;
mod selection;
mod sort;
mod store;
mod value;

pub use column::{
    AutoValue, CheckboxValues, ColumnDescriptor, ColumnKind, FormatFn, SortFn, Validator,
};
pub use config::TableConfig;
pub use error::{ConfigError, StoreError};
pub use filter::{ColumnFilter, Comparator, FilterFn, FilterSpec};
pub use form::{DraftValue, InsertPosition, RowDraft, ValidationErrors};
pub use hooks::{
    AfterColumnFilter, AfterDeleteRow, AfterInsertRow, AfterSaveCell, AfterSearch, OnPageChange,
    OnSelect, OnSelectAll, OnSortChange, TableHooks,
};
pub use key::RowKey;
pub use pagination::{
    PAGINATION_SIZE, PageRequest, PaginationSettings, SIZE_PER_PAGE_LIST, page_window,
};
pub use selection::{SelectAllState, SelectMode, SelectionSet, ViewMode};
pub use sort::{SortDirection, SortInfo};
pub use store::RowStore;
pub use value::Value;

pub use chrono;
pub use indexmap;

/// A single table row: column id to cell value, in column order.
pub type Row = indexmap::IndexMap<String, Value>;

/// Build a row from `(column, value)` pairs.
pub fn row_from<K, V>(cells: impl IntoIterator<Item = (K, V)>) -> Row
where
    K: Into<String>,
    V: Into<Value>,
{
    cells
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Parse a JSON object into a row. Non-object values yield `None`.
pub fn row_from_json(json: serde_json::Value) -> Option<Row> {
    match json {
        serde_json::Value::Object(map) => {
            Some(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
        }
        _ => None,
    }
}
