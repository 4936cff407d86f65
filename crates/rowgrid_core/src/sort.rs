use crate::{ColumnDescriptor, Row, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Column with sort direction, as last requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInfo {
    pub field: String,
    pub direction: SortDirection,
}

impl SortInfo {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Compare two rows on one column, using its custom comparator when present.
///
/// A missing field sorts like a null.
pub(crate) fn compare_rows(
    column: &ColumnDescriptor,
    a: &Row,
    b: &Row,
    direction: SortDirection,
) -> Ordering {
    if let Some(sort_fn) = &column.sort_fn {
        return sort_fn.compare(a, b, direction);
    }

    let val_a = a.get(&column.name).unwrap_or(&Value::Null);
    let val_b = b.get(&column.name).unwrap_or(&Value::Null);
    direction.apply(val_a.cmp(val_b))
}
