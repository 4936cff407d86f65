use crate::{ColumnDescriptor, Row, StoreError, Value};
use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Comparison used by number and date filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl Comparator {
    fn holds<T: PartialOrd>(self, target: &T, operand: &T) -> bool {
        match self {
            Comparator::Eq => target == operand,
            Comparator::Ne => target != operand,
            Comparator::Gt => target > operand,
            Comparator::Ge => target >= operand,
            Comparator::Lt => target < operand,
            Comparator::Le => target <= operand,
        }
    }
}

/// Predicate supplied by the caller for [`ColumnFilter::Custom`].
#[derive(Clone)]
pub struct FilterFn(Arc<dyn Fn(&Value, &Row) -> bool + Send + Sync>);

impl FilterFn {
    pub fn new(f: impl Fn(&Value, &Row) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for FilterFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FilterFn(..)")
    }
}

/// Filter condition for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnFilter {
    /// Case-insensitive substring match.
    Text { value: String },

    /// Exact match against the cell text.
    Select { value: String },

    /// Case-insensitive regular expression.
    Regex { pattern: String },

    Number { comparator: Comparator, value: f64 },

    /// Inclusive on both ends; either end may be open.
    NumberRange { min: Option<f64>, max: Option<f64> },

    Date { comparator: Comparator, date: NaiveDate },

    #[serde(skip)]
    Custom(FilterFn),
}

impl ColumnFilter {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn select(value: impl Into<String>) -> Self {
        Self::Select {
            value: value.into(),
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
        }
    }

    pub fn number(comparator: Comparator, value: f64) -> Self {
        Self::Number { comparator, value }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self::NumberRange { min, max }
    }

    pub fn date(comparator: Comparator, date: NaiveDate) -> Self {
        Self::Date { comparator, date }
    }

    pub fn custom(f: impl Fn(&Value, &Row) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(FilterFn::new(f))
    }
}

/// Active column filters, keyed by column name. All of them must match.
pub type FilterSpec = IndexMap<String, ColumnFilter>;

/// A filter spec checked against the columns, with regexes compiled once.
#[derive(Debug, Clone)]
pub(crate) struct CompiledFilter {
    spec: FilterSpec,
    conditions: Vec<(usize, Condition)>,
}

#[derive(Debug, Clone)]
enum Condition {
    Contains(String),
    Equals(String),
    Matches(Regex),
    Number(Comparator, f64),
    Range(Option<f64>, Option<f64>),
    Date(Comparator, NaiveDate),
    Custom(FilterFn),
}

impl CompiledFilter {
    pub(crate) fn compile(
        spec: FilterSpec,
        columns: &[ColumnDescriptor],
    ) -> Result<Self, StoreError> {
        let mut conditions = Vec::with_capacity(spec.len());

        for (name, filter) in &spec {
            let column_ix = columns
                .iter()
                .position(|c| &c.name == name)
                .ok_or_else(|| StoreError::UnknownColumn(name.clone()))?;

            let condition = match filter {
                ColumnFilter::Text { value } => Condition::Contains(value.to_lowercase()),
                ColumnFilter::Select { value } => Condition::Equals(value.clone()),
                ColumnFilter::Regex { pattern } => {
                    let regex = RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| {
                            StoreError::InvalidFilter(format!("column '{}': {}", name, e))
                        })?;
                    Condition::Matches(regex)
                }
                ColumnFilter::Number { comparator, value } => {
                    if value.is_nan() {
                        return Err(StoreError::InvalidFilter(format!(
                            "column '{}': NaN is not a valid operand",
                            name
                        )));
                    }
                    Condition::Number(*comparator, *value)
                }
                ColumnFilter::NumberRange { min, max } => {
                    if let (Some(lo), Some(hi)) = (min, max) {
                        if lo > hi {
                            return Err(StoreError::InvalidFilter(format!(
                                "column '{}': range minimum {} exceeds maximum {}",
                                name, lo, hi
                            )));
                        }
                    }
                    Condition::Range(*min, *max)
                }
                ColumnFilter::Date { comparator, date } => Condition::Date(*comparator, *date),
                ColumnFilter::Custom(f) => Condition::Custom(f.clone()),
            };

            conditions.push((column_ix, condition));
        }

        Ok(Self { spec, conditions })
    }

    pub(crate) fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub(crate) fn matches(&self, row: &Row, columns: &[ColumnDescriptor]) -> bool {
        self.conditions.iter().all(|(column_ix, condition)| {
            let column = &columns[*column_ix];
            let value = row.get(&column.name).unwrap_or(&Value::Null);
            condition.matches(column, value, row)
        })
    }
}

impl Condition {
    fn matches(&self, column: &ColumnDescriptor, value: &Value, row: &Row) -> bool {
        match self {
            Condition::Contains(needle) => column
                .match_text(value, row)
                .to_lowercase()
                .contains(needle.as_str()),
            Condition::Equals(expected) => column.match_text(value, row) == *expected,
            Condition::Matches(regex) => regex.is_match(&column.match_text(value, row)),
            Condition::Number(comparator, operand) => value
                .as_f64()
                .is_some_and(|target| comparator.holds(&target, operand)),
            Condition::Range(min, max) => value.as_f64().is_some_and(|target| {
                min.is_none_or(|lo| target >= lo) && max.is_none_or(|hi| target <= hi)
            }),
            Condition::Date(comparator, operand) => value
                .as_date()
                .is_some_and(|target| comparator.holds(&target, operand)),
            Condition::Custom(f) => (f.0)(value, row),
        }
    }
}
