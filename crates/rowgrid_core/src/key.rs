use crate::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Value of a row's key column, usable in hash sets.
///
/// Keys of different variants never match, so `Int(1)` and `Float(1.0)`
/// identify different rows even though they sort together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(Value);

impl RowKey {
    /// Returns `None` for null values, which can never identify a row.
    pub fn new(value: Value) -> Option<Self> {
        if value.is_null() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl PartialEq for RowKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.type_order() == other.0.type_order() && self.0.cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for RowKey {}

impl Hash for RowKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.type_order().hash(state);
        match &self.0 {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Text(s) | Value::Json(s) => s.hash(state),
            Value::Date(d) => d.hash(state),
            Value::DateTime(dt) => dt.hash(state),
        }
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! key_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RowKey {
                fn from(value: $ty) -> Self {
                    Self(Value::from(value))
                }
            }
        )*
    };
}

// None of these convert to `Value::Null`.
key_from!(i64, i32, f64, bool, &str, String);
