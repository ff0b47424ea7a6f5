use std::fmt::{self, Display};

use crate::column::ColumnType;

/// A single cell value read out of a column
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Int64(i64),
    Float64(f64),
    String(String),
    Boolean(bool),
}

impl DataValue {
    /// Returns the column type this value belongs to
    pub fn column_type(&self) -> ColumnType {
        match self {
            DataValue::Int64(_) => ColumnType::Int64,
            DataValue::Float64(_) => ColumnType::Float64,
            DataValue::String(_) => ColumnType::String,
            DataValue::Boolean(_) => ColumnType::Boolean,
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Int64(v) => Some(*v as f64),
            DataValue::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Int64(v) => write!(f, "{}", v),
            DataValue::Float64(v) => write!(f, "{}", v),
            DataValue::String(v) => write!(f, "{}", v),
            DataValue::Boolean(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        DataValue::Int64(v)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Float64(v)
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        DataValue::Boolean(v)
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        DataValue::String(v.to_string())
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        DataValue::String(v)
    }
}
