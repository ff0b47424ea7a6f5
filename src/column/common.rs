use std::fmt;

use crate::column::{BooleanColumn, Float64Column, Int64Column, StringColumn};
use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};
use crate::core::mask::BooleanMask;

/// Enum to identify column types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int64,
    Float64,
    String,
    Boolean,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::String => "string",
            ColumnType::Boolean => "bool",
        };
        f.write_str(name)
    }
}

/// Enum representing a column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int64(Int64Column),
    Float64(Float64Column),
    String(StringColumn),
    Boolean(BooleanColumn),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(col) => col.len(),
            Column::Float64(col) => col.len(),
            Column::String(col) => col.len(),
            Column::Boolean(col) => col.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int64(_) => ColumnType::Int64,
            Column::Float64(_) => ColumnType::Float64,
            Column::String(_) => ColumnType::String,
            Column::Boolean(_) => ColumnType::Boolean,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Column::Int64(col) => col.get_name(),
            Column::Float64(col) => col.get_name(),
            Column::String(col) => col.get_name(),
            Column::Boolean(col) => col.get_name(),
        }
    }

    /// Returns the same column relabelled as `name`
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Column::Int64(col) => col.set_name(name),
            Column::Float64(col) => col.set_name(name),
            Column::String(col) => col.set_name(name),
            Column::Boolean(col) => col.set_name(name),
        }
        self
    }

    /// Gather the rows at `indices`, in that order
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Int64(col) => Column::Int64(col.take(indices)),
            Column::Float64(col) => Column::Float64(col.take(indices)),
            Column::String(col) => Column::String(col.take(indices)),
            Column::Boolean(col) => Column::Boolean(col.take(indices)),
        }
    }

    /// Keep the rows selected by `mask`, preserving their order
    pub fn filter(&self, mask: &BooleanMask) -> Result<Column> {
        if mask.len() != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: mask.len(),
            });
        }
        Ok(self.take(&mask.selected_indices()))
    }

    pub fn value_at(&self, row: usize) -> Result<DataValue> {
        Ok(match self {
            Column::Int64(col) => DataValue::Int64(col.get(row)?),
            Column::Float64(col) => DataValue::Float64(col.get(row)?),
            Column::String(col) => DataValue::String(col.get(row)?.to_string()),
            Column::Boolean(col) => DataValue::Boolean(col.get(row)?),
        })
    }

    pub fn display_value(&self, row: usize) -> Result<String> {
        self.value_at(row).map(|value| value.to_string())
    }
}

impl From<Int64Column> for Column {
    fn from(col: Int64Column) -> Self {
        Column::Int64(col)
    }
}

impl From<Float64Column> for Column {
    fn from(col: Float64Column) -> Self {
        Column::Float64(col)
    }
}

impl From<StringColumn> for Column {
    fn from(col: StringColumn) -> Self {
        Column::String(col)
    }
}

impl From<BooleanColumn> for Column {
    fn from(col: BooleanColumn) -> Self {
        Column::Boolean(col)
    }
}

impl From<Vec<i64>> for Column {
    fn from(data: Vec<i64>) -> Self {
        Column::Int64(Int64Column::new(data))
    }
}

impl From<Vec<f64>> for Column {
    fn from(data: Vec<f64>) -> Self {
        Column::Float64(Float64Column::new(data))
    }
}

impl From<Vec<String>> for Column {
    fn from(data: Vec<String>) -> Self {
        Column::String(StringColumn::new(data))
    }
}

impl From<Vec<&str>> for Column {
    fn from(data: Vec<&str>) -> Self {
        Column::String(StringColumn::new(
            data.into_iter().map(str::to_string).collect(),
        ))
    }
}

impl From<Vec<bool>> for Column {
    fn from(data: Vec<bool>) -> Self {
        Column::Boolean(BooleanColumn::new(data))
    }
}

impl From<BooleanMask> for Column {
    fn from(mask: BooleanMask) -> Self {
        Column::Boolean(BooleanColumn::from_mask(mask))
    }
}
