use std::collections::HashMap;
use std::fmt;

use crate::column::Column;
use crate::core::error::{Error, Result};
use crate::core::mask::BooleanMask;

/// DataFrame struct: Column-oriented 2D data structure
///
/// Columns are addressable by name and by position. Every operation that
/// changes the shape of the data returns a new frame; column payloads are
/// reference counted, so projecting or renaming never copies row data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: HashMap<String, Column>,
    column_order: Vec<String>,
    row_count: usize,
}

impl DataFrame {
    /// Create a new empty DataFrame
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a DataFrame from `(name, column)` pairs, keeping their order
    pub fn from_columns<S, I>(columns: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Column)>,
    {
        let mut df = Self::new();
        for (name, column) in columns {
            df.add_column(name, column)?;
        }
        Ok(df)
    }

    /// Check if the DataFrame contains a column with the given name
    pub fn contains_column(&self, column_name: &str) -> bool {
        self.columns.contains_key(column_name)
    }

    /// Get the number of rows in the DataFrame
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns in the DataFrame
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    /// Column names in positional order
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    /// Add a column to the DataFrame
    pub fn add_column(&mut self, column_name: impl Into<String>, column: Column) -> Result<()> {
        let column_name = column_name.into();

        if self.contains_column(&column_name) {
            return Err(Error::DuplicateColumnName(column_name));
        }

        // Check length consistency
        if !self.column_order.is_empty() && column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }

        if self.column_order.is_empty() {
            self.row_count = column.len();
        }

        let column = column.with_name(column_name.clone());
        self.column_order.push(column_name.clone());
        self.columns.insert(column_name, column);
        Ok(())
    }

    /// Get a column by name
    pub fn column(&self, column_name: &str) -> Result<&Column> {
        self.columns
            .get(column_name)
            .ok_or_else(|| Error::ColumnNotFound(column_name.to_string()))
    }

    /// Get a column and its name by position
    pub fn column_at(&self, position: usize) -> Result<(&str, &Column)> {
        let name = self
            .column_order
            .get(position)
            .ok_or(Error::IndexOutOfBounds {
                index: position,
                size: self.column_order.len(),
            })?;
        Ok((name.as_str(), self.column(name)?))
    }

    /// Iterate over `(name, column)` pairs in positional order
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &Column)> + '_ {
        self.column_order
            .iter()
            .map(move |name| (name.as_str(), &self.columns[name]))
    }

    /// Filter DataFrame rows using a boolean mask, preserving row order
    pub fn filter_by_mask(&self, mask: &BooleanMask) -> Result<DataFrame> {
        if mask.len() != self.row_count {
            return Err(Error::LengthMismatch {
                expected: self.row_count,
                actual: mask.len(),
            });
        }

        let selected_indices = mask.selected_indices();
        let mut result = DataFrame::new();
        for (name, column) in self.iter_columns() {
            result.add_column(name, column.take(&selected_indices))?;
        }
        // Keep the row count meaningful for frames without columns
        result.row_count = selected_indices.len();

        Ok(result)
    }

    /// Project `(source, output)` pairs into a new frame, in the given order
    pub fn select_columns<S, T>(&self, selection: &[(S, T)]) -> Result<DataFrame>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut result = DataFrame::new();
        for (source, output) in selection {
            let column = self.column(source.as_ref())?.clone();
            result.add_column(output.as_ref(), column)?;
        }
        if selection.is_empty() {
            result.row_count = self.row_count;
        }
        Ok(result)
    }

    /// Rename columns; names missing from `mapping` are kept
    pub fn rename_columns(&self, mapping: &HashMap<String, String>) -> Result<DataFrame> {
        let selection: Vec<(&str, &str)> = self
            .column_order
            .iter()
            .map(|name| {
                let output = mapping.get(name).unwrap_or(name);
                (name.as_str(), output.as_str())
            })
            .collect();
        self.select_columns(&selection)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.column_order.iter().map(|n| n.len()).collect();
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.row_count);

        for row in 0..self.row_count {
            let mut line = Vec::with_capacity(self.column_order.len());
            for (col_idx, (_, column)) in self.iter_columns().enumerate() {
                let value = column.display_value(row).map_err(|_| fmt::Error)?;
                widths[col_idx] = widths[col_idx].max(value.len());
                line.push(value);
            }
            cells.push(line);
        }

        for (name, width) in self.column_order.iter().zip(&widths) {
            write!(f, "{:>width$} ", name, width = width)?;
        }
        writeln!(f)?;
        for line in cells {
            for (value, width) in line.iter().zip(&widths) {
                write!(f, "{:>width$} ", value, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
