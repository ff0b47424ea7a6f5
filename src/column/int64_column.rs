use std::sync::Arc;

use crate::core::error::{Error, Result};

/// Structure representing an Int64 column
#[derive(Debug, Clone, PartialEq)]
pub struct Int64Column {
    pub(crate) data: Arc<[i64]>,
    pub(crate) name: Option<String>,
}

impl Int64Column {
    /// Create a new Int64Column
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data: data.into(),
            name: None,
        }
    }

    /// Create an Int64Column with a name
    pub fn with_name(data: Vec<i64>, name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            name: Some(name.into()),
        }
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get the name
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get data at the specified index
    pub fn get(&self, index: usize) -> Result<i64> {
        self.data.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            size: self.data.len(),
        })
    }

    pub fn values(&self) -> &[i64] {
        &self.data
    }

    /// Gather the rows at `indices`, in that order
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            data: indices.iter().map(|&i| self.data[i]).collect(),
            name: self.name.clone(),
        }
    }
}
