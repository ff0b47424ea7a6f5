use std::sync::Arc;

use crate::core::error::{Error, Result};

/// Structure representing a Float64 column
#[derive(Debug, Clone, PartialEq)]
pub struct Float64Column {
    pub(crate) data: Arc<[f64]>,
    pub(crate) name: Option<String>,
}

impl Float64Column {
    /// Create a new Float64Column
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: data.into(),
            name: None,
        }
    }

    /// Create a Float64Column with a name
    pub fn with_name(data: Vec<f64>, name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            name: Some(name.into()),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        self.data.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            size: self.data.len(),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            data: indices.iter().map(|&i| self.data[i]).collect(),
            name: self.name.clone(),
        }
    }
}
