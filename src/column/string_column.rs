use std::sync::Arc;

use crate::core::error::{Error, Result};

/// Structure representing a String column
///
/// Rows are stored as shared `Arc<str>` so that row subsets produced by
/// filtering do not copy string payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct StringColumn {
    pub(crate) data: Arc<[Arc<str>]>,
    pub(crate) name: Option<String>,
}

impl StringColumn {
    /// Create a new StringColumn
    pub fn new(data: Vec<String>) -> Self {
        Self {
            data: data.into_iter().map(Arc::from).collect(),
            name: None,
        }
    }

    /// Create a StringColumn with a name
    pub fn with_name(data: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(data)
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

    pub fn get(&self, index: usize) -> Result<&str> {
        self.data
            .get(index)
            .map(|s| s.as_ref())
            .ok_or(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.iter().map(|s| s.as_ref())
    }

    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            data: indices.iter().map(|&i| Arc::clone(&self.data[i])).collect(),
            name: self.name.clone(),
        }
    }
}
