use crate::core::error::Result;
use crate::core::mask::BooleanMask;

/// Structure representing a boolean column (stored as a packed mask)
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanColumn {
    pub(crate) data: BooleanMask,
    pub(crate) name: Option<String>,
}

impl BooleanColumn {
    /// Create a new BooleanColumn from a vector of booleans
    pub fn new(data: Vec<bool>) -> Self {
        Self {
            data: BooleanMask::new(&data),
            name: None,
        }
    }

    /// Create a named BooleanColumn
    pub fn with_name(data: Vec<bool>, name: impl Into<String>) -> Self {
        Self {
            data: BooleanMask::new(&data),
            name: Some(name.into()),
        }
    }

    /// Wrap an existing mask without copying it
    pub fn from_mask(mask: BooleanMask) -> Self {
        Self {
            data: mask,
            name: None,
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

    pub fn get(&self, index: usize) -> Result<bool> {
        self.data.get(index)
    }

    /// The underlying mask
    pub fn mask(&self) -> &BooleanMask {
        &self.data
    }

    pub fn take(&self, indices: &[usize]) -> Self {
        let bools: Vec<bool> = indices.iter().map(|&i| self.data.bit(i)).collect();
        Self {
            data: BooleanMask::new(&bools),
            name: self.name.clone(),
        }
    }
}
