// Core data structures shared by the column, dataframe and query layers
pub mod data_value;
pub mod error;
pub mod mask;

// Re-exports for convenience
pub use data_value::DataValue;
pub use error::{Error, Result};
pub use mask::BooleanMask;
