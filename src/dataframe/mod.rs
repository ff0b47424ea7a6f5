// DataFrame implementations module
pub mod base;
pub mod query;
pub mod select;

// Re-exports for convenience
pub use base::DataFrame;
pub use query::{QueryExt, Where};
pub use select::{Select, VarSpec};
