//! panql: readable boolean filters and column projections for DataFrames
//!
//! ```
//! use panql::{Column, DataFrame, Select};
//!
//! let df = DataFrame::from_columns([
//!     ("alpha", Column::from(vec![1i64, 2, 3])),
//!     ("kappa", Column::from(vec![-1.0, 0.5, 2.0])),
//! ])
//! .unwrap();
//!
//! let select = Select::new("alpha as a").unwrap().with_filter("kappa > 0").unwrap();
//! let out = select.apply(&df).unwrap();
//! assert_eq!(out.column_names(), &["a"]);
//! assert_eq!(out.row_count(), 2);
//! ```

#![allow(clippy::needless_return)]
#![allow(clippy::redundant_closure)]

// Core module with fundamental data structures
pub mod core;

pub mod column;
pub mod config;
pub mod dataframe;
pub mod html;
pub mod io;

// Re-export core types
pub use core::data_value::DataValue;
pub use core::error::{Error, Result};
pub use core::mask::BooleanMask;

pub use column::{BooleanColumn, Column, ColumnType, Float64Column, Int64Column, StringColumn};
pub use config::PanqlConfig;
pub use dataframe::{DataFrame, QueryExt, Select, VarSpec, Where};
pub use io::{read_csv, write_csv};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
