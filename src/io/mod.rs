pub mod csv;

// Re-export commonly used functions
pub use self::csv::{read_csv, read_csv_from_reader, write_csv, write_csv_to_writer};
