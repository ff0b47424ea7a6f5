use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::column::{BooleanColumn, Column, Float64Column, Int64Column, StringColumn};
use crate::config::validation::validate_csv_config;
use crate::config::CsvConfig;
use crate::core::error::{Error, Result};
use crate::core::DataValue;
use crate::DataFrame;

/// Read a DataFrame from a CSV file
pub fn read_csv<P: AsRef<Path>>(path: P, config: &CsvConfig) -> Result<DataFrame> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    let df = read_csv_from_reader(file, config)?;

    log::info!(
        "read {} rows x {} columns from {}",
        df.row_count(),
        df.column_count(),
        path.as_ref().display()
    );
    Ok(df)
}

/// Read a DataFrame from any CSV byte source
pub fn read_csv_from_reader<R: Read>(reader: R, config: &CsvConfig) -> Result<DataFrame> {
    let delimiter = delimiter_byte(config)?;

    // Set up the CSV reader
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(config.has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result.map_err(Error::Csv)?);
    }

    // Get the header row
    let headers: Vec<String> = if config.has_header {
        rdr.headers()
            .map_err(Error::Csv)?
            .iter()
            .map(|h| h.to_string())
            .collect()
    } else {
        // Without a header, name columns "column_0", "column_1", etc. after the first row
        match records.first() {
            Some(first) => (0..first.len()).map(|i| format!("column_{}", i)).collect(),
            None => return Ok(DataFrame::new()),
        }
    };

    if headers.is_empty() {
        return Ok(DataFrame::new());
    }

    // Collect data for each column
    let mut cells: Vec<Vec<String>> = vec![Vec::with_capacity(records.len()); headers.len()];
    for record in &records {
        for (i, column) in cells.iter_mut().enumerate() {
            // Short rows are padded with empty cells
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let mut df = DataFrame::new();
    for (name, values) in headers.into_iter().zip(cells) {
        let column = if config.infer_types {
            infer_column(&name, values)
        } else {
            Column::String(StringColumn::new(values))
        };
        df.add_column(name, column)?;
    }

    Ok(df)
}

/// Write a DataFrame to a CSV file
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P, config: &CsvConfig) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    write_csv_to_writer(df, file, config)?;

    log::info!(
        "wrote {} rows x {} columns to {}",
        df.row_count(),
        df.column_count(),
        path.as_ref().display()
    );
    Ok(())
}

/// Write a DataFrame as CSV into any byte sink
pub fn write_csv_to_writer<W: Write>(df: &DataFrame, writer: W, config: &CsvConfig) -> Result<()> {
    let delimiter = delimiter_byte(config)?;
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_writer(writer);

    // Write the header row
    if config.has_header {
        wtr.write_record(df.column_names()).map_err(Error::Csv)?;
    }

    // Write each row of data
    let mut row = Vec::with_capacity(df.column_count());
    for i in 0..df.row_count() {
        row.clear();
        for (_, column) in df.iter_columns() {
            row.push(format_cell(column.value_at(i)?));
        }
        wtr.write_record(&row).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}

fn delimiter_byte(config: &CsvConfig) -> Result<u8> {
    validate_csv_config(config)?;
    // validated as ASCII above
    Ok(config.delimiter as u8)
}

/// Floats keep a decimal point so they read back as floats
fn format_cell(value: DataValue) -> String {
    match value {
        DataValue::Float64(v) => format!("{:?}", v),
        other => other.to_string(),
    }
}

/// Pick the narrowest column type every cell parses as: i64, f64, bool, then string
fn infer_column(name: &str, values: Vec<String>) -> Column {
    if values.is_empty() {
        return Column::String(StringColumn::new(values));
    }

    if let Some(ints) = parse_all(&values, |s| s.parse::<i64>().ok()) {
        return Column::Int64(Int64Column::new(ints));
    }

    if let Some(floats) = parse_all(&values, |s| s.parse::<f64>().ok()) {
        return Column::Float64(Float64Column::new(floats));
    }

    if let Some(bools) = parse_all(&values, parse_bool) {
        return Column::Boolean(BooleanColumn::new(bools));
    }

    let numeric = values.iter().filter(|s| s.parse::<f64>().is_ok()).count();
    if numeric > 0 {
        log::warn!(
            "column '{}' has {} numeric cells out of {}; keeping it as strings",
            name,
            numeric,
            values.len()
        );
    }

    Column::String(StringColumn::new(values))
}

fn parse_all<T>(values: &[String], parse: impl Fn(&str) -> Option<T>) -> Option<Vec<T>> {
    values.iter().map(|s| parse(s)).collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
