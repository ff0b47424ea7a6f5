use std::fs;

use panql::config::CsvConfig;
use panql::io::{read_csv, read_csv_from_reader, write_csv, write_csv_to_writer};
use panql::{Column, ColumnType, DataFrame, DataValue, Error, QueryExt, Select};
use tempfile::tempdir;

#[test]
fn test_read_csv_infers_types() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("measurements.csv");
    fs::write(
        &path,
        "subscript,kappa,label,valid\n1,-1.5,a,true\n2,2.0,b,False\n",
    )
    .unwrap();

    let df = read_csv(&path, &CsvConfig::default()).unwrap();

    assert_eq!(df.column_names(), &["subscript", "kappa", "label", "valid"]);
    assert_eq!(df.row_count(), 2);
    assert_eq!(df.column("subscript").unwrap().column_type(), ColumnType::Int64);
    assert_eq!(df.column("kappa").unwrap().column_type(), ColumnType::Float64);
    assert_eq!(df.column("label").unwrap().column_type(), ColumnType::String);
    assert_eq!(df.column("valid").unwrap().column_type(), ColumnType::Boolean);
}

#[test]
fn test_read_csv_without_inference() {
    let config = CsvConfig {
        infer_types: false,
        ..CsvConfig::default()
    };
    let df = read_csv_from_reader("a,b\n1,2\n".as_bytes(), &config).unwrap();

    assert_eq!(df.column("a").unwrap().column_type(), ColumnType::String);
}

#[test]
fn test_read_csv_custom_delimiter() {
    let config = CsvConfig {
        delimiter: ';',
        ..CsvConfig::default()
    };
    let df = read_csv_from_reader("a;b\n1;x\n2;y\n".as_bytes(), &config).unwrap();

    assert_eq!(df.column_names(), &["a", "b"]);
    assert_eq!(
        df.column("b").unwrap().value_at(1).unwrap(),
        DataValue::String("y".to_string())
    );
}

#[test]
fn test_read_empty_csv() {
    let df = read_csv_from_reader("".as_bytes(), &CsvConfig::default()).unwrap();
    assert_eq!(df.column_count(), 0);
    assert_eq!(df.row_count(), 0);
}

#[test]
fn test_read_short_rows_are_padded() {
    let df = read_csv_from_reader("a,b\n1,x\n2\n".as_bytes(), &CsvConfig::default()).unwrap();

    assert_eq!(df.row_count(), 2);
    assert_eq!(
        df.column("b").unwrap().value_at(1).unwrap(),
        DataValue::String(String::new())
    );
}

#[test]
fn test_read_missing_file() {
    let dir = tempdir().unwrap();
    let result = read_csv(dir.path().join("missing.csv"), &CsvConfig::default());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_delimiter_rejected() {
    let config = CsvConfig {
        delimiter: '"',
        ..CsvConfig::default()
    };
    let result = read_csv_from_reader("a\n1\n".as_bytes(), &config);
    assert!(matches!(result, Err(Error::ConfigurationError(_))));
}

#[test]
fn test_write_then_read_filtered_projection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let df = DataFrame::from_columns([
        ("subscript", Column::from(vec![1i64, 1, 2, 2])),
        ("kappa", Column::from(vec![-1.0, 2.0, -3.0, 4.5])),
        ("flag", Column::from(vec![true, false, true, false])),
    ])
    .unwrap();

    let out = Select::new("subscript, kappa as value, flag")
        .unwrap()
        .with_filter("kappa > 0")
        .unwrap()
        .apply(&df)
        .unwrap();
    write_csv(&out, &path, &CsvConfig::default()).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "subscript,value,flag\n1,2.0,false\n2,4.5,false\n");

    let back = read_csv(&path, &CsvConfig::default()).unwrap();
    assert_eq!(back, out);
}

#[test]
fn test_write_without_header() {
    let df = DataFrame::from_columns([("a", Column::from(vec!["x,y", "z"]))]).unwrap();
    let config = CsvConfig {
        has_header: false,
        ..CsvConfig::default()
    };

    let mut buffer = Vec::new();
    write_csv_to_writer(&df, &mut buffer, &config).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), "\"x,y\"\nz\n");
}

#[test]
fn test_query_on_loaded_csv() {
    let df = read_csv_from_reader(
        "c,val\n1,0.5\n10,1.5\n5,2.5\n".as_bytes(),
        &CsvConfig::default(),
    )
    .unwrap();

    let filtered = df.query("(c == 1 or c == 10) and val > 1").unwrap();
    assert_eq!(filtered.row_count(), 1);
}
