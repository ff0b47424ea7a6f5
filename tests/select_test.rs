use panql::{Column, DataFrame, DataValue, Error, QueryExt, Select, VarSpec};

fn scenario() -> DataFrame {
    DataFrame::from_columns([
        ("subscript", Column::from(vec![1i64, 1, 2, 2])),
        ("kappa", Column::from(vec![-1i64, 2, -3, 4])),
    ])
    .unwrap()
}

fn rows(df: &DataFrame) -> Vec<Vec<DataValue>> {
    (0..df.row_count())
        .map(|row| {
            df.iter_columns()
                .map(|(_, column)| column.value_at(row).unwrap())
                .collect()
        })
        .collect()
}

#[test]
fn test_filtered_projection_scenario() {
    let select = Select::new("subscript, kappa as value")
        .unwrap()
        .with_filter("kappa > 0")
        .unwrap();
    let out = select.apply(&scenario()).unwrap();

    assert_eq!(out.column_names(), &["subscript", "value"]);
    assert_eq!(
        rows(&out),
        vec![
            vec![DataValue::Int64(1), DataValue::Int64(2)],
            vec![DataValue::Int64(2), DataValue::Int64(4)],
        ]
    );
}

#[test]
fn test_projection_without_filter_keeps_rows() {
    let df = scenario();
    let out = Select::new("kappa, subscript").unwrap().apply(&df).unwrap();

    assert_eq!(out.column_names(), &["kappa", "subscript"]);
    assert_eq!(out.row_count(), df.row_count());
    assert_eq!(out.column("kappa").unwrap(), df.column("kappa").unwrap());
    assert_eq!(
        out.column("subscript").unwrap(),
        df.column("subscript").unwrap()
    );
}

#[test]
fn test_rename() {
    let df = DataFrame::from_columns([
        ("a", Column::from(vec![3i64, 1, 2])),
        ("b", Column::from(vec!["x", "y", "z"])),
        ("c", Column::from(vec![0.1, 0.2, 0.3])),
    ])
    .unwrap();

    let out = Select::new("a as x, b").unwrap().apply(&df).unwrap();

    assert_eq!(out.column_names(), &["x", "b"]);
    for row in 0..df.row_count() {
        assert_eq!(
            out.column("x").unwrap().value_at(row).unwrap(),
            df.column("a").unwrap().value_at(row).unwrap()
        );
        assert_eq!(
            out.column("b").unwrap().value_at(row).unwrap(),
            df.column("b").unwrap().value_at(row).unwrap()
        );
    }
}

#[test]
fn test_filter_runs_before_projection() {
    let df = DataFrame::from_columns([
        ("a", Column::from(vec![1i64, 2, 3])),
        ("b", Column::from(vec![-1i64, 1, 1])),
    ])
    .unwrap();

    let out = Select::new("a")
        .unwrap()
        .with_filter("b > 0")
        .unwrap()
        .apply(&df)
        .unwrap();

    assert_eq!(out.column_names(), &["a"]);
    assert!(!out.contains_column("b"));
    assert_eq!(out.row_count(), 2);
}

#[test]
fn test_chained_filters_compose() {
    let df = scenario();
    let out = Select::new("kappa")
        .unwrap()
        .with_filter("kappa > 0")
        .unwrap()
        .with_filter("subscript == 2")
        .unwrap()
        .apply(&df)
        .unwrap();

    assert_eq!(rows(&out), vec![vec![DataValue::Int64(4)]]);
}

#[test]
fn test_missing_selected_column() {
    match Select::new("nonexistent").unwrap().apply(&scenario()) {
        Err(Error::ColumnNotFound(name)) => assert_eq!(name, "nonexistent"),
        other => panic!("expected ColumnNotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_filter_column() {
    let select = Select::new("kappa").unwrap().with_filter("missing == 1").unwrap();
    assert!(matches!(
        select.apply(&scenario()),
        Err(Error::ColumnNotFound(_))
    ));
}

#[test]
fn test_malformed_selection() {
    assert!(matches!(
        Select::new("a as b as c"),
        Err(Error::MalformedSelectionEntry(_))
    ));
    assert!(matches!(
        Select::new("kappa,,subscript"),
        Err(Error::MalformedSelectionEntry(_))
    ));
}

#[test]
fn test_filter_syntax_error() {
    let select = Select::new("kappa").unwrap();
    assert!(matches!(
        select.with_filter("kappa >> 0"),
        Err(Error::Syntax { .. })
    ));
}

#[test]
fn test_apply_is_idempotent() {
    let df = scenario();
    let select = Select::new("subscript as s")
        .unwrap()
        .with_filter("kappa > 0 or subscript == 1")
        .unwrap();

    let first = select.apply(&df).unwrap();
    let second = select.apply(&df).unwrap();

    assert_eq!(first, second);
    assert_eq!(df, scenario());
}

#[test]
fn test_query_ext_select() {
    let out = scenario().select("kappa as k").unwrap();
    assert_eq!(out.column_names(), &["k"]);
    assert_eq!(out.row_count(), 4);
}

#[test]
fn test_var_spec_parse() {
    let spec = VarSpec::parse("  kappa as value ").unwrap();
    assert_eq!(spec.name(), "kappa");
    assert_eq!(spec.alias(), Some("value"));
    assert_eq!(spec.output_name(), "value");
    assert_eq!(spec.to_string(), "kappa as value");

    let plain = VarSpec::parse("kappa").unwrap();
    assert_eq!(plain.alias(), None);
    assert_eq!(plain.output_name(), "kappa");
}

#[test]
fn test_select_column_named_as() {
    let df = DataFrame::from_columns([
        ("as", Column::from(vec![1i64, 2, 3])),
        ("kappa", Column::from(vec![-1i64, 2, 3])),
    ])
    .unwrap();

    let out = Select::new("as").unwrap().apply(&df).unwrap();
    assert_eq!(out.column_names(), &["as"]);
    assert_eq!(out.row_count(), 3);

    let out = Select::new("as as first, kappa")
        .unwrap()
        .with_filter("kappa > 0")
        .unwrap()
        .apply(&df)
        .unwrap();
    assert_eq!(out.column_names(), &["first", "kappa"]);
    assert_eq!(rows(&out)[0], vec![DataValue::Int64(2), DataValue::Int64(2)]);
}
