use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use panql::{Column, DataFrame, Result, Select, Where};

fn create_test_dataframe(size: usize) -> Result<DataFrame> {
    let categories = ["A", "B", "C", "D", "E"];
    let mut cat_data = Vec::with_capacity(size);
    let mut int_data = Vec::with_capacity(size);
    let mut float_data = Vec::with_capacity(size);

    for i in 0..size {
        cat_data.push(categories[i % categories.len()].to_string());
        int_data.push((i % 1000) as i64);
        float_data.push((i as f64) * 0.1 - (i % 100) as f64);
    }

    DataFrame::from_columns([
        ("category", Column::from(cat_data)),
        ("value", Column::from(int_data)),
        ("score", Column::from(float_data)),
    ])
}

const FILTER: &str = "(value == 1 or value == 10 or value > 900) and score > 0 and category != 'E'";

fn benchmark_compile(c: &mut Criterion) {
    c.bench_function("compile_where", |b| {
        b.iter(|| black_box(Where::new(black_box(FILTER)).unwrap()));
    });
}

fn benchmark_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_pipeline");
    let select = Select::new("category as cat, score")
        .unwrap()
        .with_filter(FILTER)
        .unwrap();

    for size in [1_000, 10_000, 100_000].iter() {
        let df = create_test_dataframe(*size).unwrap();
        group.bench_with_input(BenchmarkId::new("select_where", size), &df, |b, df| {
            b.iter(|| black_box(select.apply(df).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_compile, benchmark_apply);
criterion_main!(benches);
