// Compiled filters and pipelines are shared read-only across threads
use panql::{Column, DataFrame, Select, Where};
use std::sync::{Arc, Barrier};
use std::thread;

fn frame_for(thread_id: i64, rows: i64) -> DataFrame {
    DataFrame::from_columns([
        ("id", Column::from((0..rows).collect::<Vec<_>>())),
        (
            "kappa",
            Column::from((0..rows).map(|i| (i + thread_id) % 3 - 1).collect::<Vec<_>>()),
        ),
    ])
    .unwrap()
}

#[test]
fn test_shared_pipeline_across_threads() {
    let num_threads = 8;
    let rows = 1000;
    let barrier = Arc::new(Barrier::new(num_threads));
    let select = Arc::new(
        Select::new("id as row, kappa")
            .unwrap()
            .with_filter("kappa > 0 or id == 0")
            .unwrap(),
    );

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let barrier = barrier.clone();
            let select = select.clone();
            thread::spawn(move || {
                let df = frame_for(thread_id as i64, rows);

                // Wait for all threads to be ready
                barrier.wait();

                let first = select.apply(&df).unwrap();
                let second = select.apply(&df).unwrap();
                assert_eq!(first, second);
                assert_eq!(first.column_names(), &["row", "kappa"]);

                let expected = (0..rows)
                    .filter(|&i| (i + thread_id as i64) % 3 - 1 > 0 || i == 0)
                    .count();
                assert_eq!(first.row_count(), expected);
            })
        })
        .collect();

    // Wait for all threads to complete
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_where_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Where>();
    assert_send_sync::<Select>();
    assert_send_sync::<DataFrame>();
}

#[test]
fn test_one_frame_many_predicates() {
    let df = Arc::new(frame_for(0, 300));
    let sources = ["kappa == -1", "kappa == 0", "kappa == 1"];

    let counts: Vec<usize> = sources
        .iter()
        .map(|source| {
            let df = df.clone();
            let predicate = Where::new(source).unwrap();
            thread::spawn(move || predicate.apply(&df).unwrap().row_count())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(counts, vec![100, 100, 100]);
    assert_eq!(counts.iter().sum::<usize>(), df.row_count());
}
