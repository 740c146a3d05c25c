//! Integration tests for loading the bundled sample snapshot.

use std::path::PathBuf;

use approx::assert_relative_eq;
use rankboard_data::{DataError, LoadOutcome, columns, load_csv, load_csv_from_reader};
use rstest::{fixture, rstest};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_snapshot.csv")
}

#[fixture]
fn sample() -> LoadOutcome {
    load_csv(&sample_path()).unwrap()
}

#[rstest]
fn test_sample_counts(sample: LoadOutcome) {
    assert_eq!(sample.rows_read(), 17);
    assert_eq!(sample.records.len(), 15);

    let dropped: Vec<&str> = sample.dropped.iter().map(|d| d.symbol.as_str()).collect();
    assert_eq!(dropped, vec!["MINT", "TRUE"]);
    assert!(sample.dropped.iter().all(|d| d.missing == vec![columns::PE]));
}

#[rstest]
#[case::delta("DELTA")]
#[case::thai_union("TU")]
fn test_missing_dividend_defaults_to_zero(sample: LoadOutcome, #[case] symbol: &str) {
    let record = sample
        .records
        .iter()
        .find(|r| r.symbol == symbol)
        .unwrap();
    assert_eq!(record.dividend_yield, 0.0);
}

#[rstest]
fn test_sample_snapshot(sample: LoadOutcome) {
    let snapshot = sample.snapshot().unwrap();
    assert_eq!(snapshot.len(), 15);
    for column in columns::REQUIRED {
        assert!(snapshot.has_column(column), "missing {column}");
    }
    assert!(!snapshot.has_column("name"));

    let pe = snapshot.values(columns::PE).unwrap();
    assert!(pe.iter().all(Option::is_some));
    assert_relative_eq!(pe[0].unwrap(), 21.3);
}

#[test]
fn test_missing_file() {
    let result = load_csv(&PathBuf::from("does/not/exist.csv"));
    assert!(matches!(result, Err(DataError::Io(_))));
}

#[rstest]
#[case::symbol("symbol")]
#[case::beta("beta")]
#[case::dividend("dividendYield")]
fn test_missing_header(#[case] column: &str) {
    let header: Vec<&str> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|c| *c != column)
        .collect();
    let data = format!("{}\n", header.join(","));

    match load_csv_from_reader(data.as_bytes()) {
        Err(DataError::MissingColumn(name)) => assert_eq!(name, column),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}
