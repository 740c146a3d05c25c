//! Integration tests for the factor score engine.

use approx::assert_abs_diff_eq;
use polars::prelude::*;
use rankboard_data::{SecurityRecord, Snapshot, columns};
use rankboard_factors::{
    DegeneratePolicy, EngineConfig, FactorError, FactorScoreEngine, ScoredTable, rank_column,
    score_columns,
};
use rstest::{fixture, rstest};

fn record(symbol: &str, metrics: [f64; 8]) -> SecurityRecord {
    let [mcap, pe, pb, dividend, ytd, de, roe, beta] = metrics;
    SecurityRecord {
        symbol: symbol.to_string(),
        market_capitalization: mcap,
        price_to_earnings: pe,
        price_to_book: pb,
        dividend_yield: dividend,
        year_to_date_return: ytd,
        debt_to_equity: de,
        return_on_equity: roe,
        beta,
    }
}

#[fixture]
fn universe() -> Vec<SecurityRecord> {
    vec![
        record("ADVANC", [620_000.0, 21.0, 7.8, 4.1, 12.5, 1.6, 36.0, 0.6]),
        record("AOT", [900_000.0, 45.0, 6.0, 1.0, -20.0, 0.9, 14.0, 0.8]),
        record("BBL", [290_000.0, 6.5, 0.5, 5.8, 2.0, 7.9, 8.1, 0.9]),
        record("CPALL", [480_000.0, 18.0, 3.5, 2.5, 3.0, 2.8, 22.0, 0.9]),
        record("DELTA", [1_100_000.0, 80.0, 25.0, 0.3, 45.0, 0.3, 30.0, 1.6]),
        record("GULF", [560_000.0, 50.0, 5.5, 1.2, -8.0, 2.1, 11.0, 1.2]),
        record("KBANK", [310_000.0, 7.0, 0.6, 5.5, 8.0, 7.5, 8.0, 1.1]),
        record("PTT", [950_000.0, 10.0, 0.9, 6.0, -5.0, 1.2, 8.5, 0.7]),
        record("SCC", [280_000.0, 28.0, 0.8, 2.2, -25.0, 0.8, 2.9, 1.0]),
        record("TU", [70_000.0, 9.0, 1.0, 0.0, -14.0, 1.1, 11.5, 0.5]),
    ]
}

fn snapshot(records: &[SecurityRecord]) -> Snapshot {
    Snapshot::from_records(records).unwrap()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

fn row_of(table: &ScoredTable, symbol: &str) -> usize {
    table
        .symbols()
        .unwrap()
        .iter()
        .position(|s| s == symbol)
        .unwrap()
}

#[rstest]
fn test_scores_are_standardized(universe: Vec<SecurityRecord>) {
    let table = FactorScoreEngine::default().score(&snapshot(&universe)).unwrap();

    for column in score_columns() {
        let values = table.values(column).unwrap();
        assert_eq!(values.len(), universe.len());
        assert_abs_diff_eq!(mean(&values), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(population_std(&values), 1.0, epsilon = 1e-9);
    }
}

#[rstest]
fn test_ranks_in_unit_interval(universe: Vec<SecurityRecord>) {
    let table = FactorScoreEngine::default().score(&snapshot(&universe)).unwrap();

    for column in score_columns() {
        let ranks = table.ranks(column).unwrap();
        assert!(ranks.iter().all(|r| *r > 0.0 && *r <= 1.0), "{column}: {ranks:?}");
        assert_abs_diff_eq!(ranks.iter().copied().fold(0.0, f64::max), 1.0);
    }
}

#[rstest]
fn test_top_composite_ranks_first(universe: Vec<SecurityRecord>) {
    let table = FactorScoreEngine::default().score(&snapshot(&universe)).unwrap();

    let scores = table.values("score").unwrap();
    let ranks = table.ranks("score").unwrap();
    let best = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_abs_diff_eq!(ranks[best], 1.0);
}

#[rstest]
fn test_scoring_is_idempotent(universe: Vec<SecurityRecord>) {
    let engine = FactorScoreEngine::default();
    let snapshot = snapshot(&universe);

    let first = engine.score(&snapshot).unwrap();
    let second = engine.score(&snapshot).unwrap();
    assert!(first.frame().equals(second.frame()));
    assert_eq!(snapshot.frame().width(), columns::REQUIRED.len());
}

#[rstest]
#[case::value("DELTA", "val")]
#[case::size("DELTA", "size")]
#[case::volatility("DELTA", "vol")]
fn test_expensive_large_volatile_scores_lowest(
    universe: Vec<SecurityRecord>,
    #[case] symbol: &str,
    #[case] column: &str,
) {
    let table = FactorScoreEngine::default().score(&snapshot(&universe)).unwrap();
    let values = table.values(column).unwrap();
    let row = row_of(&table, symbol);

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    assert_abs_diff_eq!(values[row], min);
}

#[test]
fn test_lowest_pe_has_highest_value() {
    let records = vec![
        record("A", [100.0, 10.0, 2.1, 1.0, 5.0, 1.0, 10.0, 0.9]),
        record("B", [200.0, 20.0, 2.2, 2.0, -5.0, 2.0, 15.0, 1.1]),
        record("C", [300.0, 30.0, 2.3, 3.0, 10.0, 0.5, 12.0, 1.3]),
    ];

    let table = FactorScoreEngine::default().score(&snapshot(&records)).unwrap();
    let value = table.values("val").unwrap();
    assert!(value[0] > value[1]);
    assert!(value[1] > value[2]);
    assert_abs_diff_eq!(table.ranks("val").unwrap()[0], 1.0);
}

#[rstest]
fn test_lower_leverage_raises_quality(universe: Vec<SecurityRecord>) {
    let base = FactorScoreEngine::default().score(&snapshot(&universe)).unwrap();

    let mut improved = universe.clone();
    improved[2].debt_to_equity = 0.2;
    let after = FactorScoreEngine::default().score(&snapshot(&improved)).unwrap();

    let row = row_of(&base, "BBL");
    assert!(after.values("q").unwrap()[row] >= base.values("q").unwrap()[row]);
}

#[rstest]
fn test_constant_beta_scores_zero(mut universe: Vec<SecurityRecord>) {
    for r in &mut universe {
        r.beta = 1.0;
    }

    let table = FactorScoreEngine::default().score(&snapshot(&universe)).unwrap();
    assert_eq!(table.degenerate_columns(), [columns::BETA.to_string()]);
    assert!(table.values("vol").unwrap().iter().all(|v| *v == 0.0));
    assert!(table.ranks("vol").unwrap().iter().all(|r| *r == 1.0));

    let scores = table.values("score").unwrap();
    assert!(scores.iter().all(|s| s.is_finite()));
}

#[rstest]
fn test_constant_beta_rejected_when_strict(mut universe: Vec<SecurityRecord>) {
    for r in &mut universe {
        r.beta = 1.0;
    }

    let engine = FactorScoreEngine::new(EngineConfig {
        degenerate_policy: DegeneratePolicy::Reject,
        ..Default::default()
    });
    match engine.score(&snapshot(&universe)) {
        Err(FactorError::DegenerateDistribution(column)) => assert_eq!(column, columns::BETA),
        other => panic!("expected DegenerateDistribution, got {other:?}"),
    }
}

#[rstest]
fn test_zero_dividends_score(mut universe: Vec<SecurityRecord>) {
    universe[0].dividend_yield = 0.0;
    universe[1].dividend_yield = 0.0;

    let table = FactorScoreEngine::default().score(&snapshot(&universe)).unwrap();
    let dividend = table.values("divYield").unwrap();
    let ranks = table.ranks("divYield").unwrap();

    assert!(dividend.iter().all(|v| v.is_finite()));
    assert_abs_diff_eq!(dividend[0], dividend[1]);
    assert_abs_diff_eq!(ranks[0], ranks[1]);
}

#[rstest]
fn test_single_record_is_insufficient(universe: Vec<SecurityRecord>) {
    let result = FactorScoreEngine::default().score(&snapshot(&universe[..1]));
    assert!(matches!(
        result,
        Err(FactorError::InsufficientData {
            records: 1,
            required: 2
        })
    ));
}

#[rstest]
fn test_missing_column_detected(universe: Vec<SecurityRecord>) {
    let frame = snapshot(&universe).frame().drop(columns::ROE).unwrap();

    let result = FactorScoreEngine::default().score(&Snapshot::from_frame(frame));
    match result {
        Err(FactorError::MissingField(column)) => assert_eq!(column, columns::ROE),
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn test_null_values_detected() {
    let frame = df! {
        columns::SYMBOL => &["A", "B", "C"],
        columns::MARKET_CAP => &[1.0, 2.0, 3.0],
        columns::PE => &[Some(10.0), None, Some(12.0)],
        columns::PB => &[1.0, 2.0, 3.0],
        columns::DIVIDEND_YIELD => &[1.0, 2.0, 3.0],
        columns::YTD_CHANGE => &[1.0, 2.0, 3.0],
        columns::DE => &[1.0, 2.0, 3.0],
        columns::ROE => &[1.0, 2.0, 3.0],
        columns::BETA => &[1.0, 2.0, 3.0],
    }
    .unwrap();

    let result = FactorScoreEngine::default().score(&Snapshot::from_frame(frame));
    assert!(matches!(
        result,
        Err(FactorError::NullValues { ref column, count: 1 }) if column == columns::PE
    ));
}

#[rstest]
fn test_rank_column_names(universe: Vec<SecurityRecord>) {
    let table = FactorScoreEngine::default().score(&snapshot(&universe)).unwrap();
    let names: Vec<String> = table
        .frame()
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    for column in score_columns() {
        assert!(names.contains(&rank_column(column)));
    }
    assert!(names.contains(&"rank_divYield".to_string()));
}
