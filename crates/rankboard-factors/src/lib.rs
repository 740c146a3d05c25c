#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rankboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod composite;
pub mod dividend;
pub mod engine;
pub mod error;
pub mod factor;
pub mod math;
pub mod momentum;
pub mod quality;
pub mod rank;
pub mod registry;
pub mod size;
pub mod value;
pub mod volatility;

pub use composite::{CompositeConfig, CompositeScore};
pub use engine::{DegeneratePolicy, EngineConfig, FactorScoreEngine, ScoredTable};
pub use error::{FactorError, Result};
pub use factor::{Factor, StyleFactor};

// Re-export registry types for convenience
pub use registry::{
    FactorCategory, FactorInfo, available_factors, factors_by_category, get_factor_info,
    rank_column, score_columns,
};

#[cfg(test)]
pub(crate) mod testing {
    use polars::prelude::*;
    use rankboard_data::columns;

    /// Five securities with distinct values in every metric.
    pub(crate) fn sample_frame() -> DataFrame {
        df! {
            columns::SYMBOL => &["AOT", "PTT", "CPALL", "BDMS", "KBANK"],
            columns::MARKET_CAP => &[900_000.0, 950_000.0, 480_000.0, 390_000.0, 310_000.0],
            columns::PE => &[45.0, 10.0, 18.0, 28.0, 7.0],
            columns::PB => &[6.0, 0.9, 3.5, 4.2, 0.6],
            columns::DIVIDEND_YIELD => &[1.0, 6.0, 2.5, 2.8, 5.5],
            columns::YTD_CHANGE => &[-20.0, -5.0, 3.0, -12.0, 8.0],
            columns::DE => &[0.9, 1.2, 2.8, 0.4, 7.5],
            columns::ROE => &[14.0, 8.5, 22.0, 17.0, 8.0],
            columns::BETA => &[0.8, 0.7, 0.9, 0.5, 1.1],
        }
        .unwrap()
    }

    /// Evaluate an expression over a frame as `f64` values.
    pub(crate) fn eval(frame: &DataFrame, expr: Expr) -> Vec<f64> {
        frame
            .clone()
            .lazy()
            .select([expr.alias("out")])
            .collect()
            .unwrap()
            .column("out")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    /// Index of the maximum value.
    pub(crate) fn argmax(values: &[f64]) -> usize {
        values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap()
    }
}
