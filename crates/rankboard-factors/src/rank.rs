//! Percentile ranks of score columns.
//!
//! Ranking is ascending for every score: after sign flips a higher score is
//! always better, so the best security has rank `1.0`.

use polars::prelude::*;

use crate::math::percentile_rank;
use crate::registry::rank_column;

/// Rank expressions for each score column, aliased to `rank_<column>`.
pub fn rank_exprs(score_columns: &[&str]) -> Vec<Expr> {
    score_columns
        .iter()
        .map(|c| percentile_rank(col(*c)).alias(rank_column(c)))
        .collect()
}

/// Eager percentile rank: fraction of values `<=` each value.
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    values
        .iter()
        .map(|v| values.iter().filter(|other| *other <= v).count() as f64 / n)
        .collect()
}
