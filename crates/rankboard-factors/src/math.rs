//! Cross-sectional standardization and ranking primitives.
//!
//! All statistics use the population standard deviation (`ddof = 0`).

use polars::prelude::*;

/// Standard deviations below this are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Minimum number of records for a standard deviation to be defined.
pub const MIN_RECORDS: usize = 2;

/// Standardize an expression to zero mean and unit population variance.
///
/// A zero-variance input yields `0.0` for every row instead of dividing by
/// zero.
pub fn standardize(expr: Expr) -> Expr {
    let mean = expr.clone().mean();
    let std = expr.clone().std(0);

    when(std.clone().gt(lit(MIN_STD_THRESHOLD)))
        .then((expr - mean) / std)
        .otherwise(lit(0.0))
}

/// Z-score of a snapshot column.
pub fn zscore(column: &str) -> Expr {
    standardize(col(column))
}

/// Flip the sign of a score so that lower raw values rank higher.
pub fn negate(expr: Expr) -> Expr {
    lit(-1.0) * expr
}

/// Weighted sum of expressions.
pub fn weighted_sum(terms: Vec<(Expr, f64)>) -> Expr {
    terms
        .into_iter()
        .map(|(expr, weight)| expr * lit(weight))
        .reduce(|acc, term| acc + term)
        .unwrap_or_else(|| lit(0.0))
}

/// Row-wise arithmetic mean of expressions.
pub fn row_mean(exprs: Vec<Expr>) -> Expr {
    let weight = 1.0 / exprs.len().max(1) as f64;
    weighted_sum(exprs.into_iter().map(|e| (e, weight)).collect())
}

/// Percentile rank on `[0, 1]`: the fraction of rows with a value less than
/// or equal to the row's own value. Ties share the highest rank of the group.
pub fn percentile_rank(expr: Expr) -> Expr {
    let rank = expr
        .clone()
        .rank(
            RankOptions {
                method: RankMethod::Max,
                descending: false,
            },
            None,
        )
        .cast(DataType::Float64);

    rank / expr.count().cast(DataType::Float64)
}

/// Population standard deviation of a slice.
///
/// Returns `NaN` for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Whether a slice has (numerically) zero variance.
pub fn is_degenerate(values: &[f64]) -> bool {
    !(population_std(values) >= MIN_STD_THRESHOLD)
}

/// Eager counterpart of [`standardize`].
pub fn standardize_values(values: &[f64]) -> Vec<f64> {
    if is_degenerate(values) {
        return vec![0.0; values.len()];
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let std = population_std(values);
    values.iter().map(|x| (x - mean) / std).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eval(frame: DataFrame, expr: Expr) -> Vec<f64> {
        let out = frame
            .lazy()
            .select([expr.alias("out")])
            .collect()
            .unwrap();
        out.column("out")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn test_standardize_matches_eager() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 10.0];
        let frame = df! { "x" => &values }.unwrap();
        let lazy = eval(frame, zscore("x"));
        let eager = standardize_values(&values);
        for (a, b) in lazy.iter().zip(eager.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_standardize_population_moments() {
        let frame = df! { "x" => &[3.0, 7.0, 11.0, 2.0] }.unwrap();
        let z = eval(frame, zscore("x"));
        let mean = z.iter().sum::<f64>() / z.len() as f64;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
        assert_relative_eq!(population_std(&z), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_standardize_constant_is_zero() {
        let frame = df! { "x" => &[5.0, 5.0, 5.0] }.unwrap();
        let z = eval(frame, zscore("x"));
        assert!(z.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_negate_standardized_is_standardized() {
        let frame = df! { "x" => &[1.0, 4.0, 9.0, 16.0] }.unwrap();
        let once = eval(frame.clone(), negate(zscore("x")));
        let twice = eval(frame, negate(standardize(zscore("x"))));
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
        assert_relative_eq!(population_std(&once), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_row_mean() {
        let frame = df! { "a" => &[1.0, 2.0], "b" => &[3.0, 6.0] }.unwrap();
        let mean = eval(frame, row_mean(vec![col("a"), col("b")]));
        assert_eq!(mean, vec![2.0, 4.0]);
    }

    #[test]
    fn test_percentile_rank_ties_share_max() {
        let frame = df! { "x" => &[1.0, 2.0, 2.0, 3.0] }.unwrap();
        let ranks = eval(frame, percentile_rank(col("x")));
        assert_eq!(ranks, vec![0.25, 0.75, 0.75, 1.0]);
    }

    #[test]
    fn test_population_std() {
        assert_relative_eq!(population_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
        assert!(population_std(&[]).is_nan());
        assert!(is_degenerate(&[1.0, 1.0]));
        assert!(is_degenerate(&[]));
        assert!(!is_degenerate(&[1.0, 2.0]));
    }
}
