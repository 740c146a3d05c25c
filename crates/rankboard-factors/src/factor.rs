//! Factor traits.
//!
//! A factor is a column-wise expression over the snapshot. The engine
//! evaluates every factor in a single pass, so implementations must not
//! depend on row order.

use polars::prelude::*;

use crate::error::Result;
use crate::registry::FactorCategory;

/// A cross-sectional factor producing one standardized score per security.
pub trait Factor: Send + Sync + std::fmt::Debug {
    /// Unique factor name, e.g. `"value"`.
    fn name(&self) -> &str;

    /// Column the score is written to in the scored table, e.g. `"val"`.
    fn output_column(&self) -> &str;

    /// Category of the factor.
    fn category(&self) -> FactorCategory;

    /// Snapshot columns the expression reads.
    fn required_columns(&self) -> &[&str];

    /// Score expression, evaluated over the full snapshot.
    ///
    /// Higher values always mean "better" after any sign flip.
    fn expr(&self) -> Expr;

    /// Append the score column to `data`.
    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame> {
        Ok(data.with_column(self.expr().alias(self.output_column())))
    }
}

/// A factor with a serializable configuration.
pub trait StyleFactor: Factor + Sized {
    /// Configuration type.
    type Config: Default + Clone;

    /// Create the factor from a configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Borrow the configuration.
    fn config(&self) -> &Self::Config;
}
