//! Equal-weighted composite score.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::math::{row_mean, standardize};
use crate::registry::{FACTOR_COLUMNS, SCORE};

/// Configuration for the composite score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    /// Whether to re-standardize the averaged factors (default: true)
    pub normalize: bool,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self { normalize: true }
    }
}

/// Averages the six factor columns with equal weights.
///
/// The factor columns must already be present on the frame.
///
/// # Examples
///
/// ```rust,no_run
/// use rankboard_factors::{CompositeConfig, CompositeScore};
///
/// let composite = CompositeScore::new(CompositeConfig { normalize: true });
/// let expr = composite.expr();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompositeScore {
    config: CompositeConfig,
}

impl CompositeScore {
    /// Create a new composite with the given configuration.
    pub const fn new(config: CompositeConfig) -> Self {
        Self { config }
    }

    /// Name of this combination strategy.
    pub const fn name(&self) -> &'static str {
        "equal_weight"
    }

    /// Column the composite is written to.
    pub const fn output_column(&self) -> &'static str {
        SCORE
    }

    /// Columns averaged into the composite.
    pub const fn input_columns(&self) -> &'static [&'static str] {
        &FACTOR_COLUMNS
    }

    /// Composite expression over the factor columns.
    pub fn expr(&self) -> Expr {
        let mean = row_mean(FACTOR_COLUMNS.iter().map(|c| col(*c)).collect());
        if self.config.normalize {
            standardize(mean)
        } else {
            mean
        }
    }
}
