//! Market Capitalization Size Factor
//!
//! Negative z-score of market capitalization: smaller companies score higher.
//! The z-score is negated once and not re-standardized, since negating a
//! standardized series already yields zero mean and unit variance.

use polars::prelude::*;
use rankboard_data::columns;

use crate::factor::Factor;
use crate::math::{negate, zscore};
use crate::registry::{self, FactorCategory};

/// Size computes `-Z(marketCap)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeFactor;

impl Factor for SizeFactor {
    fn name(&self) -> &str {
        "size"
    }

    fn output_column(&self) -> &str {
        registry::SIZE
    }

    fn category(&self) -> FactorCategory {
        FactorCategory::Size
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::MARKET_CAP]
    }

    fn expr(&self) -> Expr {
        negate(zscore(columns::MARKET_CAP))
    }
}
