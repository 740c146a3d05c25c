//! Low Volatility Factor
//!
//! Negative z-score of market beta. Beta > 1 means the security moves more
//! than the market, so it scores below average.

use polars::prelude::*;
use rankboard_data::columns;

use crate::factor::Factor;
use crate::math::{negate, zscore};
use crate::registry::{self, FactorCategory};

/// LowVolatility computes `-Z(beta)`
#[derive(Debug, Clone, Copy, Default)]
pub struct LowVolatilityFactor;

impl Factor for LowVolatilityFactor {
    fn name(&self) -> &str {
        "volatility"
    }

    fn output_column(&self) -> &str {
        registry::VOLATILITY
    }

    fn category(&self) -> FactorCategory {
        FactorCategory::Volatility
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::BETA]
    }

    fn expr(&self) -> Expr {
        negate(zscore(columns::BETA))
    }
}
