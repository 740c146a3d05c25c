//! Year-to-Date Momentum Factor

use polars::prelude::*;
use rankboard_data::columns;

use crate::factor::Factor;
use crate::math::zscore;
use crate::registry::{self, FactorCategory};

/// Momentum computes `Z(ytdPercentChange)`
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumFactor;

impl Factor for MomentumFactor {
    fn name(&self) -> &str {
        "momentum"
    }

    fn output_column(&self) -> &str {
        registry::MOMENTUM
    }

    fn category(&self) -> FactorCategory {
        FactorCategory::Momentum
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::YTD_CHANGE]
    }

    fn expr(&self) -> Expr {
        zscore(columns::YTD_CHANGE)
    }
}
