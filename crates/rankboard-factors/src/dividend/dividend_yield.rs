//! Dividend Yield Factor

use polars::prelude::*;
use rankboard_data::columns;

use crate::factor::Factor;
use crate::math::zscore;
use crate::registry::{self, FactorCategory};

/// DividendYield computes `Z(dividendYield)`
#[derive(Debug, Clone, Copy, Default)]
pub struct DividendYieldFactor;

impl Factor for DividendYieldFactor {
    fn name(&self) -> &str {
        "dividend_yield"
    }

    fn output_column(&self) -> &str {
        registry::DIVIDEND_YIELD
    }

    fn category(&self) -> FactorCategory {
        FactorCategory::DividendYield
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::DIVIDEND_YIELD]
    }

    fn expr(&self) -> Expr {
        zscore(columns::DIVIDEND_YIELD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{argmax, eval, sample_frame};

    #[test]
    fn test_factor_name() {
        assert_eq!(DividendYieldFactor.name(), "dividend_yield");
        assert_eq!(DividendYieldFactor.output_column(), "divYield");
    }

    #[test]
    fn test_highest_yield_scores_highest() {
        let scores = eval(&sample_frame(), DividendYieldFactor.expr());
        // PTT pays the highest yield
        assert_eq!(argmax(&scores), 1);
    }

    #[test]
    fn test_zero_yield_is_valid() {
        let frame = df! { "dividendYield" => &[0.0, 3.0, 6.0] }.unwrap();
        let scores = eval(&frame, DividendYieldFactor.expr());
        assert!(scores.iter().all(|v| v.is_finite()));
        assert!(scores[0] < scores[1]);
    }
}
