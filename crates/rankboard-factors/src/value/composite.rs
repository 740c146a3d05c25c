//! Composite Value Factor
//!
//! Combines the z-scores of P/E and P/BV, re-standardizes the blend and flips
//! the sign so that cheaper securities score higher.

use polars::prelude::*;
use rankboard_data::columns;
use serde::{Deserialize, Serialize};

use crate::factor::{Factor, StyleFactor};
use crate::math::{negate, standardize, weighted_sum, zscore};
use crate::registry::{self, FactorCategory};

/// Configuration for the Value factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueConfig {
    /// Weight for the P/E z-score (default: 0.5)
    pub pe_weight: f64,
    /// Weight for the P/BV z-score (default: 0.5)
    pub pb_weight: f64,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            pe_weight: 0.5,
            pb_weight: 0.5,
        }
    }
}

/// Value computes `-Z(mean(Z(P/E), Z(P/BV)))`
#[derive(Debug, Clone, Default)]
pub struct ValueFactor {
    config: ValueConfig,
}

impl Factor for ValueFactor {
    fn name(&self) -> &str {
        "value"
    }

    fn output_column(&self) -> &str {
        registry::VALUE
    }

    fn category(&self) -> FactorCategory {
        FactorCategory::Value
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::PE, columns::PB]
    }

    fn expr(&self) -> Expr {
        let blend = weighted_sum(vec![
            (zscore(columns::PE), self.config.pe_weight),
            (zscore(columns::PB), self.config.pb_weight),
        ]);
        negate(standardize(blend))
    }
}

impl StyleFactor for ValueFactor {
    type Config = ValueConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::population_std;
    use crate::testing::{argmax, eval, sample_frame};
    use approx::assert_relative_eq;

    #[test]
    fn test_factor_name() {
        let factor = ValueFactor::default();
        assert_eq!(factor.name(), "value");
        assert_eq!(factor.output_column(), "val");
        assert_eq!(factor.category(), FactorCategory::Value);
    }

    #[test]
    fn test_required_columns() {
        let factor = ValueFactor::default();
        let cols = factor.required_columns();
        assert_eq!(cols.len(), 2);
        assert!(cols.contains(&"pe"));
        assert!(cols.contains(&"pb"));
    }

    #[test]
    fn test_config_defaults() {
        let config = ValueConfig::default();
        assert_relative_eq!(config.pe_weight, 0.5);
        assert_relative_eq!(config.pb_weight, 0.5);
    }

    #[test]
    fn test_custom_config() {
        let factor = ValueFactor::with_config(ValueConfig {
            pe_weight: 1.0,
            pb_weight: 0.0,
        });
        assert_relative_eq!(factor.config().pe_weight, 1.0);
    }

    #[test]
    fn test_cheapest_scores_highest() {
        let frame = sample_frame();
        let scores = eval(&frame, ValueFactor::default().expr());
        // KBANK has the lowest P/E and P/BV
        assert_eq!(argmax(&scores), 4);
        assert_relative_eq!(population_std(&scores), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compute_scores_appends_column() {
        let frame = sample_frame();
        let out = ValueFactor::default()
            .compute_scores(frame.lazy())
            .unwrap()
            .collect()
            .unwrap();
        assert!(out.column("val").is_ok());
        assert_eq!(out.height(), 5);
    }
}
