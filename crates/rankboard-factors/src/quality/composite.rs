//! Composite Quality Factor
//!
//! Combines ROE and leverage (inverted) into a single quality score.
//! Captures both profitability and financial stability dimensions of quality.

use polars::prelude::*;
use rankboard_data::columns;
use serde::{Deserialize, Serialize};

use crate::factor::{Factor, StyleFactor};
use crate::math::{negate, standardize, weighted_sum, zscore};
use crate::registry::{self, FactorCategory};

/// Configuration for the Quality factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Weight for the ROE z-score (default: 0.5)
    pub roe_weight: f64,
    /// Weight for the inverted D/E z-score (default: 0.5)
    pub leverage_weight: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            roe_weight: 0.5,
            leverage_weight: 0.5,
        }
    }
}

/// Quality computes `Z(mean(Z(ROE), -Z(D/E)))`
#[derive(Debug, Clone, Default)]
pub struct QualityFactor {
    config: QualityConfig,
}

impl Factor for QualityFactor {
    fn name(&self) -> &str {
        "quality"
    }

    fn output_column(&self) -> &str {
        registry::QUALITY
    }

    fn category(&self) -> FactorCategory {
        FactorCategory::Quality
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::ROE, columns::DE]
    }

    fn expr(&self) -> Expr {
        let blend = weighted_sum(vec![
            (zscore(columns::ROE), self.config.roe_weight),
            (negate(zscore(columns::DE)), self.config.leverage_weight),
        ]);
        standardize(blend)
    }
}

impl StyleFactor for QualityFactor {
    type Config = QualityConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}
