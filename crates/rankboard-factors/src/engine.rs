//! Factor score engine.
//!
//! Turns a cleaned [`Snapshot`] into a [`ScoredTable`] carrying the six factor
//! scores, the composite and their percentile ranks. The transform is pure:
//! the snapshot is never mutated and repeated runs give identical output.

use polars::prelude::*;
use rankboard_data::{Snapshot, columns};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::composite::{CompositeConfig, CompositeScore};
use crate::dividend::DividendYieldFactor;
use crate::error::{FactorError, Result};
use crate::factor::{Factor, StyleFactor};
use crate::math::{MIN_RECORDS, is_degenerate};
use crate::momentum::MomentumFactor;
use crate::quality::{QualityConfig, QualityFactor};
use crate::rank::rank_exprs;
use crate::registry::{rank_column, score_columns};
use crate::size::SizeFactor;
use crate::value::{ValueConfig, ValueFactor};
use crate::volatility::LowVolatilityFactor;

/// How to treat a factor input with zero variance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Every security gets a z-score of `0.0` for that input.
    #[default]
    ZeroScore,
    /// Fail with [`FactorError::DegenerateDistribution`].
    Reject,
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Zero-variance handling
    pub degenerate_policy: DegeneratePolicy,
    /// Value factor weights
    pub value: ValueConfig,
    /// Quality factor weights
    pub quality: QualityConfig,
    /// Composite settings
    pub composite: CompositeConfig,
}

/// A snapshot augmented with factor scores and ranks.
#[derive(Debug, Clone)]
pub struct ScoredTable {
    frame: DataFrame,
    degenerate: Vec<String>,
}

impl ScoredTable {
    /// Borrow the underlying frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of scored securities.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Input columns found to have zero variance.
    pub fn degenerate_columns(&self) -> &[String] {
        &self.degenerate
    }

    /// Symbols in row order.
    pub fn symbols(&self) -> Result<Vec<String>> {
        let symbols = self
            .frame
            .column(columns::SYMBOL)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|s| s.unwrap_or_default().to_string())
            .collect();
        Ok(symbols)
    }

    /// Values of a numeric column.
    pub fn values(&self, name: &str) -> Result<Vec<f64>> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| FactorError::MissingField(name.to_string()))?;
        let series = column.as_materialized_series().cast(&DataType::Float64)?;
        Ok(series.f64()?.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Percentile ranks of a score column.
    pub fn ranks(&self, score_column: &str) -> Result<Vec<f64>> {
        self.values(&rank_column(score_column))
    }
}

/// Computes factor scores, the composite and percentile ranks.
///
/// Factors:
/// - Value: `-Z(mean(Z(P/E), Z(P/BV)))`
/// - Size: `-Z(marketCap)`
/// - Volatility: `-Z(beta)`
/// - Momentum: `Z(ytdPercentChange)`
/// - Dividend Yield: `Z(dividendYield)`
/// - Quality: `Z(mean(Z(ROE), -Z(DE)))`
#[derive(Debug, Clone, Default)]
pub struct FactorScoreEngine {
    policy: DegeneratePolicy,
    value: ValueFactor,
    size: SizeFactor,
    volatility: LowVolatilityFactor,
    momentum: MomentumFactor,
    dividend_yield: DividendYieldFactor,
    quality: QualityFactor,
    composite: CompositeScore,
}

impl FactorScoreEngine {
    /// Create an engine from a configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            policy: config.degenerate_policy,
            value: ValueFactor::with_config(config.value),
            size: SizeFactor,
            volatility: LowVolatilityFactor,
            momentum: MomentumFactor,
            dividend_yield: DividendYieldFactor,
            quality: QualityFactor::with_config(config.quality),
            composite: CompositeScore::new(config.composite),
        }
    }

    /// Zero-variance policy in effect.
    pub const fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// The six factors, in composite order.
    pub fn factors(&self) -> [&dyn Factor; 6] {
        [
            &self.value,
            &self.size,
            &self.volatility,
            &self.momentum,
            &self.dividend_yield,
            &self.quality,
        ]
    }

    /// Check the preconditions for scoring.
    ///
    /// Returns the input columns with zero variance. Nothing is computed if
    /// this fails.
    ///
    /// # Errors
    ///
    /// - [`FactorError::MissingField`] if a required column is absent
    /// - [`FactorError::InsufficientData`] with fewer than two records
    /// - [`FactorError::NullValues`] if a column has nulls or non-finite values
    /// - [`FactorError::DegenerateDistribution`] under [`DegeneratePolicy::Reject`]
    pub fn validate(&self, snapshot: &Snapshot) -> Result<Vec<String>> {
        for name in columns::REQUIRED {
            if !snapshot.has_column(name) {
                return Err(FactorError::MissingField(name.to_string()));
            }
        }

        if snapshot.len() < MIN_RECORDS {
            return Err(FactorError::InsufficientData {
                records: snapshot.len(),
                required: MIN_RECORDS,
            });
        }

        let mut degenerate = Vec::new();
        for name in columns::METRICS {
            let values = snapshot.values(name)?;
            let missing = values
                .iter()
                .filter(|v| !v.is_some_and(f64::is_finite))
                .count();
            if missing > 0 {
                return Err(FactorError::NullValues {
                    column: name.to_string(),
                    count: missing,
                });
            }

            let values: Vec<f64> = values.into_iter().flatten().collect();
            if is_degenerate(&values) {
                match self.policy {
                    DegeneratePolicy::Reject => {
                        return Err(FactorError::DegenerateDistribution(name.to_string()));
                    }
                    DegeneratePolicy::ZeroScore => {
                        warn!(column = name, "zero variance, scoring as 0.0");
                        degenerate.push(name.to_string());
                    }
                }
            }
        }

        Ok(degenerate)
    }

    /// Score a snapshot.
    ///
    /// The returned table holds every snapshot column plus
    /// `val, size, vol, mome, divYield, q, score` and a `rank_<column>` for
    /// each of those seven scores.
    pub fn score(&self, snapshot: &Snapshot) -> Result<ScoredTable> {
        let degenerate = self.validate(snapshot)?;
        debug!(records = snapshot.len(), "scoring snapshot");

        let inputs: Vec<Expr> = columns::METRICS
            .iter()
            .map(|c| col(*c).cast(DataType::Float64))
            .collect();

        let factor_exprs: Vec<Expr> = self
            .factors()
            .iter()
            .map(|f| f.expr().alias(f.output_column()))
            .collect();

        let frame = snapshot
            .frame()
            .clone()
            .lazy()
            .with_columns(inputs)
            .with_columns(factor_exprs)
            .with_column(self.composite.expr().alias(self.composite.output_column()))
            .with_columns(rank_exprs(&score_columns()))
            .collect()?;

        debug!(columns = frame.width(), "scoring complete");

        Ok(ScoredTable { frame, degenerate })
    }
}
