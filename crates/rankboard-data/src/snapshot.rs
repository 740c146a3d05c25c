//! Immutable snapshot table.

use polars::prelude::*;

use crate::error::Result;
use crate::record::{SecurityRecord, columns};

/// The cleaned cross-section of securities, one row per symbol.
///
/// A snapshot is never mutated; scoring produces a new table.
#[derive(Debug, Clone)]
pub struct Snapshot {
    frame: DataFrame,
}

impl Snapshot {
    /// Build a snapshot from cleaned records.
    pub fn from_records(records: &[SecurityRecord]) -> Result<Self> {
        let field = |f: fn(&SecurityRecord) -> f64| records.iter().map(f).collect::<Vec<f64>>();

        let frame = df! {
            columns::SYMBOL => records.iter().map(|r| r.symbol.as_str()).collect::<Vec<&str>>(),
            columns::MARKET_CAP => field(|r| r.market_capitalization),
            columns::PE => field(|r| r.price_to_earnings),
            columns::PB => field(|r| r.price_to_book),
            columns::DIVIDEND_YIELD => field(|r| r.dividend_yield),
            columns::YTD_CHANGE => field(|r| r.year_to_date_return),
            columns::DE => field(|r| r.debt_to_equity),
            columns::ROE => field(|r| r.return_on_equity),
            columns::BETA => field(|r| r.beta),
        }?;

        Ok(Self { frame })
    }

    /// Wrap an existing frame without validation.
    ///
    /// The scoring engine checks columns and nulls before using it.
    pub const fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Borrow the underlying frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of securities.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the snapshot holds no securities.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Check if a column is present.
    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
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

    /// Values of a numeric column cast to `f64`, nulls as `None`.
    pub fn values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let series = self
            .frame
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        Ok(series.f64()?.into_iter().collect())
    }
}
