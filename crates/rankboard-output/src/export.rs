//! Export of scored tables.
//!
//! Writes one row per security, carrying the input metrics, the seven scores
//! and their percentile ranks, as CSV or JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use rankboard_data::columns;
use rankboard_factors::registry::{DIVIDEND_YIELD, MOMENTUM, QUALITY, SCORE, SIZE, VALUE, VOLATILITY};
use rankboard_factors::{FactorError, ScoredTable, rank_column};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading the scored table failed.
    #[error(transparent)]
    Factor(#[from] FactorError),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// One scored security, with the column names of the scored table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredRow {
    /// Security symbol.
    pub symbol: String,
    /// Market capitalization.
    #[serde(rename = "marketCap")]
    pub market_capitalization: f64,
    /// Price to earnings.
    #[serde(rename = "pe")]
    pub price_to_earnings: f64,
    /// Price to book.
    #[serde(rename = "pb")]
    pub price_to_book: f64,
    /// Dividend yield, in percent.
    #[serde(rename = "dividendYield")]
    pub dividend_yield: f64,
    /// Year-to-date return, in percent.
    #[serde(rename = "ytdPercentChange")]
    pub year_to_date_return: f64,
    /// Debt to equity.
    #[serde(rename = "de")]
    pub debt_to_equity: f64,
    /// Return on equity, in percent.
    #[serde(rename = "roe")]
    pub return_on_equity: f64,
    /// Market beta.
    pub beta: f64,

    /// Value score.
    pub val: f64,
    /// Size score.
    pub size: f64,
    /// Low-volatility score.
    pub vol: f64,
    /// Momentum score.
    pub mome: f64,
    /// Dividend yield score.
    #[serde(rename = "divYield")]
    pub div_yield: f64,
    /// Quality score.
    pub q: f64,
    /// Composite score.
    pub score: f64,

    /// Percentile rank of the composite.
    pub rank_score: f64,
    /// Percentile rank of the value score.
    pub rank_val: f64,
    /// Percentile rank of the size score.
    pub rank_size: f64,
    /// Percentile rank of the low-volatility score.
    pub rank_vol: f64,
    /// Percentile rank of the momentum score.
    pub rank_mome: f64,
    /// Percentile rank of the dividend yield score.
    #[serde(rename = "rank_divYield")]
    pub rank_div_yield: f64,
    /// Percentile rank of the quality score.
    pub rank_q: f64,
}

impl ScoredRow {
    /// Extract every row of a scored table, in table order.
    pub fn from_table(table: &ScoredTable) -> Result<Vec<Self>, ExportError> {
        let symbols = table.symbols()?;
        let get = |name: &str| table.values(name);
        let rank = |name: &str| table.values(&rank_column(name));

        let market_cap = get(columns::MARKET_CAP)?;
        let pe = get(columns::PE)?;
        let pb = get(columns::PB)?;
        let dividend = get(columns::DIVIDEND_YIELD)?;
        let ytd = get(columns::YTD_CHANGE)?;
        let de = get(columns::DE)?;
        let roe = get(columns::ROE)?;
        let beta = get(columns::BETA)?;

        let val = get(VALUE)?;
        let size = get(SIZE)?;
        let vol = get(VOLATILITY)?;
        let mome = get(MOMENTUM)?;
        let div_yield = get(DIVIDEND_YIELD)?;
        let q = get(QUALITY)?;
        let score = get(SCORE)?;

        let rank_score = rank(SCORE)?;
        let rank_val = rank(VALUE)?;
        let rank_size = rank(SIZE)?;
        let rank_vol = rank(VOLATILITY)?;
        let rank_mome = rank(MOMENTUM)?;
        let rank_div_yield = rank(DIVIDEND_YIELD)?;
        let rank_q = rank(QUALITY)?;

        let rows = symbols
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| Self {
                symbol,
                market_capitalization: market_cap[i],
                price_to_earnings: pe[i],
                price_to_book: pb[i],
                dividend_yield: dividend[i],
                year_to_date_return: ytd[i],
                debt_to_equity: de[i],
                return_on_equity: roe[i],
                beta: beta[i],
                val: val[i],
                size: size[i],
                vol: vol[i],
                mome: mome[i],
                div_yield: div_yield[i],
                q: q[i],
                score: score[i],
                rank_score: rank_score[i],
                rank_val: rank_val[i],
                rank_size: rank_size[i],
                rank_vol: rank_vol[i],
                rank_mome: rank_mome[i],
                rank_div_yield: rank_div_yield[i],
                rank_q: rank_q[i],
            })
            .collect();

        Ok(rows)
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        debug!(path = %path.display(), ?format, "exported");
        Ok(())
    }
}

impl Exporter for Vec<ScoredRow> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for row in self {
                    wtr.serialize(row)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for ScoredTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        ScoredRow::from_table(self)?.export_to_string(format)
    }
}
