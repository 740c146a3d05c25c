//! Security records as they appear in the snapshot file.

use serde::{Deserialize, Serialize};

/// Column names of the snapshot file and the scored table.
pub mod columns {
    /// Ticker symbol
    pub const SYMBOL: &str = "symbol";
    /// Market capitalization
    pub const MARKET_CAP: &str = "marketCap";
    /// Price to earnings ratio
    pub const PE: &str = "pe";
    /// Price to book value ratio
    pub const PB: &str = "pb";
    /// Dividend yield
    pub const DIVIDEND_YIELD: &str = "dividendYield";
    /// Year-to-date percent change
    pub const YTD_CHANGE: &str = "ytdPercentChange";
    /// Debt to equity ratio
    pub const DE: &str = "de";
    /// Return on equity
    pub const ROE: &str = "roe";
    /// Market beta
    pub const BETA: &str = "beta";

    /// Numeric factor inputs, in file order.
    pub const METRICS: [&str; 8] = [
        MARKET_CAP,
        PE,
        PB,
        DIVIDEND_YIELD,
        YTD_CHANGE,
        DE,
        ROE,
        BETA,
    ];

    /// Every column a snapshot file must carry.
    pub const REQUIRED: [&str; 9] = [
        SYMBOL,
        MARKET_CAP,
        PE,
        PB,
        DIVIDEND_YIELD,
        YTD_CHANGE,
        DE,
        ROE,
        BETA,
    ];
}

/// One equity with every factor input present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRecord {
    /// Ticker symbol, unique within a snapshot.
    pub symbol: String,

    /// Market capitalization.
    #[serde(rename = "marketCap")]
    pub market_capitalization: f64,

    /// Price to earnings ratio.
    #[serde(rename = "pe")]
    pub price_to_earnings: f64,

    /// Price to book value ratio.
    #[serde(rename = "pb")]
    pub price_to_book: f64,

    /// Dividend yield, `0.0` for companies that pay no dividend.
    #[serde(rename = "dividendYield")]
    pub dividend_yield: f64,

    /// Year-to-date return in percent.
    #[serde(rename = "ytdPercentChange")]
    pub year_to_date_return: f64,

    /// Debt to equity ratio.
    #[serde(rename = "de")]
    pub debt_to_equity: f64,

    /// Return on equity.
    #[serde(rename = "roe")]
    pub return_on_equity: f64,

    /// Market beta.
    pub beta: f64,
}

/// A row as read from the file, before cleaning.
///
/// Empty or unparseable cells become `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,

    /// Market capitalization.
    #[serde(rename = "marketCap", deserialize_with = "csv::invalid_option")]
    pub market_capitalization: Option<f64>,

    /// Price to earnings ratio, absent for loss-making companies.
    #[serde(rename = "pe", deserialize_with = "csv::invalid_option")]
    pub price_to_earnings: Option<f64>,

    /// Price to book value ratio.
    #[serde(rename = "pb", deserialize_with = "csv::invalid_option")]
    pub price_to_book: Option<f64>,

    /// Dividend yield, absent when no dividend is paid.
    #[serde(rename = "dividendYield", deserialize_with = "csv::invalid_option")]
    pub dividend_yield: Option<f64>,

    /// Year-to-date return, absent for newly listed securities.
    #[serde(rename = "ytdPercentChange", deserialize_with = "csv::invalid_option")]
    pub year_to_date_return: Option<f64>,

    /// Debt to equity ratio.
    #[serde(rename = "de", deserialize_with = "csv::invalid_option")]
    pub debt_to_equity: Option<f64>,

    /// Return on equity.
    #[serde(rename = "roe", deserialize_with = "csv::invalid_option")]
    pub return_on_equity: Option<f64>,

    /// Market beta.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub beta: Option<f64>,
}

impl RawRecord {
    /// Columns that are missing and cannot be defaulted.
    ///
    /// A missing dividend yield is not reported since it defaults to zero.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            (columns::MARKET_CAP, self.market_capitalization),
            (columns::PE, self.price_to_earnings),
            (columns::PB, self.price_to_book),
            (columns::YTD_CHANGE, self.year_to_date_return),
            (columns::DE, self.debt_to_equity),
            (columns::ROE, self.return_on_equity),
            (columns::BETA, self.beta),
        ];

        let mut missing = Vec::new();
        if self.symbol.trim().is_empty() {
            missing.push(columns::SYMBOL);
        }
        missing.extend(
            fields
                .into_iter()
                .filter(|(_, value)| !value.is_some_and(f64::is_finite))
                .map(|(name, _)| name),
        );
        missing
    }

    /// Convert into a complete record, defaulting the dividend yield to zero.
    ///
    /// Returns `None` if any other field is missing.
    pub fn into_record(self) -> Option<SecurityRecord> {
        if !self.missing_fields().is_empty() {
            return None;
        }

        Some(SecurityRecord {
            symbol: self.symbol.trim().to_string(),
            market_capitalization: self.market_capitalization?,
            price_to_earnings: self.price_to_earnings?,
            price_to_book: self.price_to_book?,
            dividend_yield: self
                .dividend_yield
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
            year_to_date_return: self.year_to_date_return?,
            debt_to_equity: self.debt_to_equity?,
            return_on_equity: self.return_on_equity?,
            beta: self.beta?,
        })
    }
}
