//! Factor Registry
//!
//! Central registry of the factors and score columns produced by the engine.

use std::collections::HashMap;

use derive_more::Display;
use rankboard_data::columns;

/// Composite score column.
pub const SCORE: &str = "score";
/// Value factor column.
pub const VALUE: &str = "val";
/// Size factor column.
pub const SIZE: &str = "size";
/// Volatility factor column.
pub const VOLATILITY: &str = "vol";
/// Momentum factor column.
pub const MOMENTUM: &str = "mome";
/// Dividend yield factor column.
pub const DIVIDEND_YIELD: &str = "divYield";
/// Quality factor column.
pub const QUALITY: &str = "q";

/// The six factor columns, in composite order.
pub const FACTOR_COLUMNS: [&str; 6] = [VALUE, SIZE, VOLATILITY, MOMENTUM, DIVIDEND_YIELD, QUALITY];

/// Available factor categories
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorCategory {
    /// Value factors (P/E, P/BV)
    Value,
    /// Size factors (market capitalization)
    Size,
    /// Volatility factors (beta)
    Volatility,
    /// Momentum factors (year-to-date return)
    Momentum,
    /// Dividend yield factors
    #[display("Dividend Yield")]
    DividendYield,
    /// Quality factors (ROE, leverage)
    Quality,
}

impl FactorCategory {
    /// All categories in dashboard order.
    pub const ALL: [Self; 6] = [
        Self::Value,
        Self::Size,
        Self::Volatility,
        Self::Momentum,
        Self::DividendYield,
        Self::Quality,
    ];

    /// Parse a category from a user-supplied name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "value" => Some(Self::Value),
            "size" => Some(Self::Size),
            "volatility" | "lowvolatility" => Some(Self::Volatility),
            "momentum" => Some(Self::Momentum),
            "dividendyield" | "dividend" => Some(Self::DividendYield),
            "quality" => Some(Self::Quality),
            _ => None,
        }
    }
}

/// Factor metadata
#[derive(Debug, Clone)]
pub struct FactorInfo {
    /// Factor name (unique identifier)
    pub name: &'static str,
    /// Column written to the scored table
    pub column: &'static str,
    /// Factor category
    pub category: FactorCategory,
    /// Brief description of what the factor measures
    pub description: &'static str,
    /// Metrics the factor is built from, as shown to readers
    pub captured_by: &'static str,
    /// Formula in z-score notation
    pub formula: &'static str,
    /// Whether lower raw values score higher
    pub inverted: bool,
    /// Required column names in input data
    pub required_columns: &'static [&'static str],
}

/// Get all available factor info
pub fn available_factors() -> Vec<FactorInfo> {
    vec![
        FactorInfo {
            name: "value",
            column: VALUE,
            category: FactorCategory::Value,
            description: "Relative cheapness from earnings and book multiples",
            captured_by: "P/E, P/BV",
            formula: "-Z(Z(P/E), Z(P/BV))",
            inverted: true,
            required_columns: &[columns::PE, columns::PB],
        },
        FactorInfo {
            name: "size",
            column: SIZE,
            category: FactorCategory::Size,
            description: "Small-cap tilt from market capitalization",
            captured_by: "Market Capitalization",
            formula: "-Z(marketCap)",
            inverted: true,
            required_columns: &[columns::MARKET_CAP],
        },
        FactorInfo {
            name: "volatility",
            column: VOLATILITY,
            category: FactorCategory::Volatility,
            description: "Low systematic risk from market beta",
            captured_by: "Beta",
            formula: "-Z(beta)",
            inverted: true,
            required_columns: &[columns::BETA],
        },
        FactorInfo {
            name: "momentum",
            column: MOMENTUM,
            category: FactorCategory::Momentum,
            description: "Price trend from year-to-date return",
            captured_by: "YTD% Change",
            formula: "Z(ytdPercentChange)",
            inverted: false,
            required_columns: &[columns::YTD_CHANGE],
        },
        FactorInfo {
            name: "dividend_yield",
            column: DIVIDEND_YIELD,
            category: FactorCategory::DividendYield,
            description: "Cash returned to shareholders relative to price",
            captured_by: "Dividend Yield",
            formula: "Z(dividendYield)",
            inverted: false,
            required_columns: &[columns::DIVIDEND_YIELD],
        },
        FactorInfo {
            name: "quality",
            column: QUALITY,
            category: FactorCategory::Quality,
            description: "Profitability and balance sheet strength",
            captured_by: "ROE, D/E",
            formula: "Z(Z(ROE), -Z(DE))",
            inverted: false,
            required_columns: &[columns::ROE, columns::DE],
        },
    ]
}

/// Get factors by category
pub fn factors_by_category(category: FactorCategory) -> Vec<FactorInfo> {
    available_factors()
        .into_iter()
        .filter(|f| f.category == category)
        .collect()
}

/// Get factor info by name or output column
pub fn get_factor_info(name: &str) -> Option<FactorInfo> {
    available_factors()
        .into_iter()
        .find(|f| f.name == name || f.column == name)
}

/// Get a map of all factors indexed by name
pub fn factor_map() -> HashMap<&'static str, FactorInfo> {
    available_factors()
        .into_iter()
        .map(|f| (f.name, f))
        .collect()
}

/// All seven score columns: the composite followed by the six factors.
pub const fn score_columns() -> [&'static str; 7] {
    [
        SCORE,
        VALUE,
        SIZE,
        VOLATILITY,
        MOMENTUM,
        DIVIDEND_YIELD,
        QUALITY,
    ]
}

/// Rank column for a score column, e.g. `rank_score`.
pub fn rank_column(score_column: &str) -> String {
    format!("rank_{score_column}")
}
