//! Dividend yield factors
//!
//! Companies that pay no dividend carry a yield of zero, which is a valid
//! observation rather than missing data.

pub mod dividend_yield;

pub use dividend_yield::DividendYieldFactor;
