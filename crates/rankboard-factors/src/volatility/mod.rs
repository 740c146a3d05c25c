//! Volatility factors - measures of systematic risk
//!
//! Low-beta securities score higher (the low-volatility anomaly).

pub mod beta;

pub use beta::LowVolatilityFactor;
