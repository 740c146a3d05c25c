//! Quality factors - measures of profitability and financial stability

pub mod composite;

pub use composite::{QualityConfig, QualityFactor};
