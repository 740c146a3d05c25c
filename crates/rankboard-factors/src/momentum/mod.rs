//! Momentum factors - measures of price trend
//!
//! Recent winners tend to keep outperforming over the following months.

pub mod ytd;

pub use ytd::MomentumFactor;
