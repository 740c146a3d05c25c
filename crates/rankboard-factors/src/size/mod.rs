//! Size factors - measures of market capitalization
//!
//! Size factors capture the tendency of small-cap stocks to outperform
//! large-cap stocks (the size premium).

pub mod market_cap;

pub use market_cap::SizeFactor;
