//! Value factors - measures of relative cheapness
//!
//! Cheap securities trade at low multiples of earnings and book value, so
//! both multiples enter with a negative sign.

pub mod composite;

pub use composite::{ValueConfig, ValueFactor};
