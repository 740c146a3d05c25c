#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rankboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use rankboard_data as data;
pub use rankboard_factors as factors;
pub use rankboard_output as output;

pub use rankboard_data::{Snapshot, load_csv};
pub use rankboard_factors::{FactorScoreEngine, ScoredTable};
pub use rankboard_output::{Dashboard, Leaderboard, View};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
