#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rankboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dashboard;
pub mod documentation;
pub mod export;
pub mod leaderboard;

pub use dashboard::{Dashboard, DashboardConfig};
pub use documentation::Documentation;
pub use export::{ExportError, ExportFormat, Exporter, ScoredRow};
pub use leaderboard::{DisplayColumn, Leaderboard, LeaderboardRow, View};
