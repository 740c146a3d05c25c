//! All six leaderboards rendered together.

use chrono::{DateTime, Utc};
use rankboard_factors::{Result, ScoredTable};
use serde::{Deserialize, Serialize};

use crate::leaderboard::{Leaderboard, View};

/// Dashboard sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rows in the overall leaderboard
    pub top_overall: usize,
    /// Rows in each single-factor leaderboard
    pub top_per_factor: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_overall: 10,
            top_per_factor: 5,
        }
    }
}

impl DashboardConfig {
    /// Row count for a view.
    pub const fn size_of(&self, view: View) -> usize {
        match view {
            View::Overall => self.top_overall,
            _ => self.top_per_factor,
        }
    }
}

/// The overall leaderboard followed by the five factor leaderboards.
#[derive(Debug, Clone)]
pub struct Dashboard {
    boards: Vec<Leaderboard>,
    securities: usize,
    degenerate: Vec<String>,
    generated_at: DateTime<Utc>,
}

impl Dashboard {
    /// Title shown above the boards.
    pub const TITLE: &'static str = "Factor Investing Dashboard";

    /// Build every view from a scored table.
    pub fn build(table: &ScoredTable, config: &DashboardConfig) -> Result<Self> {
        let boards = View::ALL
            .iter()
            .map(|view| Leaderboard::build(table, *view, config.size_of(*view)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            boards,
            securities: table.len(),
            degenerate: table.degenerate_columns().to_vec(),
            generated_at: Utc::now(),
        })
    }

    /// Leaderboards in display order.
    pub fn boards(&self) -> &[Leaderboard] {
        &self.boards
    }

    /// Leaderboard for one view.
    pub fn board(&self, view: View) -> Option<&Leaderboard> {
        self.boards.iter().find(|b| b.view() == view)
    }

    /// When the dashboard was built.
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    fn notes(&self) -> Vec<String> {
        let mut notes = vec![format!(
            "{} securities ranked. Generated {}.",
            self.securities,
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        )];
        if !self.degenerate.is_empty() {
            notes.push(format!(
                "No variation in {}; those inputs score 0 for every security.",
                self.degenerate.join(", ")
            ));
        }
        notes
    }

    /// Format every board for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", Self::TITLE));
        for note in self.notes() {
            output.push_str(&format!("{note}\n"));
        }
        for board in &self.boards {
            output.push_str(&board.to_ascii_table());
        }
        output
    }

    /// Format every board as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", Self::TITLE));
        for note in self.notes() {
            output.push_str(&format!("{note}\n\n"));
        }
        for board in &self.boards {
            output.push_str(&board.to_markdown());
            output.push('\n');
        }
        output
    }
}
