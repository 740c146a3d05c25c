//! Methodology documentation page.

use std::fmt;

use rankboard_factors::{FactorInfo, available_factors};

/// Dropped symbols listed before the rest are summarized.
const DROPPED_PREVIEW: usize = 10;

const INTRODUCTION: &str = "Rankboard is a simple factor-based equity screen. It combines \
several financial metrics into six factor scores and an equal-weighted composite that \
summarizes how attractive each stock is across multiple dimensions, following the \
quantitative approach common in academic research and institutional factor investing.";

const CLEANING: [&str; 3] = [
    "Companies that pay no dividend have an empty dividend yield, which is set to 0.",
    "Rows still missing a metric (for example a P/E for loss-making firms, or no YTD return for a new listing) are dropped.",
    "Symbols must be unique; a repeated symbol stops the load.",
];

const RANKING: &str = "Each score is converted to a percentile rank: the fraction of \
securities with an equal or lower score. The best security in every view has rank 1.0, \
and tied scores share the higher rank.";

const SIGN_NOTE: &str = "Negative z-scores are used for P/E, P/BV, market capitalization, \
beta and D/E because lower values of those metrics are better.";

const DEGENERATE_NOTE: &str = "A metric with no variation across the dataset has no \
meaningful z-score; every security scores 0 on it.";

/// The methodology page.
///
/// # Examples
///
/// ```rust
/// use rankboard_output::Documentation;
///
/// let page = Documentation::new().with_data_note("Data as of 2025-08-04.");
/// assert!(page.to_markdown().contains("## Methodology"));
/// ```
#[derive(Debug, Clone)]
pub struct Documentation {
    factors: Vec<FactorInfo>,
    data_note: Option<String>,
    dropped: Vec<String>,
}

impl Default for Documentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Documentation {
    /// Page title.
    pub const TITLE: &'static str = "Documentation";

    /// Create the page for the registered factors.
    pub fn new() -> Self {
        Self {
            factors: available_factors(),
            data_note: None,
            dropped: Vec::new(),
        }
    }

    /// Note on where the dataset comes from.
    pub fn with_data_note(mut self, note: impl Into<String>) -> Self {
        self.data_note = Some(note.into());
        self
    }

    /// Symbols removed by cleaning.
    pub fn with_dropped(mut self, symbols: Vec<String>) -> Self {
        self.dropped = symbols;
        self
    }

    /// Rows of the factor table: factor name and the metrics it uses.
    pub fn factor_table(&self) -> Vec<(String, &'static str)> {
        self.factors
            .iter()
            .map(|f| (f.category.to_string(), f.captured_by))
            .collect()
    }

    fn dropped_preview(&self) -> Option<String> {
        if self.dropped.is_empty() {
            return None;
        }
        let shown: Vec<&str> = self
            .dropped
            .iter()
            .take(DROPPED_PREVIEW)
            .map(String::as_str)
            .collect();
        let mut line = format!(
            "Dropped {} symbols with missing metrics: {}",
            self.dropped.len(),
            shown.join(", ")
        );
        if self.dropped.len() > DROPPED_PREVIEW {
            line.push_str(&format!(" and {} more", self.dropped.len() - DROPPED_PREVIEW));
        }
        line.push('.');
        Some(line)
    }

    fn formulas(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .factors
            .iter()
            .map(|f| format!("{} => {}", f.formula, f.category))
            .collect();
        lines.push("Z(mean(Value, Size, Volatility, Momentum, Dividend Yield, Quality)) => Composite".to_string());
        lines
    }

    /// Render as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", Self::TITLE));

        output.push_str("## Introduction\n\n");
        output.push_str(&format!("{INTRODUCTION}\n\n"));
        output.push_str("| Factors | Captured By |\n");
        output.push_str("|---------|-------------|\n");
        for (factor, captured_by) in self.factor_table() {
            output.push_str(&format!("| {factor} | {captured_by} |\n"));
        }
        output.push('\n');
        if let Some(note) = &self.data_note {
            output.push_str(&format!("*{note}*\n\n"));
        }

        output.push_str("## Methodology\n\n");
        output.push_str("### Data management\n\n");
        for step in CLEANING {
            output.push_str(&format!("- {step}\n"));
        }
        output.push('\n');
        if let Some(dropped) = self.dropped_preview() {
            output.push_str(&format!("{dropped}\n\n"));
        }

        output.push_str("### Calculation\n\n");
        output.push_str("The composite score is the equal-weighted average of\n\n");
        for line in self.formulas() {
            output.push_str(&format!("- `{line}`\n"));
        }
        output.push('\n');
        output.push_str(&format!("{SIGN_NOTE} {DEGENERATE_NOTE}\n\n"));

        output.push_str("### Ranking\n\n");
        output.push_str(&format!("{RANKING}\n"));
        output
    }

    /// Render as plain text for the terminal.
    pub fn to_plain_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", Self::TITLE));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        output.push_str("\nIntroduction\n");
        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!("{INTRODUCTION}\n\n"));
        output.push_str(&format!("  {:<20} {}\n", "Factor", "Captured By"));
        for (factor, captured_by) in self.factor_table() {
            output.push_str(&format!("  {factor:<20} {captured_by}\n"));
        }
        if let Some(note) = &self.data_note {
            output.push_str(&format!("\n{note}\n"));
        }

        output.push_str("\nMethodology\n");
        output.push_str(&"-".repeat(80));
        output.push('\n');
        for step in CLEANING {
            output.push_str(&format!("  * {step}\n"));
        }
        if let Some(dropped) = self.dropped_preview() {
            output.push_str(&format!("  {dropped}\n"));
        }
        output.push('\n');
        for line in self.formulas() {
            output.push_str(&format!("  {line}\n"));
        }
        output.push_str(&format!("\n{SIGN_NOTE}\n{DEGENERATE_NOTE}\n"));

        output.push_str("\nRanking\n");
        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!("{RANKING}\n"));
        output
    }
}

impl fmt::Display for Documentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_text())
    }
}
