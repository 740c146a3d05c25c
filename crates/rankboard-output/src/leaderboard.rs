//! Top-N leaderboards over a scored table.

use std::cmp::Ordering;
use std::fmt;

use rankboard_data::columns;
use rankboard_factors::registry::{DIVIDEND_YIELD, MOMENTUM, QUALITY, SCORE, VALUE, VOLATILITY};
use rankboard_factors::{Result, ScoredTable, rank_column};
use tracing::debug;

/// A numeric column shown on a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayColumn {
    /// Column in the scored table
    pub column: &'static str,
    /// Header shown to readers
    pub label: &'static str,
    /// Decimal places when rendered
    pub decimals: usize,
}

impl DisplayColumn {
    const fn new(column: &'static str, label: &'static str, decimals: usize) -> Self {
        Self {
            column,
            label,
            decimals,
        }
    }

    fn format(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.decimals)
    }
}

const ROE: DisplayColumn = DisplayColumn::new(columns::ROE, "ROE", 2);
const PE: DisplayColumn = DisplayColumn::new(columns::PE, "P/E", 2);
const PB: DisplayColumn = DisplayColumn::new(columns::PB, "P/BV", 2);
const DE: DisplayColumn = DisplayColumn::new(columns::DE, "D/E", 2);
const DIVIDEND: DisplayColumn = DisplayColumn::new(columns::DIVIDEND_YIELD, "Dividend Yield", 2);
const YTD: DisplayColumn = DisplayColumn::new(columns::YTD_CHANGE, "YTD% Change", 2);
const BETA: DisplayColumn = DisplayColumn::new(columns::BETA, "Beta", 2);
const MARKET_CAP: DisplayColumn =
    DisplayColumn::new(columns::MARKET_CAP, "Market Capitalization", 0);

/// Header of the symbol column.
pub const SYMBOL_LABEL: &str = "Symbol";

/// The dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Composite score
    Overall,
    /// Value factor
    Value,
    /// Momentum factor
    Momentum,
    /// Quality factor
    Quality,
    /// Low-volatility factor
    LowVolatility,
    /// Dividend yield factor
    DividendYield,
}

impl View {
    /// All views in dashboard order.
    pub const ALL: [Self; 6] = [
        Self::Overall,
        Self::Value,
        Self::Momentum,
        Self::Quality,
        Self::LowVolatility,
        Self::DividendYield,
    ];

    /// Score column the view ranks by.
    pub const fn score_column(&self) -> &'static str {
        match self {
            Self::Overall => SCORE,
            Self::Value => VALUE,
            Self::Momentum => MOMENTUM,
            Self::Quality => QUALITY,
            Self::LowVolatility => VOLATILITY,
            Self::DividendYield => DIVIDEND_YIELD,
        }
    }

    /// Rank column the view sorts on, e.g. `rank_val`.
    pub fn rank_column(&self) -> String {
        rank_column(self.score_column())
    }

    /// Heading of the view.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Overall => "Top Highest-Ranked Stocks Based on Multi-Factor Analysis",
            Self::Value => "Top Value Stocks",
            Self::Momentum => "Top Momentum Stocks",
            Self::Quality => "Top Highest Quality Stocks",
            Self::LowVolatility => "Top Low-Volatility Stocks",
            Self::DividendYield => "Top High Dividend Yield Stocks",
        }
    }

    /// One-line description of what drives the view.
    pub const fn caption(&self) -> &'static str {
        match self {
            Self::Overall => "Based on the equal-weighted composite of all six factors.",
            Self::Value => "Based on P/E and P/BV.",
            Self::Momentum => "Based on YTD price performance.",
            Self::Quality => "Based on ROE and D/E.",
            Self::LowVolatility => "Based on beta.",
            Self::DividendYield => "Based on Dividend Yield.",
        }
    }

    /// Numeric columns shown after the symbol.
    pub const fn display_columns(&self) -> &'static [DisplayColumn] {
        match self {
            Self::Overall => &[ROE, PE, PB, DE, DIVIDEND, YTD, BETA, MARKET_CAP],
            Self::Value => &[PE, PB],
            Self::Momentum => &[YTD],
            Self::Quality => &[ROE, DE],
            Self::LowVolatility => &[BETA],
            Self::DividendYield => &[DIVIDEND],
        }
    }

    /// Parse a view from a user-supplied name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "overall" | "score" | "composite" => Some(Self::Overall),
            "value" | "val" => Some(Self::Value),
            "momentum" | "mome" => Some(Self::Momentum),
            "quality" | "q" => Some(Self::Quality),
            "lowvolatility" | "volatility" | "vol" => Some(Self::LowVolatility),
            "dividendyield" | "dividend" | "divyield" => Some(Self::DividendYield),
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Overall => "Overall",
            Self::Value => "Value",
            Self::Momentum => "Momentum",
            Self::Quality => "Quality",
            Self::LowVolatility => "Low Volatility",
            Self::DividendYield => "Dividend Yield",
        };
        f.write_str(name)
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    /// Security symbol
    pub symbol: String,
    /// Percentile rank the row was sorted on
    pub rank: f64,
    /// Values of the view's display columns, in order
    pub values: Vec<f64>,
}

/// A sorted, truncated view of a scored table.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    view: View,
    rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Build the top `n` rows of `view`.
    ///
    /// Rows are sorted by the view's rank column, highest first, with ties
    /// broken by symbol. `n` larger than the table is clamped.
    pub fn build(table: &ScoredTable, view: View, n: usize) -> Result<Self> {
        let symbols = table.symbols()?;
        let ranks = table.values(&view.rank_column())?;
        let values = view
            .display_columns()
            .iter()
            .map(|c| table.values(c.column))
            .collect::<Result<Vec<_>>>()?;

        let mut order: Vec<usize> = (0..symbols.len()).collect();
        order.sort_by(|&a, &b| match ranks[b].total_cmp(&ranks[a]) {
            Ordering::Equal => symbols[a].cmp(&symbols[b]),
            other => other,
        });
        order.truncate(n);

        let rows = order
            .into_iter()
            .map(|i| LeaderboardRow {
                symbol: symbols[i].clone(),
                rank: ranks[i],
                values: values.iter().map(|column| column[i]).collect(),
            })
            .collect::<Vec<_>>();

        debug!(%view, rows = rows.len(), "built leaderboard");
        Ok(Self { view, rows })
    }

    /// The view this board shows.
    pub const fn view(&self) -> View {
        self.view
    }

    /// Rows, best first.
    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    /// Symbols, best first.
    pub fn symbols(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.symbol.as_str()).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the board has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Heading including the row count, e.g. `Top 5 Value Stocks`.
    pub fn heading(&self) -> String {
        self.view
            .title()
            .replacen("Top", &format!("Top {}", self.rows.len()), 1)
    }

    fn headers(&self) -> Vec<&'static str> {
        std::iter::once(SYMBOL_LABEL)
            .chain(self.view.display_columns().iter().map(|c| c.label))
            .collect()
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.symbol.clone())
                    .chain(
                        self.view
                            .display_columns()
                            .iter()
                            .zip(&row.values)
                            .map(|(c, v)| c.format(*v)),
                    )
                    .collect()
            })
            .collect()
    }

    /// Format as an ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let headers = self.headers();
        let cells = self.cells();
        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(h.len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

        let mut output = String::new();
        output.push_str(&format!("\n{}\n", self.heading()));
        output.push_str(&format!("{}\n", self.view.caption()));
        output.push_str(&"=".repeat(total));
        output.push('\n');

        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (h, w))| align(h, *w, i == 0))
            .collect();
        output.push_str(header_line.join("  ").trim_end());
        output.push('\n');
        output.push_str(&"-".repeat(total));
        output.push('\n');

        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, w))| align(cell, *w, i == 0))
                .collect();
            output.push_str(line.join("  ").trim_end());
            output.push('\n');
        }

        output.push_str(&"=".repeat(total));
        output.push('\n');
        output
    }

    /// Format as a Markdown table.
    pub fn to_markdown(&self) -> String {
        let headers = self.headers();

        let mut output = String::new();
        output.push_str(&format!("## {}\n\n", self.heading()));
        output.push_str(&format!("*{}*\n\n", self.view.caption()));
        output.push_str(&format!("| {} |\n", headers.join(" | ")));
        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        output.push_str(&format!("|{}|\n", separators.join("|")));
        for row in self.cells() {
            output.push_str(&format!("| {} |\n", row.join(" | ")));
        }
        output
    }
}

fn align(text: &str, width: usize, left: bool) -> String {
    if left {
        format!("{text:<width$}")
    } else {
        format!("{text:>width$}")
    }
}
