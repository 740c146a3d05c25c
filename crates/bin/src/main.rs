//! Rankboard CLI binary.
//!
//! Scores a snapshot of equity metrics and prints leaderboards, exports and
//! the methodology page.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use rankboard::factors::DegeneratePolicy;
use rankboard::output::{ExportError, ExportFormat, View};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "rankboard")]
#[command(about = "Rankboard: factor-investing scores and leaderboards", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (overrides ./rankboard.toml and the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail on metrics with no variation instead of scoring them as 0
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    log_verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a snapshot and print or export the table
    Score {
        /// Snapshot CSV file
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format (csv, json or pretty-json)
        #[arg(long, default_value = "csv", value_parser = parse_format)]
        format: ExportFormat,
    },

    /// Show every leaderboard
    Dashboard {
        /// Snapshot CSV file
        file: PathBuf,

        /// Rows in the overall leaderboard
        #[arg(long)]
        top_overall: Option<usize>,

        /// Rows in each factor leaderboard
        #[arg(long)]
        top_factor: Option<usize>,

        /// Render as Markdown
        #[arg(long)]
        markdown: bool,
    },

    /// Show a single leaderboard
    Top {
        /// Snapshot CSV file
        file: PathBuf,

        /// overall, value, momentum, quality, low-volatility or dividend-yield
        #[arg(long, value_parser = parse_view)]
        view: View,

        /// Number of rows
        #[arg(short, long)]
        n: Option<usize>,

        /// Render as Markdown
        #[arg(long)]
        markdown: bool,
    },

    /// Print the methodology page
    Docs {
        /// Render as Markdown
        #[arg(long)]
        markdown: bool,

        /// Snapshot whose dropped rows should be listed
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List the registered factors
    Factors {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,

        /// Show formulas and input columns
        #[arg(long)]
        verbose: bool,
    },
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: ExportError| e.to_string())
}

fn parse_view(s: &str) -> Result<View, String> {
    View::parse(s).ok_or_else(|| format!("unknown view: {s}"))
}

fn init_tracing(config: &AppConfig, verbosity: u8) {
    let default = match verbosity {
        0 => config.log_level.as_deref().unwrap_or("warn"),
        1 => "info",
        _ => "debug",
    };
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    } else {
        EnvFilter::new(default)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.strict {
        config.engine.degenerate_policy = DegeneratePolicy::Reject;
    }
    init_tracing(&config, cli.log_verbosity);

    match cli.command {
        Commands::Score {
            file,
            output,
            format,
        } => {
            commands::score(&config, &file, output.as_deref(), format)?;
        }
        Commands::Dashboard {
            file,
            top_overall,
            top_factor,
            markdown,
        } => {
            if let Some(n) = top_overall {
                config.dashboard.top_overall = n;
            }
            if let Some(n) = top_factor {
                config.dashboard.top_per_factor = n;
            }
            commands::dashboard(&config, &file, markdown)?;
        }
        Commands::Top {
            file,
            view,
            n,
            markdown,
        } => {
            let n = n.unwrap_or_else(|| config.dashboard.size_of(view));
            commands::top(&config, &file, view, n, markdown)?;
        }
        Commands::Docs { markdown, file } => {
            commands::docs(&config, file.as_deref(), markdown)?;
        }
        Commands::Factors { category, verbose } => {
            commands::factors(category.as_deref(), verbose)?;
        }
    }

    Ok(())
}
