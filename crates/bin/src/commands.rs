//! Subcommand implementations.

use std::path::Path;

use rankboard::data::{LoadOutcome, load_csv};
use rankboard::factors::{
    FactorCategory, FactorInfo, FactorScoreEngine, ScoredTable, available_factors,
    factors_by_category,
};
use rankboard::output::{Dashboard, Documentation, ExportFormat, Exporter, Leaderboard, View};
use tracing::info;

use crate::config::AppConfig;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load, clean and score a snapshot file.
fn load_and_score(
    config: &AppConfig,
    file: &Path,
) -> Result<(ScoredTable, LoadOutcome), Box<dyn std::error::Error>> {
    let outcome = load_csv(file)?;
    let snapshot = outcome.snapshot()?;
    let engine = FactorScoreEngine::new(config.engine.clone());
    let table = engine.score(&snapshot)?;
    info!(
        rows = table.len(),
        dropped = outcome.dropped.len(),
        "scored snapshot"
    );
    Ok((table, outcome))
}

fn print_dropped(outcome: &LoadOutcome) {
    if outcome.dropped.is_empty() {
        return;
    }
    let symbols: Vec<&str> = outcome.dropped.iter().map(|d| d.symbol.as_str()).collect();
    println!(
        "Dropped {} of {} rows with missing metrics: {}",
        outcome.dropped.len(),
        outcome.rows_read(),
        symbols.join(", ")
    );
}

pub(crate) fn score(
    config: &AppConfig,
    file: &Path,
    output: Option<&Path>,
    format: ExportFormat,
) -> CommandResult {
    let (table, _) = load_and_score(config, file)?;

    match output {
        Some(path) => {
            table.export_to_file(path, format)?;
            println!("Wrote {} scored rows to {}", table.len(), path.display());
        }
        None => print!("{}", table.export_to_string(format)?),
    }
    Ok(())
}

pub(crate) fn dashboard(config: &AppConfig, file: &Path, markdown: bool) -> CommandResult {
    let (table, outcome) = load_and_score(config, file)?;
    let dashboard = Dashboard::build(&table, &config.dashboard)?;

    if markdown {
        println!("{}", dashboard.to_markdown());
    } else {
        println!("{}", dashboard.to_ascii_table());
    }
    print_dropped(&outcome);
    Ok(())
}

pub(crate) fn top(
    config: &AppConfig,
    file: &Path,
    view: View,
    n: usize,
    markdown: bool,
) -> CommandResult {
    let (table, _) = load_and_score(config, file)?;
    let board = Leaderboard::build(&table, view, n)?;

    if markdown {
        println!("{}", board.to_markdown());
    } else {
        println!("{}", board.to_ascii_table());
    }
    Ok(())
}

pub(crate) fn docs(config: &AppConfig, file: Option<&Path>, markdown: bool) -> CommandResult {
    let mut page = Documentation::new();
    if let Some(note) = &config.documentation.data_note {
        page = page.with_data_note(note.clone());
    }
    if let Some(file) = file {
        let outcome = load_csv(file)?;
        page = page.with_dropped(outcome.dropped.into_iter().map(|d| d.symbol).collect());
    }

    if markdown {
        println!("{}", page.to_markdown());
    } else {
        println!("{page}");
    }
    Ok(())
}

pub(crate) fn factors(category: Option<&str>, verbose: bool) -> CommandResult {
    let factors: Vec<FactorInfo> = match category {
        Some(name) => {
            let category = FactorCategory::parse(name)
                .ok_or_else(|| format!("unknown factor category: {name}"))?;
            factors_by_category(category)
        }
        None => available_factors(),
    };

    println!(
        "{:<16} {:<10} {:<16} {}",
        "Factor", "Column", "Category", "Captured By"
    );
    println!("{}", "-".repeat(70));
    for factor in &factors {
        println!(
            "{:<16} {:<10} {:<16} {}",
            factor.name,
            factor.column,
            factor.category.to_string(),
            factor.captured_by
        );
        if verbose {
            println!("    {}", factor.description);
            println!("    formula: {}", factor.formula);
            println!("    inputs:  {}", factor.required_columns.join(", "));
            if factor.inverted {
                println!("    lower raw values score higher");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_snapshot.csv")
    }

    #[test]
    fn test_load_and_score_sample() {
        let (table, outcome) = load_and_score(&AppConfig::default(), &sample()).unwrap();
        assert_eq!(table.len(), 15);
        assert_eq!(outcome.dropped.len(), 2);
        assert!(table.degenerate_columns().is_empty());
    }

    #[test]
    fn test_factors_unknown_category() {
        assert!(factors(Some("growth"), false).is_err());
        assert!(factors(Some("quality"), true).is_ok());
    }

    #[test]
    fn test_score_writes_file() {
        let path = std::env::temp_dir().join("rankboard-cli-score.json");
        score(&AppConfig::default(), &sample(), Some(&path), ExportFormat::Json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('['));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_errors() {
        let missing = PathBuf::from("no/such/snapshot.csv");
        assert!(dashboard(&AppConfig::default(), &missing, false).is_err());
    }
}
