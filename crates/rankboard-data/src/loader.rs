//! Snapshot file loading and cleaning.
//!
//! The cleaning policy is fixed: an empty dividend yield is a valid business
//! state and becomes `0.0`, while rows missing any other metric are dropped
//! rather than imputed.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{DataError, Result};
use crate::record::{RawRecord, SecurityRecord, columns};
use crate::snapshot::Snapshot;

/// A row removed by cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// Symbol of the dropped row (may be empty).
    pub symbol: String,
    /// Columns that were missing.
    pub missing: Vec<&'static str>,
}

/// Result of loading a snapshot file.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Records that passed cleaning, in file order.
    pub records: Vec<SecurityRecord>,
    /// Rows removed because a metric was missing.
    pub dropped: Vec<DroppedRow>,
}

impl LoadOutcome {
    /// Build the immutable snapshot table from the cleaned records.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::from_records(&self.records)
    }

    /// Number of rows read from the file, before cleaning.
    pub fn rows_read(&self) -> usize {
        self.records.len() + self.dropped.len()
    }
}

/// Load and clean a snapshot file from disk.
pub fn load_csv(path: &Path) -> Result<LoadOutcome> {
    debug!(path = %path.display(), "loading snapshot");
    let file = File::open(path)?;
    load_csv_from_reader(file)
}

/// Load and clean a snapshot from any reader.
///
/// # Errors
///
/// Returns [`DataError::MissingColumn`] if the header lacks a required column,
/// [`DataError::DuplicateSymbol`] if a symbol appears twice after cleaning,
/// and [`DataError::Csv`] for malformed input.
pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<LoadOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in columns::REQUIRED {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::MissingColumn(required.to_string()));
        }
    }

    let mut raw = Vec::new();
    for row in rdr.deserialize::<RawRecord>() {
        raw.push(row?);
    }

    clean_records(raw)
}

/// Apply the cleaning policy to raw rows.
pub fn clean_records(raw: Vec<RawRecord>) -> Result<LoadOutcome> {
    let mut records = Vec::with_capacity(raw.len());
    let mut dropped = Vec::new();
    let mut seen = HashSet::new();

    for row in raw {
        let missing = row.missing_fields();
        if !missing.is_empty() {
            dropped.push(DroppedRow {
                symbol: row.symbol.trim().to_string(),
                missing,
            });
            continue;
        }

        if let Some(record) = row.into_record() {
            if !seen.insert(record.symbol.clone()) {
                return Err(DataError::DuplicateSymbol(record.symbol));
            }
            records.push(record);
        }
    }

    if !dropped.is_empty() {
        let symbols: Vec<&str> = dropped.iter().map(|d| d.symbol.as_str()).collect();
        info!(count = dropped.len(), ?symbols, "dropped rows with missing metrics");
    }
    info!(rows = records.len(), "snapshot loaded");

    Ok(LoadOutcome { records, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "symbol,marketCap,pe,pb,dividendYield,ytdPercentChange,de,roe,beta\n";

    #[test]
    fn test_load_complete_rows() {
        let data = format!(
            "{HEADER}AOT,900000,45.1,6.2,1.1,-20.5,0.9,14.0,0.8\nPTT,950000,10.3,0.9,6.3,-5.0,1.2,8.5,0.7\n"
        );
        let outcome = load_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.dropped.is_empty());
        assert_eq!(outcome.records[0].symbol, "AOT");
        assert_eq!(outcome.records[1].price_to_earnings, 10.3);
    }

    #[test]
    fn test_empty_dividend_defaults() {
        let data = format!("{HEADER}AAV,30000,15.0,2.0,,10.0,3.5,12.0,1.3\n");
        let outcome = load_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].dividend_yield, 0.0);
    }

    #[test]
    fn test_missing_pe_dropped() {
        let data = format!(
            "{HEADER}AAV,30000,,2.0,,10.0,3.5,12.0,1.3\nPTT,950000,10.3,0.9,6.3,-5.0,1.2,8.5,0.7\n"
        );
        let outcome = load_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].symbol, "AAV");
        assert_eq!(outcome.dropped[0].missing, vec![columns::PE]);
        assert_eq!(outcome.rows_read(), 2);
    }

    #[test]
    fn test_missing_header_column() {
        let data = "symbol,marketCap,pe,pb,dividendYield,ytdPercentChange,de,roe\nPTT,1,2,3,4,5,6,7\n";
        let err = load_csv_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "beta"));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let data = format!(
            "{HEADER}PTT,950000,10.3,0.9,6.3,-5.0,1.2,8.5,0.7\nPTT,950000,10.3,0.9,6.3,-5.0,1.2,8.5,0.7\n"
        );
        let err = load_csv_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::DuplicateSymbol(ref s) if s == "PTT"));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = "name,symbol,marketCap,pe,pb,dividendYield,ytdPercentChange,de,roe,beta\n\
                    Airports,AOT,900000,45.1,6.2,1.1,-20.5,0.9,14.0,0.8\n";
        let outcome = load_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].market_capitalization, 900000.0);
    }

    #[test]
    fn test_unparseable_cell_dropped() {
        let data = format!("{HEADER}GULF,500000,30.0,4.0,2.0,-,1.0,10.0,0.9\n");
        let outcome = load_csv_from_reader(data.as_bytes()).unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.dropped[0].missing, vec![columns::YTD_CHANGE]);
    }
}
