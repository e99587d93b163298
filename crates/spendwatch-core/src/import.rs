//! CSV feed import
//!
//! Parses the transaction feed export: a headered CSV with `Date`,
//! `Activity Description`, `Category`, and `Amount` columns. Rows
//! that fail normalization are counted and skipped, never fatal.

use std::io::Read;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{RawRecord, Transaction};
use crate::normalize::normalize_record;

/// Result of a CSV import.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub transactions: Vec<Transaction>,
    /// Rows present in the file but discarded during normalization.
    pub discarded: usize,
}

/// Parses a feed CSV from any reader.
///
/// Column matching is by header name, case-insensitive, so column
/// order does not matter. `Date`, `Activity Description`, and
/// `Amount` are required; `Category` is optional per row but rows
/// without one are discarded.
pub fn parse_feed_csv<R: Read>(reader: R) -> Result<ImportSummary> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };

    let date_col = find("Date")
        .ok_or_else(|| Error::Import("missing required column: Date".to_string()))?;
    let description_col = find("Activity Description").ok_or_else(|| {
        Error::Import("missing required column: Activity Description".to_string())
    })?;
    let amount_col = find("Amount")
        .ok_or_else(|| Error::Import("missing required column: Amount".to_string()))?;
    let category_col = find("Category");

    let mut transactions = Vec::new();
    let mut discarded = 0usize;

    for result in csv_reader.records() {
        let record = result?;
        let get = |col: usize| record.get(col).unwrap_or("").to_string();

        let raw = RawRecord {
            date: get(date_col),
            description: get(description_col),
            category: category_col.map(&get).filter(|c| !c.is_empty()),
            amount: get(amount_col),
        };

        match normalize_record(&raw) {
            Some(txn) => transactions.push(txn),
            None => discarded += 1,
        }
    }

    debug!(
        imported = transactions.len(),
        discarded, "parsed feed CSV"
    );

    Ok(ImportSummary {
        transactions,
        discarded,
    })
}
