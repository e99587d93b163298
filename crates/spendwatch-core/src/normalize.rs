//! Transaction normalization
//!
//! Turns raw feed records into `Transaction`s. Parsing is lenient
//! about formats but strict about outcomes: a record whose date or
//! amount cannot be parsed, or whose category is missing, is
//! discarded rather than failing the whole import.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{RawRecord, Transaction};

/// Normalizes a raw record, or returns `None` when it should be
/// discarded.
pub fn normalize_record(raw: &RawRecord) -> Option<Transaction> {
    let category = match &raw.category {
        Some(c) if !c.trim().is_empty() => c.trim().to_lowercase(),
        _ => {
            debug!(description = %raw.description, "discarding record without category");
            return None;
        }
    };

    let date = match parse_date(&raw.date) {
        Ok(d) => d,
        Err(_) => {
            debug!(date = %raw.date, "discarding record with unparseable date");
            return None;
        }
    };

    let amount = match parse_amount(&raw.amount) {
        Ok(a) => a,
        Err(_) => {
            debug!(amount = %raw.amount, "discarding record with unparseable amount");
            return None;
        }
    };

    let description = raw.description.trim().to_string();
    let import_hash = import_hash(date, &description, amount);

    Some(Transaction {
        date,
        description,
        category,
        amount,
        import_hash,
    })
}

/// Parses a date string, trying the formats bank exports actually use.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    let trimmed = date_str.trim();

    let formats = ["%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d", "%m-%d-%Y", "%d/%m/%Y"];
    for format in &formats {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(Error::InvalidData(format!("unable to parse date: {}", trimmed)))
}

/// Parses an amount string, handling currency symbols, thousands
/// separators, and parenthesized negatives.
pub fn parse_amount(amount_str: &str) -> Result<f64> {
    let mut cleaned = amount_str
        .trim()
        .replace('$', "")
        .replace(',', "")
        .replace(' ', "");

    let negative = cleaned.starts_with('(') && cleaned.ends_with(')');
    if negative {
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }

    let amount: f64 = cleaned
        .parse()
        .map_err(|_| Error::InvalidData(format!("unable to parse amount: {}", amount_str)))?;

    Ok(if negative { -amount } else { amount })
}

/// Deterministic hash over the fields that identify a transaction
/// across feeds. Category is excluded on purpose; the same purchase
/// may be categorized differently by different feeds.
pub fn import_hash(date: NaiveDate, description: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string());
    hasher.update(description);
    hasher.update(amount.to_be_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, desc: &str, category: Option<&str>, amount: &str) -> RawRecord {
        RawRecord {
            date: date.to_string(),
            description: desc.to_string(),
            category: category.map(|c| c.to_string()),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_normalize_valid_record() {
        let txn = normalize_record(&raw("02/14/2025", "WHOLE FOODS", Some("Grocery"), "$45.20"))
            .unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
        assert_eq!(txn.category, "grocery");
        assert_eq!(txn.amount, 45.20);
        assert!(!txn.import_hash.is_empty());
    }

    #[test]
    fn test_normalize_discards_missing_category() {
        assert!(normalize_record(&raw("02/14/2025", "MYSTERY", None, "10.00")).is_none());
        assert!(normalize_record(&raw("02/14/2025", "MYSTERY", Some("  "), "10.00")).is_none());
    }

    #[test]
    fn test_normalize_discards_bad_date_and_amount() {
        assert!(normalize_record(&raw("not-a-date", "X", Some("dining"), "10.00")).is_none());
        assert!(normalize_record(&raw("02/14/2025", "X", Some("dining"), "ten")).is_none());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(parse_date("01/15/2025").unwrap(), expected);
        assert_eq!(parse_date("2025-01-15").unwrap(), expected);
        assert_eq!(parse_date("01-15-2025").unwrap(), expected);
        assert_eq!(parse_date("01/15/25").unwrap(), expected);
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("(45.00)").unwrap(), -45.00);
        assert_eq!(parse_amount("  89.99 ").unwrap(), 89.99);
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_import_hash_stable_and_distinct() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
        let a = import_hash(date, "COFFEE SHOP", 4.50);
        let b = import_hash(date, "COFFEE SHOP", 4.50);
        let c = import_hash(date, "COFFEE SHOP", 4.51);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
