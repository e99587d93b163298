//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `report` - Budget report from a feed CSV
//! - `plan` - Budget reallocation by percentage
//! - `insights` - Advisory insight generation
//! - `fetch` - Sandbox banking API pull

pub mod fetch;
pub mod insights;
pub mod plan;
pub mod report;

// Re-export command functions for main.rs
pub use fetch::*;
pub use insights::*;
pub use plan::*;
pub use report::*;

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use spendwatch_core::DateRange;

/// Parses "grocery=400,dining=150" into a category map. Keys are
/// lower-cased to match the normalized transaction vocabulary.
pub fn parse_category_map(spec: &str) -> Result<BTreeMap<String, f64>> {
    let mut map = BTreeMap::new();
    for pair in spec.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let Some((category, value)) = pair.split_once('=') else {
            bail!("invalid entry '{}' (expected category=amount)", pair);
        };
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("invalid amount in '{}'", pair))?;
        map.insert(category.trim().to_lowercase(), value);
    }
    if map.is_empty() {
        bail!("no category entries in '{}'", spec);
    }
    Ok(map)
}

/// Builds a date range from optional YYYY-MM-DD bounds.
pub fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    let parse = |s: &str| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}' (use YYYY-MM-DD)", s))
    };
    let start = from.map(parse).transpose()?;
    let end = to.map(parse).transpose()?;
    Ok(DateRange::new(start, end)?)
}

/// Truncate a string to a maximum length, adding "..." if truncated.
/// Cuts on a char boundary so multi-byte descriptions never panic.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= keep)
        .last()
        .unwrap_or(0);
    format!("{}...", &s[..cut])
}
