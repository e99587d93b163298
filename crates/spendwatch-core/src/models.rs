//! Core domain models for spendwatch

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A transaction as it arrives from a feed, before normalization.
///
/// Field values are kept as raw strings; the normalizer owns all
/// parsing and discards records it cannot make sense of.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: String,
    pub description: String,
    pub category: Option<String>,
    pub amount: String,
}

/// A normalized transaction. Positive amounts are spending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Lower-cased category key, always present after normalization.
    pub category: String,
    pub amount: f64,
    /// SHA-256 over date, description, and amount. Used to dedup
    /// the same transaction arriving through more than one feed.
    pub import_hash: String,
}

/// Per-category budget state: the configured limit, the spending
/// aggregated against it, and the derived percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    pub limit: f64,
    pub spent: f64,
    /// spent / limit * 100, or 0 when limit is 0.
    pub percentage: f64,
}

impl CategoryBudget {
    pub fn with_limit(limit: f64) -> Self {
        Self {
            limit,
            spent: 0.0,
            percentage: 0.0,
        }
    }
}

/// Inclusive date range. `None` on either end means unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range, rejecting start > end.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(Error::Validation(format!(
                    "date range start {} is after end {}",
                    s, e
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// Range with no bounds; every date is in range.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Both endpoints are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Alert severity, ordered by urgency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(Error::InvalidData(format!("unknown severity: {}", s))),
        }
    }
}

/// A budget alert, shown to the user as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    /// Absent for aggregate alerts (e.g. the degraded-advisory notice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Alert {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            category: None,
        }
    }

    pub fn for_category(
        severity: Severity,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            category: Some(category.into()),
        }
    }
}

/// Overall budget health, derived from the totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Warning,
    Error,
}

/// Aggregate spending position across all categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    pub total_spent: f64,
    pub total_limit: f64,
    pub percentage: f64,
    pub level: StatusLevel,
}
