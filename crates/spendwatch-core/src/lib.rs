//! Spendwatch Core Library
//!
//! Shared functionality for the spendwatch budget dashboard:
//! - CSV import for the transaction feed export
//! - Sandbox banking API client
//! - Keyword-rule transaction categorizer
//! - Spending aggregation against per-category limits
//! - Budget limit manager with reallocation validation
//! - Threshold alert evaluator
//! - Insight engine with pluggable advisory backends and
//!   deterministic fallback heuristics

pub mod aggregate;
pub mod ai;
pub mod alerts;
pub mod budget;
pub mod categorize;
pub mod error;
pub mod feed;
pub mod import;
pub mod insights;
pub mod models;
pub mod normalize;
pub mod session;

/// Test utilities including the mock advisory server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{aggregate, percent_of_limit, recompute_percentages};
pub use ai::{AdvisorBackend, AdvisorClient, MockAdvisor, OpenAiAdvisor};
pub use alerts::{evaluate_alerts, overall_status};
pub use budget::BudgetManager;
pub use categorize::categorize;
pub use error::{Error, Result};
pub use feed::SandboxFeed;
pub use import::{parse_feed_csv, ImportSummary};
pub use insights::{Insight, InsightBundle, InsightEngine, InsightKind, Recommendation};
pub use models::{
    Alert, BudgetStatus, CategoryBudget, DateRange, RawRecord, Severity, StatusLevel, Transaction,
};
pub use session::BudgetSession;
