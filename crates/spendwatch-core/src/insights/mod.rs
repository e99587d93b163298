//! Spending insights
//!
//! Types for the advisory reply contract and the engine that
//! produces insight bundles, with deterministic fallbacks when no
//! advisory backend is available or the call fails.

mod engine;
mod types;

pub use engine::InsightEngine;
pub use types::{Insight, InsightBundle, InsightKind, Recommendation};
