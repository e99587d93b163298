//! Insight bundle types
//!
//! These mirror the JSON contract the advisory prompt asks for.
//! Deserialization is lenient: any missing array defaults to empty
//! and optional detail fields stay optional, so a partially
//! conforming model reply still yields a usable bundle.

use serde::{Deserialize, Serialize};

use crate::models::Alert;

/// A budget recommendation for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub category: String,
    pub message: String,
    #[serde(default, rename = "actionSteps")]
    pub action_steps: Vec<String>,
    #[serde(default, rename = "potentialSavings")]
    pub potential_savings: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Pattern,
    Tip,
    Suggestion,
}

/// A general observation about spending behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

/// Everything the insight engine produces in one pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InsightBundle {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub insights: Vec<Insight>,
}
