//! Insight engine
//!
//! Builds the advisory prompt from the current spending picture,
//! calls the configured backend under a timeout, and parses the
//! reply. Every failure path degrades to deterministic fallback
//! heuristics; `generate_insights` never errors.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, warn};

use crate::aggregate::percent_of_limit;
use crate::ai::parsing::parse_insight_bundle;
use crate::ai::{AdvisorBackend, AdvisorClient};
use crate::models::{Alert, CategoryBudget, Severity, Transaction};

use super::types::{Insight, InsightBundle, InsightKind};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Most recent transactions included in the prompt.
const PROMPT_TRANSACTION_LIMIT: usize = 20;

const DEGRADED_MESSAGE: &str =
    "Unable to generate AI insights at the moment. Showing default recommendations.";

#[derive(Debug, Clone)]
pub struct InsightEngine {
    advisor: Option<AdvisorClient>,
    timeout: Duration,
}

impl InsightEngine {
    pub fn new(advisor: Option<AdvisorClient>) -> Self {
        Self {
            advisor,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Engine wired from the environment. With no backend configured
    /// the engine still works, serving fallback insights only.
    pub fn from_env() -> Self {
        Self::new(AdvisorClient::from_env())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produces an insight bundle for the current spending picture.
    /// Infallible: backend errors, timeouts, and unparseable replies
    /// all degrade to the fallback bundle with a disclosure alert.
    pub async fn generate_insights(
        &self,
        transactions: &[Transaction],
        budgets: &BTreeMap<String, CategoryBudget>,
    ) -> InsightBundle {
        let Some(advisor) = &self.advisor else {
            debug!("no advisory backend configured, serving fallback insights");
            return fallback_insights(budgets);
        };

        let prompt = build_prompt(transactions, budgets);
        match tokio::time::timeout(self.timeout, advisor.advise(&prompt)).await {
            Ok(Ok(reply)) => match parse_insight_bundle(&reply) {
                Ok(bundle) => {
                    debug!(
                        recommendations = bundle.recommendations.len(),
                        insights = bundle.insights.len(),
                        "advisory insights generated"
                    );
                    bundle
                }
                Err(e) => {
                    warn!(error = %e, "advisory reply unusable, degrading to fallbacks");
                    degraded_insights(budgets)
                }
            },
            Ok(Err(e)) => {
                warn!(error = %e, "advisory call failed, degrading to fallbacks");
                degraded_insights(budgets)
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "advisory call timed out, degrading to fallbacks");
                degraded_insights(budgets)
            }
        }
    }
}

/// Deterministic insights derived from the budget thresholds alone.
/// Unlike the alert evaluator, the warning and the overage error are
/// not mutually exclusive here; a far-gone category gets both.
fn fallback_insights(budgets: &BTreeMap<String, CategoryBudget>) -> InsightBundle {
    let mut alerts = Vec::new();
    for (category, budget) in budgets {
        let pct = percent_of_limit(budget.spent, budget.limit);
        if budget.limit > 0.0 && pct > 80.0 {
            alerts.push(Alert::for_category(
                Severity::Warning,
                category,
                format!("You've used {:.0}% of your {} budget.", pct, category),
            ));
        }
        if budget.spent > budget.limit {
            alerts.push(Alert::for_category(
                Severity::Error,
                category,
                format!(
                    "You've exceeded your {} budget by ${:.2}.",
                    category,
                    budget.spent - budget.limit
                ),
            ));
        }
    }

    let insights = vec![
        Insight {
            kind: InsightKind::Pattern,
            message: "Consider setting up automatic savings transfers to reach your financial goals faster.".to_string(),
        },
        Insight {
            kind: InsightKind::Tip,
            message: "Try the 50/30/20 rule: 50% for needs, 30% for wants, and 20% for savings.".to_string(),
        },
        Insight {
            kind: InsightKind::Suggestion,
            message: "Review your subscriptions and recurring charges to identify potential savings.".to_string(),
        },
    ];

    InsightBundle {
        recommendations: Vec::new(),
        alerts,
        insights,
    }
}

/// Fallback bundle with the disclosure alert up front. Used only
/// when an advisory call was attempted and failed.
fn degraded_insights(budgets: &BTreeMap<String, CategoryBudget>) -> InsightBundle {
    let mut bundle = fallback_insights(budgets);
    bundle
        .alerts
        .insert(0, Alert::new(Severity::Error, DEGRADED_MESSAGE));
    bundle
}

/// Builds the advisory prompt: per-category summary, the most recent
/// transactions, and the reply contract.
fn build_prompt(
    transactions: &[Transaction],
    budgets: &BTreeMap<String, CategoryBudget>,
) -> String {
    let summary: Vec<_> = budgets
        .iter()
        .map(|(category, budget)| {
            json!({
                "category": category,
                "spent": format!("{:.1}", budget.spent),
                "limit": format!("{:.1}", budget.limit),
                "percentage": format!("{:.1}", budget.percentage),
            })
        })
        .collect();

    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    let recent: Vec<_> = recent
        .into_iter()
        .take(PROMPT_TRANSACTION_LIMIT)
        .map(|txn| {
            json!({
                "date": txn.date.to_string(),
                "description": txn.description,
                "amount": txn.amount,
                "category": txn.category,
            })
        })
        .collect();

    format!(
        r#"Analyze this spending data and provide budget recommendations:

Category spending summary:
{summary}

Recent transactions:
{recent}

Please provide:
1. Budget recommendations per category that needs attention
2. Alerts for overspending or concerning patterns
3. General insights about spending behavior

Respond with a JSON object in this exact format:
{{
  "recommendations": [
    {{
      "category": "category name",
      "message": "specific recommendation",
      "actionSteps": ["step 1", "step 2"],
      "potentialSavings": 0,
      "reasoning": "why this matters",
      "timeframe": "when to act"
    }}
  ],
  "alerts": [
    {{"type": "warning", "message": "alert text", "category": "category name"}}
  ],
  "insights": [
    {{"type": "pattern", "message": "insight text"}}
  ]
}}

Return only the JSON object, no markdown."#,
        summary = serde_json::to_string_pretty(&summary).unwrap_or_default(),
        recent = serde_json::to_string_pretty(&recent).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockAdvisor;
    use crate::normalize::import_hash;
    use chrono::NaiveDate;

    fn budgets(entries: &[(&str, f64, f64)]) -> BTreeMap<String, CategoryBudget> {
        entries
            .iter()
            .map(|(category, limit, spent)| {
                (
                    category.to_string(),
                    CategoryBudget {
                        limit: *limit,
                        spent: *spent,
                        percentage: percent_of_limit(*spent, *limit),
                    },
                )
            })
            .collect()
    }

    fn txn(day: u32, category: &str, amount: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 2, day).unwrap();
        Transaction {
            date,
            description: format!("{} purchase", category),
            category: category.to_string(),
            amount,
            import_hash: import_hash(date, category, amount),
        }
    }

    #[tokio::test]
    async fn test_no_backend_serves_fallbacks_without_disclosure() {
        let engine = InsightEngine::new(None);
        let bundle = engine
            .generate_insights(&[], &budgets(&[("grocery", 100.0, 50.0)]))
            .await;
        assert_eq!(bundle.insights.len(), 3);
        assert!(bundle.alerts.iter().all(|a| a.message != DEGRADED_MESSAGE));
    }

    #[tokio::test]
    async fn test_backend_reply_parsed() {
        let advisor = AdvisorClient::Mock(MockAdvisor::default());
        let engine = InsightEngine::new(Some(advisor));
        let bundle = engine
            .generate_insights(&[txn(1, "dining", 40.0)], &budgets(&[("dining", 50.0, 40.0)]))
            .await;
        assert_eq!(bundle.recommendations.len(), 1);
        assert_eq!(bundle.recommendations[0].category, "dining");
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_with_disclosure() {
        let advisor = AdvisorClient::Mock(MockAdvisor::failing());
        let engine = InsightEngine::new(Some(advisor));
        let bundle = engine
            .generate_insights(&[], &budgets(&[("grocery", 100.0, 120.0)]))
            .await;
        assert_eq!(bundle.alerts[0].message, DEGRADED_MESSAGE);
        assert_eq!(bundle.alerts[0].severity, Severity::Error);
        // The overage heuristic still fires after the disclosure.
        assert!(bundle.alerts[1..].iter().any(|a| a.severity == Severity::Error));
    }

    #[tokio::test]
    async fn test_garbage_reply_degrades() {
        let advisor = AdvisorClient::Mock(MockAdvisor::with_reply("I'd rather not."));
        let engine = InsightEngine::new(Some(advisor));
        let bundle = engine.generate_insights(&[], &BTreeMap::new()).await;
        assert_eq!(bundle.alerts[0].message, DEGRADED_MESSAGE);
    }

    #[tokio::test]
    async fn test_timeout_degrades() {
        let advisor = AdvisorClient::Mock(
            MockAdvisor::default().with_delay(Duration::from_millis(200)),
        );
        let engine = InsightEngine::new(Some(advisor)).with_timeout(Duration::from_millis(10));
        let bundle = engine.generate_insights(&[], &BTreeMap::new()).await;
        assert_eq!(bundle.alerts[0].message, DEGRADED_MESSAGE);
    }

    #[tokio::test]
    async fn test_fallback_warning_and_overage_both_fire() {
        let engine = InsightEngine::new(None);
        let bundle = engine
            .generate_insights(&[], &budgets(&[("grocery", 100.0, 120.0)]))
            .await;
        let grocery_alerts: Vec<_> = bundle
            .alerts
            .iter()
            .filter(|a| a.category.as_deref() == Some("grocery"))
            .collect();
        assert_eq!(grocery_alerts.len(), 2);
        assert!(grocery_alerts.iter().any(|a| a.severity == Severity::Warning));
        assert!(grocery_alerts.iter().any(|a| a.severity == Severity::Error));
    }

    #[tokio::test]
    async fn test_fallback_zero_limit_overage_only() {
        // Percentage is 0 when the limit is 0, so no warning, but
        // spending past a zero limit still reports an overage.
        let engine = InsightEngine::new(None);
        let bundle = engine
            .generate_insights(&[], &budgets(&[("grocery", 0.0, 30.0)]))
            .await;
        let grocery_alerts: Vec<_> = bundle
            .alerts
            .iter()
            .filter(|a| a.category.as_deref() == Some("grocery"))
            .collect();
        assert_eq!(grocery_alerts.len(), 1);
        assert_eq!(grocery_alerts[0].severity, Severity::Error);
    }

    #[test]
    fn test_prompt_includes_summary_and_caps_transactions() {
        let transactions: Vec<_> = (1..=25).map(|d| txn(d, "grocery", 5.0)).collect();
        let prompt = build_prompt(&transactions, &budgets(&[("grocery", 100.0, 125.0)]));
        assert!(prompt.contains("\"category\": \"grocery\""));
        // Only the 20 most recent dates appear.
        assert!(prompt.contains("2025-02-25"));
        assert!(prompt.contains("2025-02-06"));
        assert!(!prompt.contains("2025-02-05"));
    }
}
