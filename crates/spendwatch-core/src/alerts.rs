//! Threshold alerts and overall budget status
//!
//! The evaluator emits at most one alert per category: an overage
//! takes precedence over the approaching-limit warning.

use std::collections::BTreeMap;

use crate::models::{Alert, BudgetStatus, CategoryBudget, Severity, StatusLevel};

/// Warning threshold as a percentage of the limit.
pub const WARNING_THRESHOLD: f64 = 80.0;

/// Evaluates per-category alerts. Zero-limit categories never alert
/// here; a limit of 0 means the category is not being tracked.
pub fn evaluate_alerts(budgets: &BTreeMap<String, CategoryBudget>) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for (category, budget) in budgets {
        if budget.limit <= 0.0 {
            continue;
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
        } else if budget.percentage > WARNING_THRESHOLD {
            alerts.push(Alert::for_category(
                Severity::Warning,
                category,
                format!(
                    "You've used {:.0}% of your {} budget.",
                    budget.percentage, category
                ),
            ));
        }
    }
    alerts
}

/// Aggregate position across all categories.
pub fn overall_status(budgets: &BTreeMap<String, CategoryBudget>) -> BudgetStatus {
    let total_spent: f64 = budgets.values().map(|b| b.spent).sum();
    let total_limit: f64 = budgets.values().map(|b| b.limit).sum();
    let percentage = crate::aggregate::percent_of_limit(total_spent, total_limit);

    let level = if percentage > 100.0 {
        StatusLevel::Error
    } else if percentage > WARNING_THRESHOLD {
        StatusLevel::Warning
    } else {
        StatusLevel::Success
    };

    BudgetStatus {
        total_spent,
        total_limit,
        percentage,
        level,
    }
}
