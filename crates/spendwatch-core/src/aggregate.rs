//! Spending aggregation
//!
//! Pure functions that fold transactions into per-category budget
//! state. Aggregation is idempotent: the same inputs always produce
//! the same output, and re-running it never double-counts.

use std::collections::BTreeMap;

use crate::models::{CategoryBudget, DateRange, Transaction};

/// Aggregates spending per category against the given limits.
///
/// Every category in `limits` appears in the result, even with zero
/// spending. Transactions whose category has no configured limit are
/// skipped; transactions outside `range` contribute nothing.
pub fn aggregate(
    transactions: &[Transaction],
    limits: &BTreeMap<String, f64>,
    range: &DateRange,
) -> BTreeMap<String, CategoryBudget> {
    let mut budgets: BTreeMap<String, CategoryBudget> = limits
        .iter()
        .map(|(category, &limit)| (category.clone(), CategoryBudget::with_limit(limit)))
        .collect();

    for txn in transactions {
        if !range.contains(txn.date) {
            continue;
        }
        if let Some(budget) = budgets.get_mut(&txn.category) {
            budget.spent += txn.amount;
        }
    }

    recompute_percentages(&mut budgets);
    budgets
}

/// Re-derives every percentage from its spent/limit pair.
pub fn recompute_percentages(budgets: &mut BTreeMap<String, CategoryBudget>) {
    for budget in budgets.values_mut() {
        budget.percentage = percent_of_limit(budget.spent, budget.limit);
    }
}

/// spent / limit * 100, defined as 0 when the limit is 0 or negative.
pub fn percent_of_limit(spent: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        0.0
    } else {
        spent / limit * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::import_hash;
    use chrono::NaiveDate;

    fn txn(date: (i32, u32, u32), category: &str, amount: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Transaction {
            date,
            description: format!("{} purchase", category),
            category: category.to_string(),
            amount,
            import_hash: import_hash(date, category, amount),
        }
    }

    fn limits(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_aggregate_basic() {
        let txns = vec![
            txn((2025, 2, 1), "grocery", 60.0),
            txn((2025, 2, 2), "grocery", 60.0),
            txn((2025, 2, 3), "dining", 10.0),
        ];
        let budgets = aggregate(
            &txns,
            &limits(&[("grocery", 100.0), ("dining", 50.0), ("travel", 200.0)]),
            &DateRange::unbounded(),
        );

        let grocery = &budgets["grocery"];
        assert_eq!(grocery.spent, 120.0);
        assert!((grocery.percentage - 120.0).abs() < 1e-9);

        let dining = &budgets["dining"];
        assert_eq!(dining.spent, 10.0);
        assert!((dining.percentage - 20.0).abs() < 1e-9);

        // No transactions, still present.
        let travel = &budgets["travel"];
        assert_eq!(travel.spent, 0.0);
        assert_eq!(travel.percentage, 0.0);
    }

    #[test]
    fn test_aggregate_skips_unknown_categories() {
        let txns = vec![txn((2025, 2, 1), "crypto", 500.0)];
        let budgets = aggregate(&txns, &limits(&[("grocery", 100.0)]), &DateRange::unbounded());
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets["grocery"].spent, 0.0);
    }

    #[test]
    fn test_aggregate_respects_date_range() {
        let txns = vec![
            txn((2025, 1, 15), "grocery", 40.0),
            txn((2025, 2, 15), "grocery", 30.0),
        ];
        let range = DateRange::new(
            Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()),
        )
        .unwrap();
        let budgets = aggregate(&txns, &limits(&[("grocery", 100.0)]), &range);
        assert_eq!(budgets["grocery"].spent, 30.0);
    }

    #[test]
    fn test_aggregate_idempotent() {
        let txns = vec![txn((2025, 2, 1), "grocery", 42.0)];
        let lim = limits(&[("grocery", 100.0)]);
        let first = aggregate(&txns, &lim, &DateRange::unbounded());
        let second = aggregate(&txns, &lim, &DateRange::unbounded());
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_limit_percentage_is_zero() {
        let txns = vec![txn((2025, 2, 1), "grocery", 42.0)];
        let budgets = aggregate(&txns, &limits(&[("grocery", 0.0)]), &DateRange::unbounded());
        assert_eq!(budgets["grocery"].spent, 42.0);
        assert_eq!(budgets["grocery"].percentage, 0.0);
    }

    #[test]
    fn test_negative_amounts_reduce_spent() {
        // Refunds arrive as negative amounts.
        let txns = vec![
            txn((2025, 2, 1), "grocery", 50.0),
            txn((2025, 2, 2), "grocery", -20.0),
        ];
        let budgets = aggregate(&txns, &limits(&[("grocery", 100.0)]), &DateRange::unbounded());
        assert_eq!(budgets["grocery"].spent, 30.0);
    }
}
