//! Budget session orchestration
//!
//! `BudgetSession` ties the pipeline together: it owns the limit
//! manager and the transaction store, dedups incoming transactions
//! on their import hash, and re-runs the pure aggregation after
//! every mutation so the budget state never drifts from the data.

use std::collections::HashSet;
use std::collections::BTreeMap;

use crate::aggregate::aggregate;
use crate::budget::BudgetManager;
use crate::error::Result;
use crate::models::{Alert, BudgetStatus, CategoryBudget, DateRange, Transaction};

#[derive(Debug, Clone, Default)]
pub struct BudgetSession {
    budgets: BudgetManager,
    transactions: Vec<Transaction>,
    seen: HashSet<String>,
}

impl BudgetSession {
    pub fn new(budgets: BudgetManager) -> Self {
        Self {
            budgets,
            transactions: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Adds transactions, skipping any whose import hash has been
    /// seen before. Returns how many were actually added.
    pub fn add_transactions(&mut self, incoming: Vec<Transaction>) -> usize {
        let mut added = 0;
        for txn in incoming {
            if self.seen.insert(txn.import_hash.clone()) {
                self.transactions.push(txn);
                added += 1;
            }
        }
        if added > 0 {
            self.refresh();
        }
        added
    }

    /// Updates limits and the active range, then re-aggregates.
    /// A range change can move transactions in or out of scope, so
    /// the manager's cheap percentage path is not enough here.
    pub fn set_limits(&mut self, limits: &BTreeMap<String, f64>, range: DateRange) -> Result<()> {
        self.budgets.set_limits(limits, range)?;
        self.refresh();
        Ok(())
    }

    /// Distributes a total budget across categories by percentage.
    pub fn reallocate(
        &mut self,
        total_budget: f64,
        percentages: &BTreeMap<String, f64>,
    ) -> Result<()> {
        self.budgets.reallocate(total_budget, percentages)?;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        let spending = aggregate(
            &self.transactions,
            &self.budgets.limits(),
            self.budgets.range(),
        );
        self.budgets.apply_spending(spending);
    }

    pub fn categories(&self) -> &BTreeMap<String, CategoryBudget> {
        self.budgets.categories()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// In-range transactions for one category, most useful for
    /// category drill-down views.
    pub fn transactions_in_category(&self, category: &str) -> Vec<&Transaction> {
        let range = self.budgets.range();
        self.transactions
            .iter()
            .filter(|t| t.category == category && range.contains(t.date))
            .collect()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        crate::alerts::evaluate_alerts(self.budgets.categories())
    }

    pub fn status(&self) -> BudgetStatus {
        crate::alerts::overall_status(self.budgets.categories())
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
            import_hash: import_hash(date, &format!("{} purchase", category), amount),
        }
    }

    fn limits(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_add_transactions_aggregates() {
        let mut session =
            BudgetSession::new(BudgetManager::with_limits(limits(&[("grocery", 100.0)])));
        let added = session.add_transactions(vec![
            txn((2025, 2, 1), "grocery", 30.0),
            txn((2025, 2, 2), "grocery", 20.0),
        ]);
        assert_eq!(added, 2);
        assert_eq!(session.categories()["grocery"].spent, 50.0);
    }

    #[test]
    fn test_duplicate_transactions_skipped() {
        let mut session =
            BudgetSession::new(BudgetManager::with_limits(limits(&[("grocery", 100.0)])));
        let t = txn((2025, 2, 1), "grocery", 30.0);
        assert_eq!(session.add_transactions(vec![t.clone()]), 1);
        assert_eq!(session.add_transactions(vec![t]), 0);
        assert_eq!(session.categories()["grocery"].spent, 30.0);
    }

    #[test]
    fn test_range_change_reaggregates() {
        let mut session =
            BudgetSession::new(BudgetManager::with_limits(limits(&[("grocery", 100.0)])));
        session.add_transactions(vec![
            txn((2025, 1, 15), "grocery", 40.0),
            txn((2025, 2, 15), "grocery", 25.0),
        ]);
        assert_eq!(session.categories()["grocery"].spent, 65.0);

        let feb = DateRange::new(
            Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()),
        )
        .unwrap();
        session.set_limits(&limits(&[("grocery", 100.0)]), feb).unwrap();
        assert_eq!(session.categories()["grocery"].spent, 25.0);
    }

    #[test]
    fn test_failed_mutation_leaves_state_intact() {
        let mut session =
            BudgetSession::new(BudgetManager::with_limits(limits(&[("grocery", 100.0)])));
        session.add_transactions(vec![txn((2025, 2, 1), "grocery", 30.0)]);

        let result = session.reallocate(1000.0, &limits(&[("grocery", 70.0), ("dining", 40.0)]));
        assert!(result.is_err());
        assert_eq!(session.categories()["grocery"].limit, 100.0);
        assert_eq!(session.categories()["grocery"].spent, 30.0);
    }

    #[test]
    fn test_category_drilldown_respects_range() {
        let mut session =
            BudgetSession::new(BudgetManager::with_limits(limits(&[("grocery", 100.0)])));
        session.add_transactions(vec![
            txn((2025, 1, 15), "grocery", 40.0),
            txn((2025, 2, 15), "grocery", 25.0),
            txn((2025, 2, 16), "dining", 10.0),
        ]);
        let feb = DateRange::new(
            Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()),
        )
        .unwrap();
        session.set_limits(&limits(&[("grocery", 100.0)]), feb).unwrap();

        let grocery = session.transactions_in_category("grocery");
        assert_eq!(grocery.len(), 1);
        assert_eq!(grocery[0].amount, 25.0);
    }
}
