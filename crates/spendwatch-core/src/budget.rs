//! Budget limit management
//!
//! `BudgetManager` owns the per-category limits and the active date
//! range. Mutations are all-or-nothing: invalid input leaves the
//! manager untouched.

use std::collections::BTreeMap;

use tracing::debug;

use crate::aggregate::percent_of_limit;
use crate::error::{Error, Result};
use crate::models::{CategoryBudget, DateRange};

/// Categories seeded by `Default`, all at limit 0.
pub const DEFAULT_CATEGORIES: &[&str] =
    &["grocery", "merchandise", "dining", "entertainment", "travel"];

#[derive(Debug, Clone)]
pub struct BudgetManager {
    categories: BTreeMap<String, CategoryBudget>,
    range: DateRange,
}

impl Default for BudgetManager {
    fn default() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|c| (c.to_string(), CategoryBudget::with_limit(0.0)))
            .collect();
        Self {
            categories,
            range: DateRange::unbounded(),
        }
    }
}

impl BudgetManager {
    /// Manager seeded from a limit map, spending all zero.
    pub fn with_limits(limits: BTreeMap<String, f64>) -> Self {
        let categories = limits
            .into_iter()
            .map(|(category, limit)| (category, CategoryBudget::with_limit(limit)))
            .collect();
        Self {
            categories,
            range: DateRange::unbounded(),
        }
    }

    pub fn categories(&self) -> &BTreeMap<String, CategoryBudget> {
        &self.categories
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Current limit map, for re-aggregation.
    pub fn limits(&self) -> BTreeMap<String, f64> {
        self.categories
            .iter()
            .map(|(category, budget)| (category.clone(), budget.limit))
            .collect()
    }

    /// Updates limits for the given categories and sets the active
    /// range. Categories absent from `limits` keep their current
    /// limit; new categories are inserted with zero spending.
    ///
    /// Percentages are re-derived from existing spent figures. This
    /// is the cheap path; callers that own the transactions should
    /// re-aggregate after a range change.
    pub fn set_limits(&mut self, limits: &BTreeMap<String, f64>, range: DateRange) -> Result<()> {
        for (category, &limit) in limits {
            if !limit.is_finite() || limit < 0.0 {
                return Err(Error::Validation(format!(
                    "invalid limit {} for category {}",
                    limit, category
                )));
            }
        }

        for (category, &limit) in limits {
            match self.categories.get_mut(category) {
                Some(budget) => {
                    budget.limit = limit;
                    budget.percentage = percent_of_limit(budget.spent, limit);
                }
                None => {
                    self.categories
                        .insert(category.clone(), CategoryBudget::with_limit(limit));
                }
            }
        }
        self.range = range;
        debug!(categories = limits.len(), "updated budget limits");
        Ok(())
    }

    /// Distributes `total_budget` across categories by percentage.
    /// Each category's new limit is `total_budget * pct / 100`.
    ///
    /// Rejected without any change when a percentage is negative or
    /// non-finite, the percentages sum past 100, or the derived
    /// amounts sum past the total.
    pub fn reallocate(
        &mut self,
        total_budget: f64,
        percentages: &BTreeMap<String, f64>,
    ) -> Result<()> {
        if !total_budget.is_finite() || total_budget < 0.0 {
            return Err(Error::Validation(format!(
                "invalid total budget: {}",
                total_budget
            )));
        }

        let mut pct_sum = 0.0;
        for (category, &pct) in percentages {
            if !pct.is_finite() || pct < 0.0 {
                return Err(Error::Validation(format!(
                    "invalid percentage {} for category {}",
                    pct, category
                )));
            }
            pct_sum += pct;
        }
        if pct_sum > 100.0 {
            return Err(Error::Validation(format!(
                "allocation percentages sum to {:.1}%, over 100%",
                pct_sum
            )));
        }

        let amounts: BTreeMap<String, f64> = percentages
            .iter()
            .map(|(category, &pct)| (category.clone(), total_budget * pct / 100.0))
            .collect();
        let amount_sum: f64 = amounts.values().sum();
        if amount_sum > total_budget {
            return Err(Error::Validation(format!(
                "allocated ${:.2} exceeds total budget ${:.2}",
                amount_sum, total_budget
            )));
        }

        for (category, limit) in amounts {
            match self.categories.get_mut(&category) {
                Some(budget) => {
                    budget.limit = limit;
                    budget.percentage = percent_of_limit(budget.spent, limit);
                }
                None => {
                    self.categories
                        .insert(category, CategoryBudget::with_limit(limit));
                }
            }
        }
        debug!(total = total_budget, "reallocated budget");
        Ok(())
    }

    /// Copies aggregated spending into matching categories. Keys in
    /// `spending` without a configured category are ignored.
    pub fn apply_spending(&mut self, spending: BTreeMap<String, CategoryBudget>) {
        for (category, incoming) in spending {
            if let Some(budget) = self.categories.get_mut(&category) {
                budget.spent = incoming.spent;
                budget.percentage = incoming.percentage;
            }
        }
    }
}
