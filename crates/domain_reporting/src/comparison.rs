//! Revenue against expense, overall and per economic category

use core_kernel::{Money, Percentage};
use domain_accounts::{AccountTree, DottedPath};
use domain_entries::{EntryMap, ExpenseMap, Figures, RevenueMap};
use serde::{Deserialize, Serialize};

/// Economic category of an account, from the first path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Segment `1` (correntes)
    Current,
    /// Segment `2` (capital)
    Capital,
}

impl Category {
    pub fn of(id: &DottedPath) -> Option<Category> {
        match id.first_segment() {
            1 => Some(Category::Current),
            2 => Some(Category::Capital),
            _ => None,
        }
    }
}

/// Headline totals of a tree split by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub total: Money,
    pub current: Money,
    pub capital: Money,
}

impl CategoryTotals {
    /// Sums the headline of every analytical account of `tree`
    pub fn compute<F: Figures>(tree: &AccountTree, entries: &EntryMap<F>) -> Self {
        let mut totals = CategoryTotals::default();
        for leaf in tree.analytical_accounts() {
            let value = entries.get(&leaf.id).map(Figures::headline).unwrap_or_default();
            totals.total += value;
            match Category::of(&leaf.id) {
                Some(Category::Current) => totals.current += value,
                Some(Category::Capital) => totals.capital += value,
                None => {}
            }
        }
        totals
    }

    pub fn get(&self, category: Category) -> Money {
        match category {
            Category::Current => self.current,
            Category::Capital => self.capital,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Surplus,
    Deficit,
}

/// One revenue/expense comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub revenue: Money,
    pub expense: Money,
    /// `revenue - expense`
    pub balance: Money,
    /// Surplus when the balance is zero or positive
    pub outcome: Outcome,
    /// `|balance| / revenue`, zero without revenue
    pub balance_pct_of_revenue: Percentage,
    /// `expense / revenue`, zero without revenue
    pub execution_rate: Percentage,
}

impl Comparison {
    pub fn new(revenue: Money, expense: Money) -> Self {
        let balance = revenue - expense;
        let outcome = if balance.is_negative() {
            Outcome::Deficit
        } else {
            Outcome::Surplus
        };
        Self {
            revenue,
            expense,
            balance,
            outcome,
            balance_pct_of_revenue: balance_share(balance, revenue),
            execution_rate: balance_share(expense, revenue),
        }
    }
}

fn balance_share(amount: Money, revenue: Money) -> Percentage {
    if revenue.is_positive() {
        Percentage::of(amount.abs(), revenue)
    } else {
        Percentage::ZERO
    }
}

/// Overall and per-category comparison for one organization or a consolidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub overall: Comparison,
    pub current: Comparison,
    pub capital: Comparison,
}

impl ComparisonReport {
    pub fn compute(
        revenue_tree: &AccountTree,
        revenues: &RevenueMap,
        expense_tree: &AccountTree,
        expenses: &ExpenseMap,
    ) -> Self {
        let revenue = CategoryTotals::compute(revenue_tree, revenues);
        let expense = CategoryTotals::compute(expense_tree, expenses);
        Self {
            overall: Comparison::new(revenue.total, expense.total),
            current: Comparison::new(revenue.current, expense.current),
            capital: Comparison::new(revenue.capital, expense.capital),
        }
    }
}
