//! Figures held by a single account row
//!
//! Expense rows carry a total and its finalística share; the apoio share and
//! both percentages are always derived. Revenue rows carry a single value.

use core_kernel::{Money, Percentage};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::{Add, AddAssign};

/// Component-wise summable figures
///
/// Aggregation and consolidation are written once against this trait and
/// used for both revenue and expense trees.
pub trait Figures:
    Clone + Default + PartialEq + Debug + Add<Output = Self> + AddAssign + Send + Sync + 'static
{
    /// The figure used for ranking and grand totals
    fn headline(&self) -> Money;

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Expense figures for one account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFigures {
    pub total: Money,
    pub finalistica: Money,
}

impl ExpenseFigures {
    pub fn new(total: Money, finalistica: Money) -> Self {
        Self { total, finalistica }
    }

    /// Support-activity share, `total - finalistica`
    pub fn apoio(&self) -> Money {
        self.total - self.finalistica
    }

    /// `finalistica / total`, zero when total is zero
    pub fn pct_finalistica(&self) -> Percentage {
        Percentage::of(self.finalistica, self.total)
    }

    /// `apoio / total`, zero when total is zero
    pub fn pct_apoio(&self) -> Percentage {
        Percentage::of(self.apoio(), self.total)
    }

    pub fn breakdown(&self) -> ExpenseBreakdown {
        ExpenseBreakdown {
            total: self.total,
            finalistica: self.finalistica,
            apoio: self.apoio(),
            pct_finalistica: self.pct_finalistica(),
            pct_apoio: self.pct_apoio(),
        }
    }
}

impl Add for ExpenseFigures {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            finalistica: self.finalistica + other.finalistica,
        }
    }
}

impl AddAssign for ExpenseFigures {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Figures for ExpenseFigures {
    fn headline(&self) -> Money {
        self.total
    }
}

/// All derived columns of an expense row, as shown in grids and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub total: Money,
    pub finalistica: Money,
    pub apoio: Money,
    pub pct_finalistica: Percentage,
    pub pct_apoio: Percentage,
}

/// Revenue figure for one account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueFigures {
    pub value: Money,
}

impl RevenueFigures {
    pub fn new(value: Money) -> Self {
        Self { value }
    }
}

impl Add for RevenueFigures {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            value: self.value + other.value,
        }
    }
}

impl AddAssign for RevenueFigures {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Figures for RevenueFigures {
    fn headline(&self) -> Money {
        self.value
    }
}
