//! Per-organization entry maps

use core_kernel::Money;
use domain_accounts::DottedPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::figures::{ExpenseFigures, RevenueFigures};

/// Account id to entered figures, for one organization
pub type EntryMap<F> = BTreeMap<DottedPath, F>;

pub type ExpenseMap = EntryMap<ExpenseFigures>;

pub type RevenueMap = EntryMap<RevenueFigures>;

/// Everything an organization has entered, both charts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entries {
    pub revenues: RevenueMap,
    pub expenses: ExpenseMap,
}

impl Entries {
    pub fn new(revenues: RevenueMap, expenses: ExpenseMap) -> Self {
        Self { revenues, expenses }
    }

    pub fn is_empty(&self) -> bool {
        self.revenues.is_empty() && self.expenses.is_empty()
    }

    /// True if any entered figure is non-zero
    pub fn has_figures(&self) -> bool {
        self.revenues.values().any(|r| !r.value.is_zero())
            || self
                .expenses
                .values()
                .any(|e| !e.total.is_zero() || !e.finalistica.is_zero())
    }
}

/// Editable column of an expense row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseField {
    Total,
    Finalistica,
}

impl ExpenseField {
    pub fn read(&self, figures: &ExpenseFigures) -> Money {
        match self {
            ExpenseField::Total => figures.total,
            ExpenseField::Finalistica => figures.finalistica,
        }
    }

    pub fn write(&self, figures: &mut ExpenseFigures, value: Money) {
        match self {
            ExpenseField::Total => figures.total = value,
            ExpenseField::Finalistica => figures.finalistica = value,
        }
    }
}

impl fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseField::Total => write!(f, "total"),
            ExpenseField::Finalistica => write!(f, "finalistica"),
        }
    }
}
