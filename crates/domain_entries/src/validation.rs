//! Non-blocking checks on entered figures
//!
//! `finalistica <= total` is expected but never enforced at write time. A
//! violation surfaces as a warning next to the row, and the entry is saved.

use core_kernel::Money;
use domain_accounts::{AccountTree, DottedPath};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::entry::ExpenseMap;
use crate::figures::ExpenseFigures;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryWarning {
    /// Apoio would be negative
    FinalisticaExceedsTotal {
        account_id: DottedPath,
        account_name: String,
        total: Money,
        finalistica: Money,
    },
}

impl EntryWarning {
    pub fn account_id(&self) -> &DottedPath {
        match self {
            EntryWarning::FinalisticaExceedsTotal { account_id, .. } => account_id,
        }
    }
}

impl fmt::Display for EntryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryWarning::FinalisticaExceedsTotal { account_name, .. } => write!(
                f,
                "{account_name}: Despesa Finalística maior que o Total (Apoio negativo)"
            ),
        }
    }
}

/// Checks one row
pub fn check_expense(account_id: &DottedPath, account_name: &str, figures: &ExpenseFigures) -> Option<EntryWarning> {
    if figures.finalistica <= figures.total {
        return None;
    }
    debug!(%account_id, total = %figures.total, finalistica = %figures.finalistica, "negative apoio");
    Some(EntryWarning::FinalisticaExceedsTotal {
        account_id: account_id.clone(),
        account_name: account_name.to_string(),
        total: figures.total,
        finalistica: figures.finalistica,
    })
}

/// Checks every analytical row of an organization's expense map, in path order
pub fn validate_expenses(tree: &AccountTree, expenses: &ExpenseMap) -> Vec<EntryWarning> {
    expenses
        .iter()
        .filter_map(|(id, figures)| {
            let account = tree.get(id).filter(|a| a.is_analytical())?;
            check_expense(id, &account.name, figures)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_accounts::{Account, AccountKind};

    fn tree() -> AccountTree {
        AccountTree::build(vec![
            Account::new("1".parse().unwrap(), "Correntes", "G", "", AccountKind::Synthetic),
            Account::new("1.1".parse().unwrap(), "Salários", "G", "", AccountKind::Analytical),
            Account::new("1.2".parse().unwrap(), "Férias", "G", "", AccountKind::Analytical),
        ])
        .unwrap()
    }

    #[test]
    fn test_finalistica_above_total_warns() {
        let mut expenses = ExpenseMap::new();
        expenses.insert(
            "1.1".parse().unwrap(),
            ExpenseFigures::new(Money::from_cents(5000), Money::from_cents(8000)),
        );
        expenses.insert(
            "1.2".parse().unwrap(),
            ExpenseFigures::new(Money::from_cents(5000), Money::from_cents(5000)),
        );

        let warnings = validate_expenses(&tree(), &expenses);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].account_id().to_string(), "1.1");
        assert!(warnings[0].to_string().contains("Apoio negativo"));
    }

    #[test]
    fn test_unknown_accounts_are_ignored() {
        let mut expenses = ExpenseMap::new();
        expenses.insert(
            "9.9".parse().unwrap(),
            ExpenseFigures::new(Money::zero(), Money::from_cents(1)),
        );
        assert!(validate_expenses(&tree(), &expenses).is_empty());
    }
}
