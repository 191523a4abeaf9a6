//! Synthetic account values from analytical entries
//!
//! Synthetic accounts never hold entries of their own. The value of a
//! synthetic row is the component-wise sum of every analytical descendant,
//! not of its direct children, so no intermediate level is counted twice.

use domain_accounts::{AccountKind, AccountTree, DottedPath, RowStyle};
use domain_entries::{EntryMap, Figures};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

use crate::error::ReportingError;

/// Which part of a tree a total covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    All,
    Account(DottedPath),
}

impl Scope {
    pub fn contains(&self, id: &DottedPath) -> bool {
        match self {
            Scope::All => true,
            Scope::Account(scope) => id.is_within(scope),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Account(id) => write!(f, "{id}"),
        }
    }
}

/// A computed grid row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRow<F> {
    pub id: DottedPath,
    pub name: String,
    pub kind: AccountKind,
    pub style: RowStyle,
    pub figures: F,
}

/// Aggregates one entry map over one account tree
///
/// The map may belong to a single organization or be the consolidated map
/// of several; the engine does not care.
#[derive(Debug, Clone, Copy)]
pub struct AggregationEngine<'a, F: Figures> {
    tree: &'a AccountTree,
    entries: &'a EntryMap<F>,
}

impl<'a, F: Figures> AggregationEngine<'a, F> {
    pub fn new(tree: &'a AccountTree, entries: &'a EntryMap<F>) -> Self {
        Self { tree, entries }
    }

    pub fn tree(&self) -> &'a AccountTree {
        self.tree
    }

    /// Value of one account row
    ///
    /// Analytical accounts return their stored figures, zero when absent.
    /// Synthetic accounts return the sum over all analytical descendants.
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::UnknownAccount` if `id` is not in the tree.
    pub fn compute_row(&self, id: &DottedPath) -> Result<F, ReportingError> {
        let account = self
            .tree
            .get(id)
            .ok_or_else(|| ReportingError::UnknownAccount(id.to_string()))?;

        Ok(match account.kind {
            AccountKind::Analytical => self.stored(id),
            AccountKind::Synthetic => self
                .tree
                .analytical_descendants_of(id)
                .into_iter()
                .fold(F::default(), |mut acc, leaf| {
                    acc += self.stored(&leaf.id);
                    acc
                }),
        })
    }

    fn stored(&self, id: &DottedPath) -> F {
        self.entries.get(id).cloned().unwrap_or_default()
    }

    /// Sum over every analytical leaf of the tree
    pub fn grand_total(&self) -> F {
        self.tree
            .analytical_accounts()
            .fold(F::default(), |mut acc, leaf| {
                acc += self.stored(&leaf.id);
                acc
            })
    }

    /// Sum over the root accounts of the tree
    pub fn top_level_total(&self) -> F {
        self.tree
            .top_level()
            .filter_map(|root| self.compute_row(&root.id).ok())
            .fold(F::default(), |mut acc, row| {
                acc += row;
                acc
            })
    }

    /// Grand total, after checking it against the top-level path
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::Invariant` if the two sums differ.
    pub fn verify_grand_total(&self) -> Result<F, ReportingError> {
        let leaves = self.grand_total();
        let roots = self.top_level_total();
        if leaves != roots {
            error!(?leaves, ?roots, "grand total mismatch between leaf and top-level sums");
            return Err(ReportingError::Invariant(format!(
                "leaf sum {leaves:?} differs from top-level sum {roots:?}"
            )));
        }
        Ok(leaves)
    }

    /// Total restricted to a scope
    pub fn scoped_total(&self, scope: &Scope) -> Result<F, ReportingError> {
        match scope {
            Scope::All => Ok(self.grand_total()),
            Scope::Account(id) => self.compute_row(id),
        }
    }

    /// Subtotals of every synthetic account at `depth` (the dashboard breakdown)
    pub fn subtotals_at_depth(&self, depth: usize) -> Vec<AccountRow<F>> {
        self.tree
            .synthetics_at_depth(depth)
            .into_iter()
            .filter_map(|account| self.row_for(&account.id))
            .collect()
    }

    /// Visible grid rows in chart order, collapsed synthetics omitted
    pub fn rows(&self) -> Vec<AccountRow<F>> {
        let view = self.tree.collapse_view();
        view.visible_rows(self.tree.in_chart_order())
            .filter_map(|(account, _)| self.row_for(&account.id))
            .collect()
    }

    /// Visible rows belonging to one chart group (one grid tab)
    pub fn rows_in_group(&self, group: &str) -> Vec<AccountRow<F>> {
        self.rows()
            .into_iter()
            .filter(|row| self.tree.get(&row.id).is_some_and(|a| a.group == group))
            .collect()
    }

    fn row_for(&self, id: &DottedPath) -> Option<AccountRow<F>> {
        let account = self.tree.get(id)?;
        let figures = self.compute_row(id).ok()?;
        Some(AccountRow {
            id: account.id.clone(),
            name: account.name.clone(),
            kind: account.kind,
            style: self.tree.collapse_view().row_style(account),
            figures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Money;
    use domain_accounts::Account;
    use domain_entries::{ExpenseFigures, ExpenseMap};
    use rust_decimal_macros::dec;

    fn p(s: &str) -> DottedPath {
        s.parse().unwrap()
    }

    fn tree() -> AccountTree {
        use AccountKind::*;
        let a = |id: &str, name: &str, kind| Account::new(p(id), name, "Pessoal", "", kind);
        AccountTree::build(vec![
            a("1", "Correntes", Synthetic),
            a("1.1", "Pessoal", Synthetic),
            a("1.1.1", "Remuneração", Synthetic),
            a("1.1.1.1", "Salários", Analytical),
            a("1.1.1.2", "Férias", Analytical),
            a("1.1.2", "Encargos", Synthetic),
            a("1.1.2.1", "Encargos", Analytical),
        ])
        .unwrap()
    }

    fn fig(total: rust_decimal::Decimal, fin: rust_decimal::Decimal) -> ExpenseFigures {
        ExpenseFigures::new(Money::new(total), Money::new(fin))
    }

    #[test]
    fn test_synthetic_row_sums_leaves() {
        let tree = tree();
        let mut entries = ExpenseMap::new();
        entries.insert(p("1.1.1.1"), fig(dec!(100), dec!(60)));
        entries.insert(p("1.1.1.2"), fig(dec!(50), dec!(50)));

        let engine = AggregationEngine::new(&tree, &entries);
        let row = engine.compute_row(&p("1.1.1")).unwrap();

        assert_eq!(row.total, Money::new(dec!(150)));
        assert_eq!(row.finalistica, Money::new(dec!(110)));
        assert_eq!(row.apoio(), Money::new(dec!(40)));
        assert_eq!(row.pct_finalistica().as_percentage().round_dp(1), dec!(73.3));
    }

    #[test]
    fn test_absent_analytical_is_zero() {
        let tree = tree();
        let entries = ExpenseMap::new();
        let engine = AggregationEngine::new(&tree, &entries);
        assert_eq!(engine.compute_row(&p("1.1.2.1")).unwrap(), ExpenseFigures::default());
    }

    #[test]
    fn test_unknown_account_errors() {
        let tree = tree();
        let entries = ExpenseMap::new();
        let engine = AggregationEngine::new(&tree, &entries);
        assert_eq!(
            engine.compute_row(&p("7")),
            Err(ReportingError::UnknownAccount("7".to_string()))
        );
    }

    #[test]
    fn test_entries_on_synthetic_accounts_are_ignored() {
        let tree = tree();
        let mut entries = ExpenseMap::new();
        entries.insert(p("1.1"), fig(dec!(999), dec!(0)));
        entries.insert(p("1.1.1.1"), fig(dec!(10), dec!(0)));
        let engine = AggregationEngine::new(&tree, &entries);

        assert_eq!(engine.compute_row(&p("1")).unwrap().total, Money::new(dec!(10)));
        assert_eq!(engine.verify_grand_total().unwrap().total, Money::new(dec!(10)));
    }

    #[test]
    fn test_rows_hide_collapsed_synthetic() {
        let tree = tree();
        let entries = ExpenseMap::new();
        let engine = AggregationEngine::new(&tree, &entries);
        let rows = engine.rows();

        assert_eq!(rows.len(), 6);
        assert!(!rows.iter().any(|r| r.id == p("1.1.2")));
        let promoted = rows.iter().find(|r| r.id == p("1.1.2.1")).unwrap();
        assert_eq!(promoted.style, RowStyle::PseudoSynthetic);
    }

    #[test]
    fn test_scoped_total() {
        let tree = tree();
        let mut entries = ExpenseMap::new();
        entries.insert(p("1.1.1.1"), fig(dec!(100), dec!(60)));
        entries.insert(p("1.1.2.1"), fig(dec!(30), dec!(0)));
        let engine = AggregationEngine::new(&tree, &entries);

        assert_eq!(engine.scoped_total(&Scope::All).unwrap().total, Money::new(dec!(130)));
        assert_eq!(
            engine.scoped_total(&Scope::Account(p("1.1.2"))).unwrap().total,
            Money::new(dec!(30))
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use core_kernel::Money;
    use domain_accounts::Account;
    use domain_entries::{ExpenseFigures, ExpenseMap};
    use proptest::prelude::*;

    fn tree() -> AccountTree {
        use AccountKind::*;
        let a = |id: &str, kind| Account::new(id.parse().unwrap(), id, "G", "", kind);
        AccountTree::build(vec![
            a("1", Synthetic),
            a("1.1", Synthetic),
            a("1.1.1", Analytical),
            a("1.1.2", Analytical),
            a("1.2", Synthetic),
            a("1.2.1", Synthetic),
            a("1.2.1.1", Analytical),
            a("2", Synthetic),
            a("2.1", Analytical),
        ])
        .unwrap()
    }

    fn leaves() -> Vec<DottedPath> {
        ["1.1.1", "1.1.2", "1.2.1.1", "2.1"].iter().map(|s| s.parse().unwrap()).collect()
    }

    proptest! {
        #[test]
        fn synthetic_equals_sum_of_analytical_descendants(
            values in prop::collection::vec((0i64..10_000_000, 0i64..10_000_000), 4)
        ) {
            let tree = tree();
            let entries: ExpenseMap = leaves()
                .into_iter()
                .zip(values)
                .map(|(id, (t, f))| (id, ExpenseFigures::new(Money::from_cents(t), Money::from_cents(f))))
                .collect();
            let engine = AggregationEngine::new(&tree, &entries);

            for synthetic in tree.iter().filter(|a| a.is_synthetic()) {
                let expected = tree
                    .analytical_descendants_of(&synthetic.id)
                    .iter()
                    .map(|leaf| engine.compute_row(&leaf.id).unwrap())
                    .fold(ExpenseFigures::default(), |acc, f| acc + f);
                let row = engine.compute_row(&synthetic.id).unwrap();
                prop_assert_eq!(row, expected);
                prop_assert_eq!(row.apoio(), expected.total - expected.finalistica);
            }

            prop_assert!(engine.verify_grand_total().is_ok());
        }

        #[test]
        fn zero_total_rows_have_zero_percentages(fin in -1_000_000i64..1_000_000) {
            let tree = tree();
            let mut entries = ExpenseMap::new();
            entries.insert("2.1".parse().unwrap(), ExpenseFigures::new(Money::zero(), Money::from_cents(fin)));
            let engine = AggregationEngine::new(&tree, &entries);

            let row = engine.compute_row(&"2".parse().unwrap()).unwrap();
            prop_assert!(row.pct_finalistica().is_zero());
            prop_assert!(row.pct_apoio().is_zero());
        }
    }
}
