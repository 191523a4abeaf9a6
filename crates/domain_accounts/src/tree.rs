//! The chart of accounts as a queryable tree

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use tracing::debug;

use crate::account::{Account, AccountKind};
use crate::collapse::CollapseView;
use crate::error::AccountError;
use crate::path::DottedPath;

/// Read-only account tree, built once from a chart definition
///
/// Accounts are kept in a `BTreeMap` keyed by path; because a path sorts
/// immediately before all of its descendants, every subtree is a contiguous
/// range of the map.
#[derive(Debug, Clone)]
pub struct AccountTree {
    accounts: BTreeMap<DottedPath, Account>,
    chart_order: Vec<DottedPath>,
    collapse: OnceCell<CollapseView>,
}

impl AccountTree {
    /// Builds and validates a tree
    ///
    /// # Arguments
    ///
    /// * `accounts` - The chart entries in published order
    ///
    /// # Errors
    ///
    /// * `AccountError::DuplicateAccount` - two entries share an id
    /// * `AccountError::MissingParent` - a non-root entry has no parent entry
    /// * `AccountError::KindMismatch` - a leaf is not analytical, or an inner node is not synthetic
    pub fn build(accounts: Vec<Account>) -> Result<Self, AccountError> {
        let mut map = BTreeMap::new();
        let mut chart_order = Vec::with_capacity(accounts.len());

        for account in accounts {
            let id = account.id.clone();
            if map.insert(id.clone(), account).is_some() {
                return Err(AccountError::DuplicateAccount(id.to_string()));
            }
            chart_order.push(id);
        }

        for id in map.keys() {
            if let Some(parent) = id.parent() {
                if !map.contains_key(&parent) {
                    return Err(AccountError::MissingParent {
                        child: id.to_string(),
                        parent: parent.to_string(),
                    });
                }
            }
        }

        let tree = Self {
            accounts: map,
            chart_order,
            collapse: OnceCell::new(),
        };

        for account in tree.accounts.values() {
            let actual = if tree.has_children(&account.id) {
                AccountKind::Synthetic
            } else {
                AccountKind::Analytical
            };
            if account.kind != actual {
                return Err(AccountError::KindMismatch {
                    id: account.id.to_string(),
                    declared: account.kind.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        debug!(accounts = tree.accounts.len(), "account tree built");
        Ok(tree)
    }

    /// Parses the static list format `[{id, name, type, group, subgroup}, ...]`
    pub fn from_json(json: &str) -> Result<Self, AccountError> {
        let accounts: Vec<Account> =
            serde_json::from_str(json).map_err(|e| AccountError::InvalidChart(e.to_string()))?;
        Self::build(accounts)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, id: &DottedPath) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Like [`get`](Self::get) but reports unknown ids as an error
    pub fn require(&self, id: &DottedPath) -> Result<&Account, AccountError> {
        self.get(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &DottedPath) -> bool {
        self.accounts.contains_key(id)
    }

    /// All accounts in natural path order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// All accounts in the order the chart published them
    pub fn in_chart_order(&self) -> impl Iterator<Item = &Account> {
        self.chart_order.iter().filter_map(|id| self.accounts.get(id))
    }

    /// Every account whose path strictly extends `id`, optionally filtered by kind
    pub fn descendants_of(&self, id: &DottedPath, kind: Option<AccountKind>) -> Vec<&Account> {
        self.accounts
            .range((Bound::Excluded(id), Bound::Unbounded))
            .take_while(|(path, _)| id.is_ancestor_of(path))
            .map(|(_, account)| account)
            .filter(|account| kind.map_or(true, |k| account.kind == k))
            .collect()
    }

    pub fn analytical_descendants_of(&self, id: &DottedPath) -> Vec<&Account> {
        self.descendants_of(id, Some(AccountKind::Analytical))
    }

    /// Direct children only
    pub fn children_of(&self, id: &DottedPath) -> Vec<&Account> {
        let depth = id.depth() + 1;
        self.accounts
            .range((Bound::Excluded(id), Bound::Unbounded))
            .take_while(|(path, _)| id.is_ancestor_of(path))
            .filter(|(path, _)| path.depth() == depth)
            .map(|(_, account)| account)
            .collect()
    }

    pub fn has_children(&self, id: &DottedPath) -> bool {
        self.accounts
            .range((Bound::Excluded(id), Bound::Unbounded))
            .next()
            .is_some_and(|(path, _)| id.is_ancestor_of(path))
    }

    pub fn analytical_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values().filter(|a| a.is_analytical())
    }

    /// Root accounts (single-segment paths)
    pub fn top_level(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values().filter(|a| a.id.is_root())
    }

    pub fn top_level_synthetics(&self) -> impl Iterator<Item = &Account> {
        self.top_level().filter(|a| a.is_synthetic())
    }

    /// Synthetic accounts with exactly `depth` segments, in natural order
    pub fn synthetics_at_depth(&self, depth: usize) -> Vec<&Account> {
        self.accounts
            .values()
            .filter(|a| a.is_synthetic() && a.id.depth() == depth)
            .collect()
    }

    /// Distinct `group` labels in chart order
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for account in self.in_chart_order() {
            if !groups.contains(&account.group.as_str()) {
                groups.push(account.group.as_str());
            }
        }
        groups
    }

    pub fn accounts_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Account> + 'a {
        self.in_chart_order().filter(move |a| a.group == group)
    }

    /// Memoized collapse view for this tree
    pub fn collapse_view(&self) -> &CollapseView {
        self.collapse.get_or_init(|| CollapseView::compute(self))
    }

    pub fn is_collapsed_synthetic(&self, id: &DottedPath) -> bool {
        self.collapse_view().is_hidden(id)
    }
}

/// Which of the two charts an account id belongs to
///
/// Both charts number their accounts from `1`, so a dotted path alone does
/// not identify an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chart {
    Revenue,
    Expense,
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chart::Revenue => write!(f, "Receita"),
            Chart::Expense => write!(f, "Despesa"),
        }
    }
}

/// The two charts published by the federal council
#[derive(Debug, Clone)]
pub struct ChartOfAccounts {
    pub revenue: AccountTree,
    pub expense: AccountTree,
}

impl ChartOfAccounts {
    pub fn from_json(revenue_json: &str, expense_json: &str) -> Result<Self, AccountError> {
        Ok(Self {
            revenue: AccountTree::from_json(revenue_json)?,
            expense: AccountTree::from_json(expense_json)?,
        })
    }

    pub fn tree(&self, chart: Chart) -> &AccountTree {
        match chart {
            Chart::Revenue => &self.revenue,
            Chart::Expense => &self.expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, name: &str, kind: AccountKind) -> Account {
        Account::new(id.parse().unwrap(), name, "Pessoal", "", kind)
    }

    fn p(s: &str) -> DottedPath {
        s.parse().unwrap()
    }

    fn sample() -> AccountTree {
        use AccountKind::*;
        AccountTree::build(vec![
            account("1", "Despesas Correntes", Synthetic),
            account("1.1", "Pessoal", Synthetic),
            account("1.1.1", "Remuneração", Synthetic),
            account("1.1.1.1", "Salários", Analytical),
            account("1.1.1.2", "Férias", Analytical),
            account("1.1.2", "Encargos", Synthetic),
            account("1.1.2.1", " encargos ", Analytical),
            account("1.10", "Diversos", Analytical),
            account("1.2", "Material", Analytical),
        ])
        .unwrap()
    }

    #[test]
    fn test_descendants_are_strict_extensions() {
        let tree = sample();
        let ids: Vec<String> = tree
            .descendants_of(&p("1.1"), None)
            .iter()
            .map(|a| a.id.to_string())
            .collect();
        assert_eq!(ids, vec!["1.1.1", "1.1.1.1", "1.1.1.2", "1.1.2", "1.1.2.1"]);
    }

    #[test]
    fn test_descendants_filtered_by_kind() {
        let tree = sample();
        assert_eq!(tree.analytical_descendants_of(&p("1")).len(), 5);
        assert_eq!(tree.descendants_of(&p("1"), Some(AccountKind::Synthetic)).len(), 3);
        assert!(tree.analytical_descendants_of(&p("1.2")).is_empty());
    }

    #[test]
    fn test_children_of() {
        let tree = sample();
        let ids: Vec<String> = tree.children_of(&p("1")).iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec!["1.1", "1.2", "1.10"]);
    }

    #[test]
    fn test_collapsed_synthetic() {
        let tree = sample();
        assert!(tree.is_collapsed_synthetic(&p("1.1.2")));
        assert!(!tree.is_collapsed_synthetic(&p("1.1.1")));
        assert!(tree.collapse_view().is_pseudo_synthetic(&p("1.1.2.1")));
    }

    #[test]
    fn test_build_rejects_missing_parent() {
        let err = AccountTree::build(vec![account("1.1", "Orphan", AccountKind::Analytical)]).unwrap_err();
        assert!(matches!(err, AccountError::MissingParent { .. }));
    }

    #[test]
    fn test_build_rejects_synthetic_leaf() {
        let err = AccountTree::build(vec![account("1", "Empty", AccountKind::Synthetic)]).unwrap_err();
        assert!(matches!(err, AccountError::KindMismatch { .. }));
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let err = AccountTree::build(vec![
            account("1", "A", AccountKind::Analytical),
            account("1", "B", AccountKind::Analytical),
        ])
        .unwrap_err();
        assert_eq!(err, AccountError::DuplicateAccount("1".to_string()));
    }

    #[test]
    fn test_same_path_in_both_charts() {
        let chart = ChartOfAccounts {
            revenue: AccountTree::build(vec![account("1", "Receitas", AccountKind::Synthetic), account("1.2", "Taxas", AccountKind::Analytical)]).unwrap(),
            expense: sample(),
        };
        assert_eq!(chart.tree(Chart::Revenue).require(&p("1.2")).unwrap().name, "Taxas");
        assert_eq!(chart.tree(Chart::Expense).require(&p("1.2")).unwrap().name, "Material");
        assert_eq!(serde_json::to_string(&Chart::Revenue).unwrap(), "\"revenue\"");
    }
}
