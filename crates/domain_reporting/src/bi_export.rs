//! Flat per-organization rows for BI tools
//!
//! One row per organization; one `(total, finalistica, apoio)` triple per
//! analytical account, in chart order. Rendering to a spreadsheet is left to
//! the caller.

use core_kernel::{Money, OrganizationId};
use domain_accounts::{AccountTree, DottedPath};
use domain_entries::{ExpenseMap, Organization};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiCell {
    pub account_id: DottedPath,
    pub total: Money,
    pub finalistica: Money,
    pub apoio: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiRow {
    pub organization_id: OrganizationId,
    pub organization_name: String,
    pub cells: Vec<BiCell>,
}

/// Column headers matching the cells of every [`BiRow`]
pub fn bi_headers(tree: &AccountTree) -> Vec<String> {
    let mut headers = vec!["Organização".to_string()];
    for account in tree.in_chart_order().filter(|a| a.is_analytical()) {
        headers.push(format!("{} - Total", account.name));
        headers.push(format!("{} - Finalística", account.name));
        headers.push(format!("{} - Apoio", account.name));
    }
    headers
}

/// Rows in the order of `organizations`; organizations without entries get zeros
pub fn bi_rows(
    tree: &AccountTree,
    organizations: &[Organization],
    expenses: &BTreeMap<OrganizationId, ExpenseMap>,
) -> Vec<BiRow> {
    let empty = ExpenseMap::new();
    organizations
        .iter()
        .map(|org| {
            let entries = expenses.get(&org.id).unwrap_or(&empty);
            let cells = tree
                .in_chart_order()
                .filter(|a| a.is_analytical())
                .map(|account| {
                    let figures = entries.get(&account.id).copied().unwrap_or_default();
                    BiCell {
                        account_id: account.id.clone(),
                        total: figures.total,
                        finalistica: figures.finalistica,
                        apoio: figures.apoio(),
                    }
                })
                .collect();
            BiRow {
                organization_id: org.id.clone(),
                organization_name: org.name.clone(),
                cells,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::OrganizationType;
    use domain_accounts::{Account, AccountKind};
    use domain_entries::ExpenseFigures;

    fn tree() -> AccountTree {
        AccountTree::build(vec![
            Account::new("1".parse().unwrap(), "Correntes", "G", "", AccountKind::Synthetic),
            Account::new("1.1".parse().unwrap(), "Salários", "G", "", AccountKind::Analytical),
            Account::new("1.2".parse().unwrap(), "Férias", "G", "", AccountKind::Analytical),
        ])
        .unwrap()
    }

    #[test]
    fn test_headers_cover_analytical_accounts() {
        let headers = bi_headers(&tree());
        assert_eq!(headers.len(), 1 + 2 * 3);
        assert_eq!(headers[1], "Salários - Total");
        assert_eq!(headers[6], "Férias - Apoio");
    }

    #[test]
    fn test_rows_fill_missing_with_zero() {
        let tree = tree();
        let orgs = vec![
            Organization::new("cra-sp", "CRA-SP", OrganizationType::Cra),
            Organization::new("cra-rj", "CRA-RJ", OrganizationType::Cra),
        ];
        let mut expenses = BTreeMap::new();
        expenses.insert(
            OrganizationId::from("cra-sp"),
            ExpenseMap::from([(
                "1.1".parse().unwrap(),
                ExpenseFigures::new(Money::from_cents(10000), Money::from_cents(2500)),
            )]),
        );

        let rows = bi_rows(&tree, &orgs, &expenses);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[0].apoio, Money::from_cents(7500));
        assert!(rows[1].cells.iter().all(|c| c.total.is_zero()));
        assert_eq!(rows[1].cells.len(), 2);
    }
}
