//! Display-time collapsing of duplicate-name synthetic accounts
//!
//! Some charts repeat a heading as its own single leaf (`1.1.2 Encargos` with
//! the sole child `1.1.2.1 Encargos`). Grids show one row for the pair: the
//! synthetic row is hidden and the analytical row is styled as a heading.
//! This never affects aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::account::Account;
use crate::path::DottedPath;
use crate::tree::AccountTree;

/// How a visible account row is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStyle {
    Synthetic,
    /// An analytical row standing in for its hidden synthetic parent
    PseudoSynthetic,
    Analytical,
}

/// Which rows to hide and which to promote, computed once per tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseView {
    hidden: BTreeSet<DottedPath>,
    promoted: BTreeSet<DottedPath>,
}

impl CollapseView {
    /// A synthetic account is collapsed when its only direct child is an
    /// analytical account with the same trimmed, case-insensitive name.
    pub fn compute(tree: &AccountTree) -> Self {
        let mut view = CollapseView::default();
        for account in tree.iter().filter(|a| a.is_synthetic()) {
            let children = tree.children_of(&account.id);
            if let [only] = children.as_slice() {
                if only.is_analytical() && only.normalized_name() == account.normalized_name() {
                    view.hidden.insert(account.id.clone());
                    view.promoted.insert(only.id.clone());
                }
            }
        }
        view
    }

    pub fn is_hidden(&self, id: &DottedPath) -> bool {
        self.hidden.contains(id)
    }

    pub fn is_pseudo_synthetic(&self, id: &DottedPath) -> bool {
        self.promoted.contains(id)
    }

    pub fn hidden(&self) -> impl Iterator<Item = &DottedPath> {
        self.hidden.iter()
    }

    pub fn row_style(&self, account: &Account) -> RowStyle {
        if account.is_synthetic() {
            RowStyle::Synthetic
        } else if self.is_pseudo_synthetic(&account.id) {
            RowStyle::PseudoSynthetic
        } else {
            RowStyle::Analytical
        }
    }

    /// Accounts that should be rendered, in chart order, with their style
    pub fn visible_rows<'t>(
        &'t self,
        accounts: impl IntoIterator<Item = &'t Account> + 't,
    ) -> impl Iterator<Item = (&'t Account, RowStyle)> + 't {
        accounts
            .into_iter()
            .filter(move |a| !self.is_hidden(&a.id))
            .map(move |a| (a, self.row_style(a)))
    }
}
