//! Multi-organization consolidation
//!
//! Consolidation sums per-organization analytical figures account by account.
//! An organization without an entry for some account contributes zero for it;
//! it is never dropped from the set. Feeding the consolidated map to an
//! [`AggregationEngine`] must give the same rows as aggregating each
//! organization separately and adding the results.

use core_kernel::OrganizationId;
use domain_accounts::{AccountTree, DottedPath};
use domain_entries::{EntryMap, Figures};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error};

use crate::aggregation::{AggregationEngine, Scope};
use crate::error::ReportingError;
use crate::sampling::Sampling;

fn distinct(organization_ids: &[OrganizationId]) -> BTreeSet<&OrganizationId> {
    organization_ids.iter().collect()
}

/// One organization's total within a scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationTotal<F> {
    pub organization_id: OrganizationId,
    pub figures: F,
}

/// Consolidates entry maps of many organizations over one tree
#[derive(Debug)]
pub struct ConsolidationEngine<'a, F: Figures> {
    tree: &'a AccountTree,
    per_organization: &'a BTreeMap<OrganizationId, EntryMap<F>>,
}

impl<'a, F: Figures> ConsolidationEngine<'a, F> {
    pub fn new(tree: &'a AccountTree, per_organization: &'a BTreeMap<OrganizationId, EntryMap<F>>) -> Self {
        Self {
            tree,
            per_organization,
        }
    }

    pub fn organizations(&self) -> impl Iterator<Item = &'a OrganizationId> {
        self.per_organization.keys()
    }

    /// Component-wise sum of the given organizations' entries
    ///
    /// Every account present in any selected organization's map appears in
    /// the result. Organizations with no entries at all are accepted and add
    /// nothing. An organization listed twice is counted once.
    pub fn consolidate(&self, organization_ids: &[OrganizationId]) -> EntryMap<F> {
        let mut merged: EntryMap<F> = BTreeMap::new();
        for org in distinct(organization_ids) {
            let Some(entries) = self.per_organization.get(org) else {
                debug!(organization_id = %org, "organization has no entries; contributes zero");
                continue;
            };
            for (account_id, figures) in entries {
                *merged.entry(account_id.clone()).or_default() += figures.clone();
            }
        }
        merged
    }

    /// Consolidation across every organization known to the engine
    pub fn consolidate_all(&self) -> EntryMap<F> {
        let all: Vec<OrganizationId> = self.per_organization.keys().cloned().collect();
        self.consolidate(&all)
    }

    /// One organization's total within `scope`
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::UnknownAccount` if the scope account is not in the tree.
    pub fn per_organization_total(&self, organization_id: &OrganizationId, scope: &Scope) -> Result<F, ReportingError> {
        match self.per_organization.get(organization_id) {
            Some(entries) => AggregationEngine::new(self.tree, entries).scoped_total(scope),
            None => {
                if let Scope::Account(id) = scope {
                    self.tree
                        .require(id)
                        .map_err(|_| ReportingError::UnknownAccount(id.to_string()))?;
                }
                Ok(F::default())
            }
        }
    }

    /// Totals of the given organizations within `scope`, ranked by headline descending
    pub fn per_organization_totals(
        &self,
        organization_ids: &[OrganizationId],
        scope: &Scope,
    ) -> Result<Vec<OrganizationTotal<F>>, ReportingError> {
        let mut totals = organization_ids
            .iter()
            .map(|org| {
                self.per_organization_total(org, scope).map(|figures| OrganizationTotal {
                    organization_id: org.clone(),
                    figures,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        totals.sort_by(|a, b| b.figures.headline().cmp(&a.figures.headline()));
        Ok(totals)
    }

    /// Ranked totals with a top/bottom sampling applied afterwards
    pub fn ranked(
        &self,
        organization_ids: &[OrganizationId],
        scope: &Scope,
        sampling: Sampling,
    ) -> Result<Vec<OrganizationTotal<F>>, ReportingError> {
        Ok(sampling.apply(self.per_organization_totals(organization_ids, scope)?))
    }

    /// Checks that consolidating then aggregating equals aggregating then summing
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::Invariant` on any mismatch.
    pub fn verify_commutes(&self, organization_ids: &[OrganizationId], account_id: &DottedPath) -> Result<F, ReportingError> {
        let merged = self.consolidate(organization_ids);
        let consolidated = AggregationEngine::new(self.tree, &merged).compute_row(account_id)?;

        let mut summed = F::default();
        for org in distinct(organization_ids) {
            summed += self.per_organization_total(org, &Scope::Account(account_id.clone()))?;
        }

        if consolidated != summed {
            error!(account_id = %account_id, ?consolidated, ?summed, "consolidation does not commute with aggregation");
            return Err(ReportingError::Invariant(format!(
                "account {account_id}: consolidated {consolidated:?} != summed {summed:?}"
            )));
        }
        Ok(consolidated)
    }
}
