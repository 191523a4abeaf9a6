//! Entry storage

use core_kernel::{DomainPort, OrganizationId, PortError};
use domain_accounts::DottedPath;
use domain_entries::{EntryMap, EntryStore, ExpenseFigures, ExpenseMap, RevenueFigures, RevenueMap};
use std::collections::BTreeMap;
use tracing::debug;

use crate::table::Table;

type PerOrganization<F> = BTreeMap<OrganizationId, EntryMap<F>>;

/// Field-scoped upserts, last write wins
#[derive(Debug)]
pub struct MemoryEntryStore {
    expenses: Table<PerOrganization<ExpenseFigures>>,
    revenues: Table<PerOrganization<RevenueFigures>>,
}

impl Default for MemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self {
            expenses: Table::new("expense_entries", BTreeMap::new()),
            revenues: Table::new("revenue_entries", BTreeMap::new()),
        }
    }

    /// Replaces an organization's whole expense map, e.g. after a daily recovery
    pub fn replace_expenses(&self, organization_id: &OrganizationId, expenses: ExpenseMap) -> Result<(), PortError> {
        self.expenses.write()?.insert(organization_id.clone(), expenses);
        Ok(())
    }
}

fn read_one<F: Clone>(table: &Table<PerOrganization<F>>, organization_id: &OrganizationId) -> Result<EntryMap<F>, PortError> {
    Ok(table.read()?.get(organization_id).cloned().unwrap_or_default())
}

fn upsert<F>(
    table: &Table<PerOrganization<F>>,
    organization_id: &OrganizationId,
    account_id: &DottedPath,
    figures: F,
) -> Result<(), PortError> {
    table
        .write()?
        .entry(organization_id.clone())
        .or_default()
        .insert(account_id.clone(), figures);
    debug!(organization_id = %organization_id, account_id = %account_id, "entry upserted");
    Ok(())
}

impl DomainPort for MemoryEntryStore {}

impl EntryStore for MemoryEntryStore {
    fn read_expenses(&self, organization_id: &OrganizationId) -> Result<ExpenseMap, PortError> {
        read_one(&self.expenses, organization_id)
    }

    fn read_revenues(&self, organization_id: &OrganizationId) -> Result<RevenueMap, PortError> {
        read_one(&self.revenues, organization_id)
    }

    fn upsert_expense(
        &self,
        organization_id: &OrganizationId,
        account_id: &DottedPath,
        figures: ExpenseFigures,
    ) -> Result<(), PortError> {
        upsert(&self.expenses, organization_id, account_id, figures)
    }

    fn upsert_revenue(
        &self,
        organization_id: &OrganizationId,
        account_id: &DottedPath,
        figures: RevenueFigures,
    ) -> Result<(), PortError> {
        upsert(&self.revenues, organization_id, account_id, figures)
    }

    fn read_all_expenses(&self) -> Result<BTreeMap<OrganizationId, ExpenseMap>, PortError> {
        Ok(self.expenses.read()?.clone())
    }

    fn read_all_revenues(&self) -> Result<BTreeMap<OrganizationId, RevenueMap>, PortError> {
        Ok(self.revenues.read()?.clone())
    }
}
