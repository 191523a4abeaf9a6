//! Ports that always fail
//!
//! Used to check that audit failures are reported without blocking the
//! primary write, and that entry-store failures do propagate.

use core_kernel::{DomainPort, OrganizationId, PortError};
use domain_accounts::DottedPath;
use domain_audit::{AuditEntry, AuditSink};
use domain_entries::{EntryStore, ExpenseFigures, ExpenseMap, RevenueFigures, RevenueMap};
use std::collections::BTreeMap;

fn unavailable(what: &str) -> PortError {
    PortError::connection(format!("{what} unavailable"))
}

/// Audit sink whose appends fail and whose history is empty
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingAuditSink;

impl DomainPort for FailingAuditSink {}

impl AuditSink for FailingAuditSink {
    fn append(&self, _entry: &AuditEntry) -> Result<(), PortError> {
        Err(unavailable("audit sink"))
    }

    fn list_for_organization(&self, _organization_id: &OrganizationId) -> Result<Vec<AuditEntry>, PortError> {
        Ok(Vec::new())
    }
}

/// Entry store that reads as empty and refuses every write
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEntryStore;

impl DomainPort for FailingEntryStore {}

impl EntryStore for FailingEntryStore {
    fn read_expenses(&self, _organization_id: &OrganizationId) -> Result<ExpenseMap, PortError> {
        Ok(ExpenseMap::new())
    }

    fn read_revenues(&self, _organization_id: &OrganizationId) -> Result<RevenueMap, PortError> {
        Ok(RevenueMap::new())
    }

    fn upsert_expense(
        &self,
        _organization_id: &OrganizationId,
        _account_id: &DottedPath,
        _figures: ExpenseFigures,
    ) -> Result<(), PortError> {
        Err(unavailable("entry store"))
    }

    fn upsert_revenue(
        &self,
        _organization_id: &OrganizationId,
        _account_id: &DottedPath,
        _figures: RevenueFigures,
    ) -> Result<(), PortError> {
        Err(unavailable("entry store"))
    }

    fn read_all_expenses(&self) -> Result<BTreeMap<OrganizationId, ExpenseMap>, PortError> {
        Err(unavailable("entry store"))
    }

    fn read_all_revenues(&self) -> Result<BTreeMap<OrganizationId, RevenueMap>, PortError> {
        Err(unavailable("entry store"))
    }
}
