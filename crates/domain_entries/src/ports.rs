//! Ports for entry storage and the organization directory

use core_kernel::{DomainPort, OrganizationId, PortError};
use domain_accounts::DottedPath;
use std::collections::BTreeMap;

use crate::entry::{Entries, ExpenseMap, RevenueMap};
use crate::figures::{ExpenseFigures, RevenueFigures};
use crate::organization::Organization;

/// Storage of entered figures
///
/// Writes are field-scoped upserts; last write wins. The `read_all_*`
/// methods bypass per-organization access restrictions and must only be
/// reached from federal-council paths.
pub trait EntryStore: DomainPort {
    fn read_expenses(&self, organization_id: &OrganizationId) -> Result<ExpenseMap, PortError>;

    fn read_revenues(&self, organization_id: &OrganizationId) -> Result<RevenueMap, PortError>;

    fn upsert_expense(
        &self,
        organization_id: &OrganizationId,
        account_id: &DottedPath,
        figures: ExpenseFigures,
    ) -> Result<(), PortError>;

    fn upsert_revenue(
        &self,
        organization_id: &OrganizationId,
        account_id: &DottedPath,
        figures: RevenueFigures,
    ) -> Result<(), PortError>;

    fn read_all_expenses(&self) -> Result<BTreeMap<OrganizationId, ExpenseMap>, PortError>;

    fn read_all_revenues(&self) -> Result<BTreeMap<OrganizationId, RevenueMap>, PortError>;

    /// Both charts for one organization
    fn read_entries(&self, organization_id: &OrganizationId) -> Result<Entries, PortError> {
        Ok(Entries {
            revenues: self.read_revenues(organization_id)?,
            expenses: self.read_expenses(organization_id)?,
        })
    }
}

/// Directory of participating organizations
pub trait OrganizationDirectory: DomainPort {
    fn list_organizations(&self) -> Result<Vec<Organization>, PortError>;

    fn find_organization(&self, organization_id: &OrganizationId) -> Result<Organization, PortError> {
        self.list_organizations()?
            .into_iter()
            .find(|o| &o.id == organization_id)
            .ok_or_else(|| PortError::not_found("Organization", organization_id))
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Debug, Default)]
    struct Tables {
        expenses: BTreeMap<OrganizationId, ExpenseMap>,
        revenues: BTreeMap<OrganizationId, RevenueMap>,
    }

    /// Map-backed entry store; `set_failing` makes writes fail
    #[derive(Debug, Default)]
    pub struct MockEntryStore {
        tables: Mutex<Tables>,
        failing: AtomicBool,
    }

    impl MockEntryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn lock(&self) -> Result<MutexGuard<'_, Tables>, PortError> {
            self.tables
                .lock()
                .map_err(|_| PortError::internal("entry store lock poisoned"))
        }

        fn check_writable(&self) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::connection("entry store unavailable"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockEntryStore {}

    impl EntryStore for MockEntryStore {
        fn read_expenses(&self, organization_id: &OrganizationId) -> Result<ExpenseMap, PortError> {
            Ok(self.lock()?.expenses.get(organization_id).cloned().unwrap_or_default())
        }

        fn read_revenues(&self, organization_id: &OrganizationId) -> Result<RevenueMap, PortError> {
            Ok(self.lock()?.revenues.get(organization_id).cloned().unwrap_or_default())
        }

        fn upsert_expense(
            &self,
            organization_id: &OrganizationId,
            account_id: &DottedPath,
            figures: ExpenseFigures,
        ) -> Result<(), PortError> {
            self.check_writable()?;
            self.lock()?
                .expenses
                .entry(organization_id.clone())
                .or_default()
                .insert(account_id.clone(), figures);
            Ok(())
        }

        fn upsert_revenue(
            &self,
            organization_id: &OrganizationId,
            account_id: &DottedPath,
            figures: RevenueFigures,
        ) -> Result<(), PortError> {
            self.check_writable()?;
            self.lock()?
                .revenues
                .entry(organization_id.clone())
                .or_default()
                .insert(account_id.clone(), figures);
            Ok(())
        }

        fn read_all_expenses(&self) -> Result<BTreeMap<OrganizationId, ExpenseMap>, PortError> {
            Ok(self.lock()?.expenses.clone())
        }

        fn read_all_revenues(&self) -> Result<BTreeMap<OrganizationId, RevenueMap>, PortError> {
            Ok(self.lock()?.revenues.clone())
        }
    }
}
