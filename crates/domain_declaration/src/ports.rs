//! Ports for declaration and responsible-party storage

use core_kernel::{DeclarationId, DomainPort, OrganizationId, PortError};

use crate::declaration::{Declaration, DeclarationStatus};
use crate::responsible::ResponsibleParty;

/// Append-only declaration storage
///
/// Rows are never deleted and only their status may change.
pub trait DeclarationStore: DomainPort {
    fn insert_declaration(&self, declaration: &Declaration) -> Result<Declaration, PortError>;

    /// Most recently delivered declaration; ties resolve to the last inserted
    fn latest_declaration(&self, organization_id: &OrganizationId) -> Result<Option<Declaration>, PortError>;

    fn update_status(&self, declaration_id: DeclarationId, status: DeclarationStatus) -> Result<(), PortError>;

    /// All declarations of an organization, newest first
    fn history(&self, organization_id: &OrganizationId) -> Result<Vec<Declaration>, PortError>;
}

/// Storage of the responsible-party form, one per organization
pub trait ResponsibleStore: DomainPort {
    fn load_responsible(&self, organization_id: &OrganizationId) -> Result<Option<ResponsibleParty>, PortError>;

    fn save_responsible(&self, organization_id: &OrganizationId, party: &ResponsibleParty) -> Result<(), PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Vec-backed declaration store; `set_failing` makes inserts fail
    #[derive(Debug, Default)]
    pub struct MockDeclarationStore {
        rows: Mutex<Vec<Declaration>>,
        failing: AtomicBool,
    }

    impl MockDeclarationStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn rows(&self) -> Vec<Declaration> {
            self.rows.lock().map(|r| r.clone()).unwrap_or_default()
        }

        fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Declaration>>, PortError> {
            self.rows
                .lock()
                .map_err(|_| PortError::internal("declaration store lock poisoned"))
        }
    }

    impl DomainPort for MockDeclarationStore {}

    impl DeclarationStore for MockDeclarationStore {
        fn insert_declaration(&self, declaration: &Declaration) -> Result<Declaration, PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::connection("declaration store unavailable"));
            }
            self.lock()?.push(declaration.clone());
            Ok(declaration.clone())
        }

        fn latest_declaration(&self, organization_id: &OrganizationId) -> Result<Option<Declaration>, PortError> {
            Ok(self.history(organization_id)?.into_iter().next())
        }

        fn update_status(&self, declaration_id: DeclarationId, status: DeclarationStatus) -> Result<(), PortError> {
            let mut rows = self.lock()?;
            let row = rows
                .iter_mut()
                .find(|d| d.id() == declaration_id)
                .ok_or_else(|| PortError::not_found("Declaration", declaration_id))?;
            row.set_status(status)
                .map_err(|e| PortError::conflict(e.to_string()))
        }

        fn history(&self, organization_id: &OrganizationId) -> Result<Vec<Declaration>, PortError> {
            let mut rows: Vec<Declaration> = self
                .lock()?
                .iter()
                .filter(|d| d.organization_id() == organization_id)
                .cloned()
                .collect();
            rows.reverse();
            rows.sort_by(|a, b| b.delivery_date().cmp(&a.delivery_date()));
            Ok(rows)
        }
    }

    #[derive(Debug, Default)]
    pub struct MockResponsibleStore {
        parties: Mutex<HashMap<OrganizationId, ResponsibleParty>>,
    }

    impl MockResponsibleStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockResponsibleStore {}

    impl ResponsibleStore for MockResponsibleStore {
        fn load_responsible(&self, organization_id: &OrganizationId) -> Result<Option<ResponsibleParty>, PortError> {
            Ok(self
                .parties
                .lock()
                .map_err(|_| PortError::internal("responsible store lock poisoned"))?
                .get(organization_id)
                .cloned())
        }

        fn save_responsible(&self, organization_id: &OrganizationId, party: &ResponsibleParty) -> Result<(), PortError> {
            self.parties
                .lock()
                .map_err(|_| PortError::internal("responsible store lock poisoned"))?
                .insert(organization_id.clone(), party.clone());
            Ok(())
        }
    }
}
