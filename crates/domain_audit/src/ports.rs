//! Audit sink port

use core_kernel::{DomainPort, OrganizationId, PortError};

use crate::entry::AuditEntry;

/// Append-only storage of audit entries
pub trait AuditSink: DomainPort {
    fn append(&self, entry: &AuditEntry) -> Result<(), PortError>;

    /// Every entry filed under `organization_id`, in append order
    fn list_for_organization(&self, organization_id: &OrganizationId) -> Result<Vec<AuditEntry>, PortError>;
}

/// In-memory sink for unit tests, with a switch to make appends fail
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct MockAuditSink {
        entries: Mutex<Vec<AuditEntry>>,
        failing: AtomicBool,
    }

    impl MockAuditSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn entries(&self) -> Vec<AuditEntry> {
            self.entries.lock().map(|e| e.clone()).unwrap_or_default()
        }

        pub fn push(&self, entry: AuditEntry) {
            if let Ok(mut entries) = self.entries.lock() {
                entries.push(entry);
            }
        }
    }

    impl DomainPort for MockAuditSink {}

    impl AuditSink for MockAuditSink {
        fn append(&self, entry: &AuditEntry) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::connection("audit sink unavailable"));
            }
            self.entries
                .lock()
                .map_err(|_| PortError::internal("audit sink lock poisoned"))?
                .push(entry.clone());
            Ok(())
        }

        fn list_for_organization(&self, organization_id: &OrganizationId) -> Result<Vec<AuditEntry>, PortError> {
            Ok(self
                .entries
                .lock()
                .map_err(|_| PortError::internal("audit sink lock poisoned"))?
                .iter()
                .filter(|e| &e.organization_id == organization_id)
                .cloned()
                .collect())
        }
    }
}
