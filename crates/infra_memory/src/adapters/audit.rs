//! Audit log storage

use core_kernel::{DomainPort, OrganizationId, PortError};
use domain_audit::{AuditEntry, AuditSink};

use crate::table::Table;

/// Append-only audit log; there is no update or delete path
#[derive(Debug)]
pub struct MemoryAuditSink {
    entries: Table<Vec<AuditEntry>>,
}

impl Default for MemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self {
            entries: Table::new("audit_logs", Vec::new()),
        }
    }

    pub fn len(&self) -> Result<usize, PortError> {
        Ok(self.entries.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, PortError> {
        Ok(self.len()? == 0)
    }
}

impl DomainPort for MemoryAuditSink {}

impl AuditSink for MemoryAuditSink {
    fn append(&self, entry: &AuditEntry) -> Result<(), PortError> {
        self.entries.write()?.push(entry.clone());
        Ok(())
    }

    fn list_for_organization(&self, organization_id: &OrganizationId) -> Result<Vec<AuditEntry>, PortError> {
        Ok(self
            .entries
            .read()?
            .iter()
            .filter(|e| &e.organization_id == organization_id)
            .cloned()
            .collect())
    }
}
