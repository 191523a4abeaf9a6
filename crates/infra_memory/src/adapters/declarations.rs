//! Declaration and responsible-party storage

use core_kernel::{DeclarationId, DomainPort, OrganizationId, PortError};
use domain_declaration::{Declaration, DeclarationStatus, DeclarationStore, ResponsibleParty, ResponsibleStore};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::MemoryStoreError;
use crate::table::Table;

/// Append-only declaration rows with a unique receipt-number constraint
#[derive(Debug)]
pub struct MemoryDeclarationStore {
    rows: Table<Vec<Declaration>>,
}

impl Default for MemoryDeclarationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDeclarationStore {
    pub fn new() -> Self {
        Self {
            rows: Table::new("declarations", Vec::new()),
        }
    }

    pub fn len(&self) -> Result<usize, PortError> {
        Ok(self.rows.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, PortError> {
        Ok(self.len()? == 0)
    }
}

impl DomainPort for MemoryDeclarationStore {}

impl DeclarationStore for MemoryDeclarationStore {
    fn insert_declaration(&self, declaration: &Declaration) -> Result<Declaration, PortError> {
        let mut rows = self.rows.write()?;
        if rows
            .iter()
            .any(|d| d.receipt_number() == declaration.receipt_number())
        {
            warn!(receipt_number = %declaration.receipt_number(), "duplicate receipt number rejected");
            return Err(MemoryStoreError::Duplicate(format!(
                "receipt number {} already issued",
                declaration.receipt_number()
            ))
            .into());
        }
        rows.push(declaration.clone());
        debug!(
            organization_id = %declaration.organization_id(),
            receipt_number = %declaration.receipt_number(),
            "declaration stored"
        );
        Ok(declaration.clone())
    }

    fn latest_declaration(&self, organization_id: &OrganizationId) -> Result<Option<Declaration>, PortError> {
        let rows = self.rows.read()?;
        let mut latest: Option<&Declaration> = None;
        for row in rows.iter().filter(|d| d.organization_id() == organization_id) {
            if latest.map_or(true, |l| row.delivery_date() >= l.delivery_date()) {
                latest = Some(row);
            }
        }
        Ok(latest.cloned())
    }

    fn update_status(&self, declaration_id: DeclarationId, status: DeclarationStatus) -> Result<(), PortError> {
        let mut rows = self.rows.write()?;
        let row = rows
            .iter_mut()
            .find(|d| d.id() == declaration_id)
            .ok_or_else(|| MemoryStoreError::not_found("Declaration", declaration_id))?;
        row.set_status(status)
            .map_err(|e| MemoryStoreError::StatusChange(e.to_string()))?;
        Ok(())
    }

    fn history(&self, organization_id: &OrganizationId) -> Result<Vec<Declaration>, PortError> {
        let mut history: Vec<Declaration> = self
            .rows
            .read()?
            .iter()
            .filter(|d| d.organization_id() == organization_id)
            .cloned()
            .collect();
        history.reverse();
        history.sort_by(|a, b| b.delivery_date().cmp(&a.delivery_date()));
        Ok(history)
    }
}

/// One responsible-party form per organization
#[derive(Debug)]
pub struct MemoryResponsibleStore {
    parties: Table<HashMap<OrganizationId, ResponsibleParty>>,
}

impl Default for MemoryResponsibleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResponsibleStore {
    pub fn new() -> Self {
        Self {
            parties: Table::new("responsible_persons", HashMap::new()),
        }
    }
}

impl DomainPort for MemoryResponsibleStore {}

impl ResponsibleStore for MemoryResponsibleStore {
    fn load_responsible(&self, organization_id: &OrganizationId) -> Result<Option<ResponsibleParty>, PortError> {
        Ok(self.parties.read()?.get(organization_id).cloned())
    }

    fn save_responsible(&self, organization_id: &OrganizationId, party: &ResponsibleParty) -> Result<(), PortError> {
        self.parties
            .write()?
            .insert(organization_id.clone(), party.clone());
        Ok(())
    }
}
