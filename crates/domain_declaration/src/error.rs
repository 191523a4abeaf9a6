//! Declaration domain errors

use core_kernel::{Deadline, OrganizationId, PortError};
use domain_entries::EntryError;
use domain_reporting::ReportingError;
use thiserror::Error;

use crate::declaration::DeclarationStatus;
use crate::responsible::ResponsibleField;

/// Errors raised by the declaration lifecycle and the entry editor
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// Required responsible-party fields are blank
    #[error("Missing responsible fields: {}", join(missing))]
    Validation { missing: Vec<ResponsibleField> },

    #[error("Deadline {deadline} has passed")]
    Deadline { deadline: Deadline },

    #[error("No declaration found for organization {0}")]
    NotFound(OrganizationId),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Cannot move declaration from {from} to {to}")]
    InvalidStateTransition {
        from: DeclarationStatus,
        to: DeclarationStatus,
    },

    /// Entries are frozen by a submitted declaration
    #[error("Entries of organization {0} are locked by a submitted declaration")]
    Locked(OrganizationId),

    #[error("Invalid receipt number: {0}")]
    InvalidReceipt(String),

    #[error("Entry error: {0}")]
    Entry(#[from] EntryError),

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),

    /// Internal consistency check failed; a programming defect
    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl From<ReportingError> for DeclarationError {
    fn from(err: ReportingError) -> Self {
        match err {
            ReportingError::Invariant(message) => DeclarationError::Invariant(message),
            other => DeclarationError::Invariant(other.to_string()),
        }
    }
}

impl DeclarationError {
    /// Whether the caller can fix the problem and retry
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DeclarationError::Validation { .. }
                | DeclarationError::Deadline { .. }
                | DeclarationError::NotFound(_)
                | DeclarationError::Unauthorized(_)
                | DeclarationError::Locked(_)
        )
    }
}

fn join(fields: &[ResponsibleField]) -> String {
    fields.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
}
