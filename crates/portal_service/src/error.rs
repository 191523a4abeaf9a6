//! Portal error types

use core_kernel::{CoreError, PortError};
use domain_accounts::AccountError;
use domain_audit::AuditError;
use domain_declaration::DeclarationError;
use domain_reporting::ReportingError;
use thiserror::Error;

/// Errors surfaced by the portal facade
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Reporting(#[from] ReportingError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Chart file {path}: {reason}")]
    ChartFile { path: String, reason: String },
}

impl PortalError {
    /// Whether the message is meant for the person at the keyboard
    pub fn is_user_facing(&self) -> bool {
        match self {
            PortalError::Declaration(e) => e.is_user_facing(),
            PortalError::Forbidden(_) => true,
            _ => false,
        }
    }
}
