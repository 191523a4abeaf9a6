//! Entry domain errors

use core_kernel::PortError;
use domain_accounts::AccountError;
use thiserror::Error;

/// Errors that can occur while reading or writing entries
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Account {0} is not analytical and cannot receive entries")]
    NotAnalytical(String),

    #[error("Field {field} of account {account_id} is filled automatically")]
    ReadOnlyField { account_id: String, field: String },

    #[error("Organization {0} may not write another organization's entries")]
    Forbidden(String),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}
