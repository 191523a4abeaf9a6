//! Chart-of-accounts errors

use thiserror::Error;

/// Errors that can occur while parsing paths or building an account tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid account path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),

    #[error("Account {child} has no parent {parent} in the chart")]
    MissingParent { child: String, parent: String },

    #[error("Account {id} is declared {declared} but is {actual} in the tree")]
    KindMismatch {
        id: String,
        declared: String,
        actual: String,
    },

    #[error("Unknown account type '{0}'")]
    UnknownKind(String),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Invalid chart definition: {0}")]
    InvalidChart(String),
}
