//! Reporting errors

use thiserror::Error;

/// Errors that can occur while aggregating or consolidating figures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportingError {
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// Two equivalent computation paths disagree; a programming defect
    #[error("Invariant violation: {0}")]
    Invariant(String),
}
