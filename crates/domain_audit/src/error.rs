//! Audit domain errors

use core_kernel::{PortError, TemporalError};
use thiserror::Error;

/// Errors from audit queries
///
/// Audit *writes* never produce this type; their failures are reported
/// through [`AuditStatus`](crate::AuditStatus) instead.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),
}
