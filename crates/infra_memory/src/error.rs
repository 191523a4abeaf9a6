//! In-memory store errors
//!
//! Adapters raise these internally and hand them to the domain as
//! [`PortError`], the only error type ports return.

use core_kernel::PortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryStoreError {
    /// A writer panicked while holding the table lock
    #[error("Table {0} is poisoned")]
    Poisoned(&'static str),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Rejected status change: {0}")]
    StatusChange(String),
}

impl MemoryStoreError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        MemoryStoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<MemoryStoreError> for PortError {
    fn from(err: MemoryStoreError) -> Self {
        match err {
            MemoryStoreError::Poisoned(_) => PortError::internal(err.to_string()),
            MemoryStoreError::NotFound { entity, id } => PortError::not_found(entity, id),
            MemoryStoreError::Duplicate(message) => PortError::conflict(message),
            MemoryStoreError::StatusChange(message) => PortError::conflict(message),
        }
    }
}
