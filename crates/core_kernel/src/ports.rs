//! Ports and Adapters Infrastructure
//!
//! The portal core never talks to a database, an HTTP backend or a file
//! directly. Each domain crate declares the port traits it needs (entry store,
//! declaration store, audit sink, organization directory) on top of the
//! marker trait here, and adapters implement them.
//!
//! ```text
//!            ┌───────────────────────────────────────┐
//!            │   Lifecycle / Aggregation / Audit     │
//!            └───────────────────────────────────────┘
//!                               │
//!                               ▼
//!            ┌───────────────────────────────────────┐
//!            │  Port traits (EntryStore, AuditSink…) │
//!            └───────────────────────────────────────┘
//!                    ▲                       ▲
//!          ┌─────────┴────────┐    ┌─────────┴─────────┐
//!          │ In-memory adapter│    │  Remote data store│
//!          └──────────────────┘    └───────────────────┘
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Every adapter reports failures through this type so the domain can decide
/// uniformly which writes propagate and which are best-effort.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The operation conflicts with existing data (e.g. duplicate receipt)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across request handlers, so they must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Declaration", "DEC-123");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Declaration"));
        assert!(error.to_string().contains("DEC-123"));
    }

    #[test]
    fn test_conflict_is_not_not_found() {
        let error = PortError::conflict("receipt 2026.000001 already issued");
        assert!(!error.is_not_found());
        assert_eq!(error.to_string(), "Conflict: receipt 2026.000001 already issued");
    }
}
