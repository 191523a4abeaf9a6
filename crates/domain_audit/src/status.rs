//! Outcome of best-effort audit writes
//!
//! Audit appends never fail the operation they describe. Instead of
//! swallowing the failure silently, every audited operation returns its
//! value together with an [`AuditStatus`] the caller can inspect.

use core_kernel::AuditEntryId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuditStatus {
    Recorded { entry_id: AuditEntryId },
    /// The primary action succeeded but its audit entry was not stored
    Failed { reason: String },
    /// The operation was a no-op and wrote nothing
    NotRequired,
}

impl AuditStatus {
    pub fn is_recorded(&self) -> bool {
        matches!(self, AuditStatus::Recorded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AuditStatus::Failed { .. })
    }

    pub fn entry_id(&self) -> Option<AuditEntryId> {
        match self {
            AuditStatus::Recorded { entry_id } => Some(*entry_id),
            _ => None,
        }
    }
}

/// A value produced by an operation with a best-effort audit side effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audited<T> {
    pub value: T,
    pub audit: AuditStatus,
}

impl<T> Audited<T> {
    pub fn new(value: T, audit: AuditStatus) -> Self {
        Self { value, audit }
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Audited<U> {
        Audited {
            value: f(self.value),
            audit: self.audit,
        }
    }
}
