//! Audit Domain
//!
//! Append-only record of every state-changing action in the portal.
//!
//! # Replay
//!
//! Field edits carry the previous and the new value, so the figures of an
//! organization at any past instant can be rebuilt by replaying its edits in
//! timestamp order. The daily recovery uses this to roll current figures back
//! to yesterday's close, writing corrective entries rather than deleting
//! anything.
//!
//! # Best-effort writes
//!
//! Audit appends never abort the operation they describe. Writers get an
//! [`AuditStatus`] back and surface it alongside their result via
//! [`Audited`].

pub mod entry;
pub mod error;
pub mod ports;
pub mod status;
pub mod trail;

pub use entry::{AuditAction, AuditEntry, AuditField};
pub use error::AuditError;
pub use ports::AuditSink;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockAuditSink;
pub use status::{AuditStatus, Audited};
pub use trail::{AuditExportRow, AuditTrail, EditKind, RecoveryOutcome, EXPORT_HEADERS};
