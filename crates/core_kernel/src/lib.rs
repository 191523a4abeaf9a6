//! Core Kernel - Foundational types shared by every portal crate
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money and percentage types with precise decimal arithmetic
//! - Deadlines, clocks and timezone handling
//! - Identifiers and the explicit request context
//! - Port error types for adapters

pub mod context;
pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use context::{OrganizationType, RequestContext};
pub use error::CoreError;
pub use identifiers::{AuditEntryId, DeclarationId, OrganizationId, UserId};
pub use money::{Money, MoneyError, Percentage};
pub use ports::{DomainPort, PortError};
pub use temporal::{Clock, Deadline, FixedClock, SystemClock, TemporalError, Timezone};
