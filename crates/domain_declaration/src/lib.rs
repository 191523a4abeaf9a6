//! Declaration Domain
//!
//! The per-organization state machine governing when figures may be entered,
//! when they are frozen into an immutable declaration, how rectifications are
//! numbered, and how the CFA reopens a submitted declaration outside the
//! normal deadline.
//!
//! # Rectifications
//!
//! The first declaration of an organization has `rectification_count = 0`.
//! Each later submission is a rectification numbered one above its
//! predecessor; earlier declarations stay queryable with their original
//! receipt numbers.

pub mod declaration;
pub mod editor;
pub mod error;
pub mod lifecycle;
pub mod ports;
pub mod receipt;
pub mod responsible;

pub use declaration::{Declaration, DeclarationStatus, DeclarationTotals, NewDeclaration};
pub use editor::{EditOutcome, EditorSettings, EntryEditor, DEFAULT_FULL_FINALISTICA_ACCOUNTS};
pub use error::DeclarationError;
pub use lifecycle::{DeclarationLifecycle, DeclarationState, DeliveryKind, Overview, OverviewRow, Severity};
pub use ports::{DeclarationStore, ResponsibleStore};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockDeclarationStore, MockResponsibleStore};
pub use receipt::{RandomReceipts, ReceiptNumber, ReceiptNumberGenerator, SequentialReceipts};
pub use responsible::{DocType, ResponsibleField, ResponsibleParty};
