//! Entries Domain
//!
//! Figures entered by each organization against the analytical accounts of
//! the revenue and expense charts, plus the ports through which they are
//! stored and the organizations that own them.

pub mod entry;
pub mod error;
pub mod figures;
pub mod organization;
pub mod ports;
pub mod validation;

pub use entry::{Entries, EntryMap, ExpenseField, ExpenseMap, RevenueMap};
pub use error::EntryError;
pub use figures::{ExpenseBreakdown, ExpenseFigures, Figures, RevenueFigures};
pub use organization::Organization;
pub use ports::{EntryStore, OrganizationDirectory};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockEntryStore;
pub use validation::{check_expense, validate_expenses, EntryWarning};
