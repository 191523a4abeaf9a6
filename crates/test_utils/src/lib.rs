//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! declaration portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: A sample chart of accounts, organizations, contexts and instants
//! - `builders`: Builder patterns for entry maps and responsible parties
//! - `assertions`: Custom assertion helpers for money and grid rows
//! - `generators`: Property-based test data generators
//! - `stubs`: Port implementations that always fail

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod stubs;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use stubs::*;
