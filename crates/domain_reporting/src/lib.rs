//! Reporting Domain
//!
//! Derived figures over the chart of accounts:
//! - `AggregationEngine` computes synthetic rows from analytical entries
//! - `ConsolidationEngine` merges many organizations into one entry map
//! - comparisons, sampling and BI rows are pure post-processing on top

pub mod aggregation;
pub mod bi_export;
pub mod comparison;
pub mod consolidation;
pub mod error;
pub mod sampling;

pub use aggregation::{AccountRow, AggregationEngine, Scope};
pub use bi_export::{bi_headers, bi_rows, BiCell, BiRow};
pub use comparison::{Category, CategoryTotals, Comparison, ComparisonReport, Outcome};
pub use consolidation::{ConsolidationEngine, OrganizationTotal};
pub use error::ReportingError;
pub use sampling::Sampling;
