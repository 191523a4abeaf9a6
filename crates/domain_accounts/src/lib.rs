//! Chart of Accounts Domain
//!
//! Revenue and expense charts share one shape: a tree of accounts addressed
//! by dotted paths. Analytical leaves receive entries; synthetic nodes derive
//! their values from the leaves below them.
//!
//! ```text
//! 1 Despesas Correntes          (synthetic)
//! └── 1.1 Pessoal               (synthetic)
//!     ├── 1.1.1.1 Salários      (analytical)
//!     └── 1.1.1.2 Férias        (analytical)
//! ```

pub mod account;
pub mod collapse;
pub mod error;
pub mod path;
pub mod tree;

pub use account::{Account, AccountKind};
pub use collapse::{CollapseView, RowStyle};
pub use error::AccountError;
pub use path::DottedPath;
pub use tree::{AccountTree, Chart, ChartOfAccounts};
