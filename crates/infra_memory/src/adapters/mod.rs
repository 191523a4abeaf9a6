//! Port implementations

pub mod audit;
pub mod declarations;
pub mod entries;
pub mod organizations;

pub use audit::MemoryAuditSink;
pub use declarations::{MemoryDeclarationStore, MemoryResponsibleStore};
pub use entries::MemoryEntryStore;
pub use organizations::MemoryOrganizationDirectory;
