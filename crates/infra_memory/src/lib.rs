//! In-Memory Infrastructure
//!
//! Adapters implementing every portal port on top of `RwLock`-guarded maps.
//! They back the test suites and any embedding that has no remote data store.
//!
//! Each table is independently locked: a read across organizations may see
//! some organizations before and others after a concurrent edit, which is
//! the consistency the consolidation views are specified against.
//!
//! # Example
//!
//! ```rust
//! use infra_memory::MemoryBackend;
//! use domain_entries::EntryStore;
//!
//! let backend = MemoryBackend::new(Vec::new());
//! let expenses = backend.entries.read_expenses(&"cra-sp".into()).unwrap();
//! assert!(expenses.is_empty());
//! ```

pub mod adapters;
pub mod error;
pub mod table;

pub use adapters::{
    MemoryAuditSink, MemoryDeclarationStore, MemoryEntryStore, MemoryOrganizationDirectory, MemoryResponsibleStore,
};
pub use error::MemoryStoreError;

use domain_entries::Organization;
use std::sync::Arc;

/// One instance of every adapter, shareable as port trait objects
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    pub entries: Arc<MemoryEntryStore>,
    pub declarations: Arc<MemoryDeclarationStore>,
    pub responsibles: Arc<MemoryResponsibleStore>,
    pub audit: Arc<MemoryAuditSink>,
    pub organizations: Arc<MemoryOrganizationDirectory>,
}

impl MemoryBackend {
    pub fn new(organizations: Vec<Organization>) -> Self {
        Self {
            entries: Arc::new(MemoryEntryStore::new()),
            declarations: Arc::new(MemoryDeclarationStore::new()),
            responsibles: Arc::new(MemoryResponsibleStore::new()),
            audit: Arc::new(MemoryAuditSink::new()),
            organizations: Arc::new(MemoryOrganizationDirectory::new(organizations)),
        }
    }
}
