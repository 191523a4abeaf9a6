//! Lock wrapper shared by every adapter

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::MemoryStoreError;

/// A named, lock-protected table
#[derive(Debug)]
pub struct Table<T> {
    name: &'static str,
    rows: RwLock<T>,
}

impl<T> Table<T> {
    pub fn new(name: &'static str, rows: T) -> Self {
        Self {
            name,
            rows: RwLock::new(rows),
        }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, T>, MemoryStoreError> {
        self.rows.read().map_err(|_| MemoryStoreError::Poisoned(self.name))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, T>, MemoryStoreError> {
        self.rows.write().map_err(|_| MemoryStoreError::Poisoned(self.name))
    }
}
