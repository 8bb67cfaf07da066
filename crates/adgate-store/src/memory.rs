//! In-memory origin store with failure injection.

use std::collections::HashMap;

use parking_lot::RwLock;

use adgate_core::{Error, Result};

use crate::OriginStore;

/// HashMap-backed store. Cheap to share across manager instances via `Arc`,
/// which is how tests simulate several tabs on one origin.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: RwLock<bool>,
    fail_reads: RwLock<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `set` calls fail, as if the origin quota were exhausted.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.write() = fail;
    }

    /// Make subsequent `get` calls fail, as if the store were inaccessible.
    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.write() = fail;
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl OriginStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if *self.fail_reads.read() {
            return Err(Error::Store(format!("read failed for key {key}")));
        }
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.fail_writes.read() {
            return Err(Error::Store(format!("quota exceeded writing key {key}")));
        }
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
