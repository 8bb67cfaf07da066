//! AdGate Store — origin-scoped key-value persistence.

pub mod file;
pub mod memory;

use adgate_core::Result;

/// A per-origin string store (the shape of browser `localStorage`).
///
/// Synchronous and shared: every manager instance holding a handle to the same
/// origin sees the same keys. Writes are last-write-wins with no merge and no
/// transactions; nothing here prevents two instances from racing.
pub trait OriginStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value. May fail (quota exceeded, backing file unavailable).
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

pub use file::FileStore;
pub use memory::MemoryStore;
