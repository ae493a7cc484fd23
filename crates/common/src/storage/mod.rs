//! Credential storage
//!
//! A small synchronous key-value contract for persisted auth material
//! (access token, refresh token, serialized user). Readers never coordinate
//! with writers: every value is replaced whole, never partially updated.
//!
//! Implementations:
//! - [`MemoryCredentialStore`]: process-local map, nothing survives a restart
//! - [`FileCredentialStore`]: JSON document on disk, rewritten atomically

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

/// Synchronous key-value store for credentials
pub trait CredentialStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Write several values. Stores that can do so apply them in one step.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove several values.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
