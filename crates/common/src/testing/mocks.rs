//! Mock implementations of the storage contract

use crate::storage::{CredentialStore, MemoryCredentialStore, StorageError};

/// Store whose every operation fails, as if the backing medium vanished.
#[derive(Debug, Default)]
pub struct UnavailableCredentialStore;

impl CredentialStore for UnavailableCredentialStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("store offline".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("store offline".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("store offline".into()))
    }
}

/// Store that serves reads from a seeded map and rejects all writes.
#[derive(Debug, Default)]
pub struct ReadOnlyCredentialStore {
    inner: MemoryCredentialStore,
}

impl ReadOnlyCredentialStore {
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self { inner: MemoryCredentialStore::with_entries(entries) }
    }
}

impl CredentialStore for ReadOnlyCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("store is read-only".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("store is read-only".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_store_serves_seeded_values() {
        let store = ReadOnlyCredentialStore::with_entries([("access_token", "a")]);
        assert_eq!(store.get("access_token").unwrap().as_deref(), Some("a"));
        assert!(store.set("access_token", "b").is_err());
        assert!(store.set_many(&[("access_token", "b")]).is_err());
    }

    #[test]
    fn unavailable_store_fails_everything() {
        let store = UnavailableCredentialStore;
        assert!(store.get("x").is_err());
        assert!(store.remove_many(&["x"]).is_err());
    }
}
