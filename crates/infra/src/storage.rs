//! Credential store selection

use std::sync::Arc;

use adminhub_common::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use adminhub_domain::{AdminHubError, Result, StorageConfig};
use tracing::info;

use crate::errors::InfraError;

/// File-backed store when a path is configured, in-memory otherwise.
///
/// # Errors
/// Returns `AdminHubError::Config` for an empty path and
/// `AdminHubError::Storage` if an existing file cannot be read or parsed.
pub fn open_credential_store(config: &StorageConfig) -> Result<Arc<dyn CredentialStore>> {
    match config.credentials_path.as_deref() {
        Some(path) => {
            let store = FileCredentialStore::open(path)
                .map_err(|e| AdminHubError::from(InfraError::from(e)))?;
            info!(path = %store.path().display(), "Using file credential store");
            Ok(Arc::new(store))
        }
        None => {
            info!("Using in-memory credential store");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn configured_path_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        let config = StorageConfig { credentials_path: Some(path.display().to_string()) };

        open_credential_store(&config).unwrap().set("access_token", "a-1").unwrap();

        let reopened = open_credential_store(&config).unwrap();
        assert_eq!(reopened.get("access_token").unwrap().as_deref(), Some("a-1"));
    }

    #[test]
    fn no_path_means_memory() {
        let store = open_credential_store(&StorageConfig::default()).unwrap();
        assert_eq!(store.get("access_token").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "[1,2").unwrap();

        let config = StorageConfig { credentials_path: Some(path.display().to_string()) };
        let err = open_credential_store(&config).err().expect("should fail");
        assert!(matches!(err, AdminHubError::Storage(_)));
    }
}
