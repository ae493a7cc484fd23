//! Typed access to persisted credentials
//!
//! Wraps a [`CredentialStore`] with the three auth keys (`access_token`,
//! `refresh_token`, `user`). Reads are infallible from the caller's point of
//! view: a store error is logged and treated as "absent", matching how a
//! missing token is handled.

use std::sync::Arc;

use adminhub_common::storage::{CredentialStore, StorageError};
use adminhub_domain::constants::{
    STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN, STORAGE_KEY_USER,
};
use adminhub_domain::{AdminHubError, AuthUser, CredentialPair, LoginResponse, Result};
use tracing::{debug, warn};

/// Credential accessor over a shared key-value store
#[derive(Clone)]
pub struct CredentialVault {
    store: Arc<dyn CredentialStore>,
}

impl CredentialVault {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.read(STORAGE_KEY_ACCESS_TOKEN)
    }

    /// Current refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.read(STORAGE_KEY_REFRESH_TOKEN)
    }

    /// Persisted user.
    ///
    /// # Errors
    /// Returns `AdminHubError::Storage` if the stored JSON does not decode.
    pub fn user(&self) -> Result<Option<AuthUser>> {
        match self.read(STORAGE_KEY_USER) {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AdminHubError::Storage(format!("stored user is invalid: {e}"))),
            None => Ok(None),
        }
    }

    /// Replace the stored token pair in one write.
    ///
    /// # Errors
    /// Returns `AdminHubError::Storage` if the store rejects the write.
    pub fn persist_pair(&self, pair: &CredentialPair) -> Result<()> {
        self.store
            .set_many(&[
                (STORAGE_KEY_ACCESS_TOKEN, pair.access_token.as_str()),
                (STORAGE_KEY_REFRESH_TOKEN, pair.refresh_token.as_str()),
            ])
            .map_err(storage_error)?;
        debug!("Persisted credential pair");
        Ok(())
    }

    /// Persist tokens and user from a login/register response.
    ///
    /// # Errors
    /// Returns `AdminHubError::Storage` if encoding or writing fails.
    pub fn persist_login(&self, login: &LoginResponse) -> Result<()> {
        let user = serde_json::to_string(&login.user)
            .map_err(|e| AdminHubError::Storage(format!("failed to encode user: {e}")))?;
        self.store
            .set_many(&[
                (STORAGE_KEY_ACCESS_TOKEN, login.access_token.as_str()),
                (STORAGE_KEY_REFRESH_TOKEN, login.refresh_token.as_str()),
                (STORAGE_KEY_USER, user.as_str()),
            ])
            .map_err(storage_error)?;
        debug!("Persisted login credentials");
        Ok(())
    }

    /// Replace the stored user.
    ///
    /// # Errors
    /// Returns `AdminHubError::Storage` if encoding or writing fails.
    pub fn persist_user(&self, user: &AuthUser) -> Result<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| AdminHubError::Storage(format!("failed to encode user: {e}")))?;
        self.store.set(STORAGE_KEY_USER, &raw).map_err(storage_error)
    }

    /// Remove every auth key.
    ///
    /// # Errors
    /// Returns `AdminHubError::Storage` if the store rejects the removal.
    pub fn clear(&self) -> Result<()> {
        self.store
            .remove_many(&[STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN, STORAGE_KEY_USER])
            .map_err(storage_error)?;
        debug!("Cleared persisted credentials");
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                warn!(key, error = %err, "Credential store read failed; treating as absent");
                None
            }
        }
    }
}

fn storage_error(err: StorageError) -> AdminHubError {
    AdminHubError::Storage(err.to_string())
}
