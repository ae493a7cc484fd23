//! Application-wide session state
//!
//! Holds the [`AuthState`] the rest of the application reads, and reacts to
//! the session events produced by the API client. Tokens are not written
//! here: the client persists them before it emits an event. A restored
//! session writes user patches back to the store it was restored from.

use adminhub_domain::{AuthState, AuthUser, AuthUserPatch, CredentialPair, LoginResponse};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::auth::credentials::CredentialVault;
use crate::auth::ports::SessionSink;

/// In-memory session store
#[derive(Default)]
pub struct SessionStore {
    state: RwLock<AuthState>,
    vault: Option<CredentialVault>,
}

impl SessionStore {
    /// Empty, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the session from persisted credentials.
    ///
    /// The session counts as authenticated only when both an access token
    /// and a decodable user are stored. A corrupt user entry yields an empty
    /// session.
    pub fn restore(vault: &CredentialVault) -> Self {
        let user = match vault.user() {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "Discarding persisted session");
                return Self::new();
            }
        };
        let access_token = vault.access_token();
        let refresh_token = vault.refresh_token();
        let is_authenticated = access_token.is_some() && user.is_some();

        debug!(is_authenticated, "Session restored from credential store");

        Self {
            state: RwLock::new(AuthState {
                user,
                access_token,
                refresh_token,
                is_authenticated,
                is_loading: false,
                error: None,
            }),
            vault: Some(vault.clone()),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.read().user.clone()
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().is_loading = loading;
    }

    /// Record a failed auth attempt; also ends any loading state.
    pub fn set_error(&self, message: impl Into<String>) {
        let mut state = self.state.write();
        state.error = Some(message.into());
        state.is_loading = false;
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    /// Merge `patch` into the signed-in user and persist the result. Returns
    /// the updated user, or `None` when nobody is signed in.
    pub fn update_user(&self, patch: AuthUserPatch) -> Option<AuthUser> {
        let updated = {
            let mut state = self.state.write();
            let user = state.user.as_mut()?;
            user.apply(patch);
            user.clone()
        };

        if let Some(vault) = &self.vault {
            if let Err(err) = vault.persist_user(&updated) {
                warn!(error = %err, "Failed to persist updated user");
            }
        }
        Some(updated)
    }
}

impl SessionSink for SessionStore {
    fn set_credentials(&self, login: &LoginResponse) {
        let mut state = self.state.write();
        state.user = Some(login.user.clone());
        state.access_token = Some(login.access_token.clone());
        state.refresh_token = Some(login.refresh_token.clone());
        state.is_authenticated = true;
        state.is_loading = false;
        state.error = None;
        info!(user = %login.user.id, "Session established");
    }

    fn set_tokens(&self, pair: &CredentialPair) {
        let mut state = self.state.write();
        state.access_token = Some(pair.access_token.clone());
        state.refresh_token = Some(pair.refresh_token.clone());
        debug!("Session tokens rotated");
    }

    fn logout(&self) {
        *self.state.write() = AuthState::default();
        info!("Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use adminhub_common::testing::ReadOnlyCredentialStore;
    use adminhub_common::MemoryCredentialStore;
    use adminhub_domain::constants::{
        STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN, STORAGE_KEY_USER,
    };
    use adminhub_domain::{EntityId, UserRole};

    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: EntityId::from("u-9"),
            email: "linus@example.com".into(),
            first_name: "Linus".into(),
            last_name: "T".into(),
            role: UserRole::User,
            avatar: None,
            is_email_verified: false,
        }
    }

    fn login() -> LoginResponse {
        LoginResponse {
            user: user(),
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_in: 900,
        }
    }

    #[test]
    fn restore_requires_token_and_user() {
        let store = MemoryCredentialStore::with_entries([(STORAGE_KEY_ACCESS_TOKEN, "a")]);
        let session = SessionStore::restore(&CredentialVault::new(Arc::new(store)));
        assert!(!session.is_authenticated());
        assert_eq!(session.snapshot().access_token.as_deref(), Some("a"));

        let user_json = serde_json::to_string(&user()).unwrap();
        let store = MemoryCredentialStore::with_entries([
            (STORAGE_KEY_ACCESS_TOKEN, "a".to_string()),
            (STORAGE_KEY_REFRESH_TOKEN, "r".to_string()),
            (STORAGE_KEY_USER, user_json),
        ]);
        let session = SessionStore::restore(&CredentialVault::new(Arc::new(store)));
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().map(|u| u.id), Some(EntityId::from("u-9")));
    }

    #[test]
    fn corrupt_user_yields_empty_session() {
        let store = MemoryCredentialStore::with_entries([
            (STORAGE_KEY_ACCESS_TOKEN, "a"),
            (STORAGE_KEY_USER, "not json"),
        ]);
        let session = SessionStore::restore(&CredentialVault::new(Arc::new(store)));
        assert_eq!(session.snapshot(), AuthState::default());
    }

    #[test]
    fn events_drive_state() {
        let session = SessionStore::new();
        session.set_loading(true);
        session.set_credentials(&login());

        let state = session.snapshot();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);

        session.set_tokens(&CredentialPair::new("access-2", "refresh-2"));
        let state = session.snapshot();
        assert_eq!(state.access_token.as_deref(), Some("access-2"));
        assert_eq!(state.refresh_token.as_deref(), Some("refresh-2"));
        assert!(state.is_authenticated);

        session.logout();
        assert_eq!(session.snapshot(), AuthState::default());
    }

    #[test]
    fn error_stops_loading_and_can_be_cleared() {
        let session = SessionStore::new();
        session.set_loading(true);
        session.set_error("Invalid credentials");
        let state = session.snapshot();
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_loading);

        session.clear_error();
        assert_eq!(session.snapshot().error, None);
    }

    #[test]
    fn update_user_needs_a_signed_in_user() {
        let session = SessionStore::new();
        assert_eq!(session.update_user(AuthUserPatch::default()), None);

        session.set_credentials(&login());
        let updated = session
            .update_user(AuthUserPatch { last_name: Some("Torvalds".into()), ..Default::default() })
            .unwrap();
        assert_eq!(updated.last_name, "Torvalds");
        assert_eq!(session.current_user().unwrap().last_name, "Torvalds");
    }

    #[test]
    fn user_patch_survives_restore() {
        let user_json = serde_json::to_string(&user()).unwrap();
        let store = Arc::new(MemoryCredentialStore::with_entries([
            (STORAGE_KEY_ACCESS_TOKEN, "a".to_string()),
            (STORAGE_KEY_USER, user_json),
        ]));
        let vault = CredentialVault::new(store.clone());

        let session = SessionStore::restore(&vault);
        session.update_user(AuthUserPatch {
            avatar: Some("https://cdn.example.com/linus.png".into()),
            ..Default::default()
        });

        let restored = SessionStore::restore(&vault).current_user().unwrap();
        assert_eq!(restored.avatar.as_deref(), Some("https://cdn.example.com/linus.png"));
        assert_eq!(restored.email, "linus@example.com");
    }

    #[test]
    fn user_patch_is_kept_in_memory_when_the_write_fails() {
        let user_json = serde_json::to_string(&user()).unwrap();
        let store = ReadOnlyCredentialStore::with_entries([
            (STORAGE_KEY_ACCESS_TOKEN, "a".to_string()),
            (STORAGE_KEY_USER, user_json),
        ]);
        let session = SessionStore::restore(&CredentialVault::new(Arc::new(store)));

        let updated = session
            .update_user(AuthUserPatch { first_name: Some("Lin".into()), ..Default::default() })
            .unwrap();
        assert_eq!(updated.first_name, "Lin");
        assert_eq!(session.current_user().unwrap().first_name, "Lin");
    }
}
