//! Token refresh coordination
//!
//! At most one refresh is in flight per coordinator. The first request that
//! hits an auth failure becomes the leader and performs the refresh; requests
//! failing while it runs park on a one-shot channel and are woken, in arrival
//! order, once the leader settles.
//!
//! The in-flight flag and the waiter queue share one mutex. Deciding whether
//! to lead or follow happens under that lock with no await point, and the
//! lock is never held across an await.

use std::sync::Arc;

use adminhub_core::{CredentialVault, SessionSink};
use adminhub_domain::constants::ENDPOINT_AUTH_REFRESH;
use adminhub_domain::{CredentialPair, RefreshTokenRequest, RefreshTokenResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::client::endpoint_url;
use super::errors::ApiError;
use crate::http::{DispatchOutcome, HttpClient};

type Waiter = oneshot::Sender<Result<String, ApiError>>;

/// Exchanges a refresh credential for a new pair
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<CredentialPair, ApiError>;
}

/// Calls `POST {base_url}/auth/refresh` directly, outside the authenticated
/// pipeline. Any non-2xx answer fails the refresh.
pub struct HttpTokenRefresher {
    http: HttpClient,
    base_url: String,
}

impl HttpTokenRefresher {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<CredentialPair, ApiError> {
        let url = endpoint_url(&self.base_url, ENDPOINT_AUTH_REFRESH)?;
        let body = RefreshTokenRequest { refresh_token: refresh_token.to_string() };
        let builder = self.http.request(Method::POST, url).json(&body);

        match self.http.dispatch(builder).await {
            DispatchOutcome::Success { body, .. } => {
                let response: RefreshTokenResponse = serde_json::from_str(&body)
                    .map_err(|e| ApiError::Decode(format!("refresh response: {e}")))?;
                Ok(response.into_credentials())
            }
            DispatchOutcome::Http { status, body } => Err(ApiError::Http { status, body }),
            DispatchOutcome::Transport { message } => Err(ApiError::Transport(message)),
        }
    }
}

#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    waiters: Vec<Waiter>,
}

enum Role {
    Leader,
    Follower(oneshot::Receiver<Result<String, ApiError>>),
}

/// Single-flight refresh with a FIFO waiter queue
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
    refresher: Arc<dyn TokenRefresher>,
    vault: CredentialVault,
    session: Arc<dyn SessionSink>,
}

impl RefreshCoordinator {
    pub fn new(
        refresher: Arc<dyn TokenRefresher>,
        vault: CredentialVault,
        session: Arc<dyn SessionSink>,
    ) -> Self {
        Self { state: Mutex::new(RefreshState::default()), refresher, vault, session }
    }

    /// Obtain a fresh access token after `original` (a 401) was received.
    ///
    /// # Errors
    /// The leader gets `NoRefreshToken` when nothing is stored, or `original`
    /// back when the refresh fails. Followers get `NoRefreshToken` or
    /// `RefreshFailed`.
    pub async fn recover(&self, original: ApiError) -> Result<String, ApiError> {
        let role = {
            let mut state = self.state.lock();
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                debug!(queued = state.waiters.len(), "Refresh in flight; waiting");
                Role::Follower(rx)
            } else {
                state.refreshing = true;
                Role::Leader
            }
        };

        match role {
            Role::Follower(rx) => rx.await.unwrap_or(Err(ApiError::RefreshFailed)),
            Role::Leader => self.lead(original).await,
        }
    }

    /// True while a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Number of callers parked behind the current refresh.
    pub fn queued(&self) -> usize {
        self.state.lock().waiters.len()
    }

    async fn lead(&self, original: ApiError) -> Result<String, ApiError> {
        let mut guard = LeaderGuard { coordinator: self, settled: false };

        let Some(refresh_token) = self.vault.refresh_token() else {
            info!("No refresh token stored; ending session");
            self.force_logout();
            guard.settle(Err(ApiError::NoRefreshToken));
            return Err(ApiError::NoRefreshToken);
        };

        info!("Refreshing access token");
        match self.refresher.refresh(&refresh_token).await {
            Ok(pair) => {
                if let Err(err) = self.vault.persist_pair(&pair) {
                    warn!(error = %err, "Failed to persist refreshed credentials");
                }
                self.session.set_tokens(&pair);
                guard.settle(Ok(pair.access_token.clone()));
                info!("Access token refreshed");
                Ok(pair.access_token)
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed; ending session");
                guard.settle(Err(ApiError::RefreshFailed));
                self.force_logout();
                Err(original)
            }
        }
    }

    /// Wake every waiter in arrival order and return to idle.
    fn flush(&self, result: Result<String, ApiError>) {
        let waiters = {
            let mut state = self.state.lock();
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };

        debug!(released = waiters.len(), ok = result.is_ok(), "Flushing refresh queue");
        for waiter in waiters {
            // A waiter whose caller went away has nothing to wake.
            let _ = waiter.send(result.clone());
        }
    }

    fn force_logout(&self) {
        if let Err(err) = self.vault.clear() {
            warn!(error = %err, "Failed to clear persisted credentials");
        }
        self.session.logout();
    }
}

/// Returns the coordinator to idle if the leader's future is dropped
/// mid-refresh.
struct LeaderGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl LeaderGuard<'_> {
    fn settle(&mut self, result: Result<String, ApiError>) {
        self.settled = true;
        self.coordinator.flush(result);
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Refresh abandoned by its caller; releasing waiters");
            self.coordinator.flush(Err(ApiError::RefreshFailed));
        }
    }
}
