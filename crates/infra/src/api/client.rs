//! Authenticated API client
//!
//! Every call goes through one pipeline: attach the stored bearer token,
//! dispatch, classify. Transport and HTTP failures are reported to the
//! notification sink and returned. A first-attempt 401 is handed to the
//! [`RefreshCoordinator`] and the request is replayed once with the token it
//! returns.

use std::sync::Arc;

use adminhub_common::{CredentialStore, MemoryCredentialStore};
use adminhub_core::{CredentialVault, NotificationSink, SessionSink};
use adminhub_domain::constants::MESSAGE_CONNECTION_FAILED;
use adminhub_domain::{ApiConfig, Notification};
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::classifier::{classify, error_message, Classification};
use super::errors::ApiError;
use super::refresh::{HttpTokenRefresher, RefreshCoordinator, TokenRefresher};
use super::request::ApiRequest;
use crate::http::HttpClient;
use crate::notify::TracingNotifier;

/// Successful response as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as `T`. An empty body or a 204 decodes from `null`,
    /// so `()` and `Option<_>` work for bodiless endpoints.
    ///
    /// # Errors
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if self.status == StatusCode::NO_CONTENT.as_u16() || self.body.trim().is_empty() {
            return serde_json::from_value(Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "empty response ({}) cannot be decoded into the expected type",
                    self.status
                ))
            });
        }
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// API client with coordinated token refresh
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    vault: CredentialVault,
    session: Arc<dyn SessionSink>,
    notifier: Arc<dyn NotificationSink>,
    coordinator: RefreshCoordinator,
}

impl ApiClient {
    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn vault(&self) -> &CredentialVault {
        &self.vault
    }

    pub fn session(&self) -> &Arc<dyn SessionSink> {
        &self.session
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Run `request` through the authenticated pipeline.
    ///
    /// # Errors
    /// - `ApiError::Transport` when no response arrived
    /// - `ApiError::Http` for non-2xx answers, including a 401 whose refresh
    ///   failed or a 401 on a replay
    /// - `ApiError::NoRefreshToken` / `ApiError::RefreshFailed` from the
    ///   refresh cycle
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        loop {
            let builder = self.prepare(&request)?;
            let outcome = self.http.dispatch(builder).await;

            match classify(&request, outcome) {
                Classification::Success { status, body } => {
                    debug!(status, retried = request.retried, "Request succeeded");
                    return Ok(ApiResponse { status, body });
                }
                Classification::AuthFailure { status, body } => {
                    debug!(status, "Access token rejected; entering refresh");
                    let token = self.coordinator.recover(ApiError::Http { status, body }).await?;
                    request = request.into_replay(token);
                }
                Classification::Failure { status, body } => {
                    let message = error_message(status, &body);
                    warn!(status, retried = request.retried, message = %message, "Request failed");
                    self.notifier.notify(Notification::error(message));
                    return Err(ApiError::Http { status, body });
                }
                Classification::Transport { message } => {
                    warn!(error = %message, "Request did not reach the server");
                    self.notifier.notify(Notification::error(MESSAGE_CONNECTION_FAILED));
                    return Err(ApiError::Transport(message));
                }
            }
        }
    }

    /// Run `request` and decode the response body.
    ///
    /// # Errors
    /// Any error from [`execute`](Self::execute), or `ApiError::Decode`.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.execute(request).await?.json()
    }

    /// Execute a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    /// Execute a GET request with query parameters
    pub async fn get_with_query<T, K, V>(
        &self,
        path: &str,
        query: impl IntoIterator<Item = (K, V)>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        K: Into<String>,
        V: Into<String>,
    {
        self.send(ApiRequest::get(path).with_query(query)).await
    }

    /// Execute a POST request with a JSON body
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(ApiRequest::post(path).with_body(to_json(body)?)).await
    }

    /// Execute a PUT request with a JSON body
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(ApiRequest::put(path).with_body(to_json(body)?)).await
    }

    /// Execute a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Build the outgoing request: the credential the request carries (set on
    /// replay) first, otherwise the stored access token.
    fn prepare(&self, request: &ApiRequest) -> Result<RequestBuilder, ApiError> {
        let url = endpoint_url(&self.base_url, &request.path)?;
        let mut builder = self.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let token = request.authorization.clone().or_else(|| self.vault.access_token());
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        Ok(builder)
    }
}

/// Resolve `path` against `base_url`. Absolute URLs pass through; relative
/// paths are appended so a base path such as `/api` is kept.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ApiError> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Url::parse(path).map_err(|e| ApiError::Config(format!("invalid URL {path}: {e}")));
    }

    let base = base_url.trim_end_matches('/');
    let joined = if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") };
    Url::parse(&joined).map_err(|e| ApiError::Config(format!("invalid URL {joined}: {e}")))
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Config(format!("Failed to serialize body: {e}")))
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    store: Option<Arc<dyn CredentialStore>>,
    session: Option<Arc<dyn SessionSink>>,
    notifier: Option<Arc<dyn NotificationSink>>,
    refresher: Option<Arc<dyn TokenRefresher>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Credential store shared with the rest of the application. Defaults to
    /// an in-memory store.
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Receiver of session events
    pub fn session(mut self, session: Arc<dyn SessionSink>) -> Self {
        self.session = Some(session);
        self
    }

    /// Receiver of user-visible errors. Defaults to [`TracingNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Replace the HTTP refresh call. Defaults to [`HttpTokenRefresher`].
    pub fn refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the configuration or session sink is
    /// missing, the base URL does not parse, or the HTTP client cannot be
    /// created.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.ok_or_else(|| ApiError::Config("API config not set".into()))?;
        let session =
            self.session.ok_or_else(|| ApiError::Config("Session sink not set".into()))?;

        Url::parse(&config.base_url).map_err(|e| {
            ApiError::Config(format!("invalid base URL {}: {e}", config.base_url))
        })?;

        let mut http = HttpClient::builder().timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }
        let http = http
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        let store: Arc<dyn CredentialStore> =
            self.store.unwrap_or_else(|| Arc::new(MemoryCredentialStore::new()));
        let vault = CredentialVault::new(store);
        let notifier: Arc<dyn NotificationSink> =
            self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier));
        let refresher: Arc<dyn TokenRefresher> = self.refresher.unwrap_or_else(|| {
            Arc::new(HttpTokenRefresher::new(http.clone(), config.base_url.clone()))
        });

        let coordinator = RefreshCoordinator::new(refresher, vault.clone(), session.clone());

        info!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "API client ready");

        Ok(ApiClient { http, base_url: config.base_url, vault, session, notifier, coordinator })
    }
}
