//! Authentication endpoints
//!
//! Login and registration persist the returned credentials and emit
//! "set credentials"; logout always ends the local session, whatever the
//! backend answers.

use std::sync::Arc;

use adminhub_domain::constants::{
    ENDPOINT_AUTH_LOGIN, ENDPOINT_AUTH_LOGOUT, ENDPOINT_AUTH_REFRESH, ENDPOINT_AUTH_REGISTER,
};
use adminhub_domain::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse, RegisterRequest,
};
use tracing::{info, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// `/auth/*` endpoint service
#[derive(Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    /// Any [`ApiError`] from the call. Nothing is persisted on failure.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.client.post(ENDPOINT_AUTH_LOGIN, request).await?;
        self.establish(&response);
        info!(user = %response.user.id, "Logged in");
        Ok(response)
    }

    /// # Errors
    /// Any [`ApiError`] from the call. Nothing is persisted on failure.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.client.post(ENDPOINT_AUTH_REGISTER, request).await?;
        self.establish(&response);
        info!(user = %response.user.id, "Registered");
        Ok(response)
    }

    /// Tell the backend, then drop local credentials and end the session.
    #[instrument(skip_all)]
    pub async fn logout(&self) {
        if let Err(err) = self.client.execute(ApiRequest::post(ENDPOINT_AUTH_LOGOUT)).await {
            warn!(error = %err, "Logout call failed; clearing local session anyway");
        }
        if let Err(err) = self.client.vault().clear() {
            warn!(error = %err, "Failed to clear persisted credentials");
        }
        self.client.session().logout();
        info!("Logged out");
    }

    /// Exchange `refresh_token` through the regular pipeline. The result is
    /// returned as is; a 401 here never starts a refresh cycle.
    ///
    /// # Errors
    /// Any [`ApiError`] from the call.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshTokenResponse, ApiError> {
        let body = RefreshTokenRequest { refresh_token: refresh_token.to_string() };
        self.client.post(ENDPOINT_AUTH_REFRESH, &body).await
    }

    fn establish(&self, response: &LoginResponse) {
        if let Err(err) = self.client.vault().persist_login(response) {
            warn!(error = %err, "Failed to persist login credentials");
        }
        self.client.session().set_credentials(response);
    }
}
