use std::time::Duration;

use adminhub_domain::constants::DEFAULT_API_TIMEOUT_MS;
use adminhub_domain::AdminHubError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Result of sending one request
///
/// Every request ends in exactly one of these. Non-2xx statuses are data, not
/// errors: the caller decides what a 401 means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No response reached the client (connect failure, timeout, broken body).
    Transport { message: String },
    /// The server answered with a non-2xx status.
    Http { status: u16, body: String },
    Success { status: u16, body: String },
}

impl DispatchOutcome {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::Http { status, .. } | Self::Success { status, .. } => Some(*status),
        }
    }
}

/// HTTP client with a fixed per-request timeout.
///
/// Requests are sent once. Recovery (token refresh and replay) is the
/// caller's job, so nothing here retries.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send the request once.
    ///
    /// # Errors
    /// Returns `AdminHubError::Network` when no response was received and
    /// `AdminHubError::Config` when the request cannot be built.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, AdminHubError> {
        let request = builder.build().map_err(|err| AdminHubError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, path = url.path(), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, path = url.path(), status = response.status().as_u16(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, path = url.path(), error = %err, "HTTP request failed");
                Err(AdminHubError::from(InfraError::from(err)))
            }
        }
    }

    /// Send the request once and read the whole body.
    pub async fn dispatch(&self, builder: RequestBuilder) -> DispatchOutcome {
        let response = match self.send(builder).await {
            Ok(response) => response,
            Err(err) => return DispatchOutcome::Transport { message: transport_message(err) },
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let mapped = AdminHubError::from(InfraError::from(err));
                return DispatchOutcome::Transport { message: transport_message(mapped) };
            }
        };

        if status.is_success() {
            DispatchOutcome::Success { status: status.as_u16(), body }
        } else {
            DispatchOutcome::Http { status: status.as_u16(), body }
        }
    }
}

fn transport_message(err: AdminHubError) -> String {
    match err {
        AdminHubError::Network(message) => message,
        other => other.to_string(),
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_API_TIMEOUT_MS),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, AdminHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).default_headers(headers).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            AdminHubError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}
