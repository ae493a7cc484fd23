//! API-specific error types
//!
//! Every call made through [`ApiClient`](super::ApiClient) ends in either a
//! decoded value or one of these.

use adminhub_domain::AdminHubError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401/403 responses and failed refresh attempts
    Authentication,
    /// 5xx responses
    Server,
    /// Other 4xx responses and undecodable bodies
    Client,
    /// No response reached the client
    Network,
    /// Client construction or request building failed
    Config,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never reached a server.
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `body` is the raw response text.
    #[error("Request failed with status code {status}")]
    Http { status: u16, body: String },

    /// An auth failure occurred but no refresh credential was stored.
    #[error("No refresh token")]
    NoRefreshToken,

    /// The refresh call failed while this request was waiting on it.
    #[error("Token refresh failed")]
    RefreshFailed,

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Transport(_) => ApiErrorCategory::Network,
            Self::Http { status: 401 | 403, .. } | Self::NoRefreshToken | Self::RefreshFailed => {
                ApiErrorCategory::Authentication
            }
            Self::Http { status, .. } if *status >= 500 => ApiErrorCategory::Server,
            Self::Http { .. } | Self::Decode(_) => ApiErrorCategory::Client,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401 response.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<ApiError> for AdminHubError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err.category() {
            ApiErrorCategory::Authentication => AdminHubError::Auth(message),
            ApiErrorCategory::Network | ApiErrorCategory::Server => AdminHubError::Network(message),
            ApiErrorCategory::Config => AdminHubError::Config(message),
            ApiErrorCategory::Client if err.status() == Some(404) => {
                AdminHubError::NotFound(message)
            }
            ApiErrorCategory::Client => AdminHubError::InvalidInput(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http { status, body: String::new() }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(http(401).category(), ApiErrorCategory::Authentication);
        assert_eq!(http(403).category(), ApiErrorCategory::Authentication);
        assert_eq!(ApiError::NoRefreshToken.category(), ApiErrorCategory::Authentication);
        assert_eq!(ApiError::RefreshFailed.category(), ApiErrorCategory::Authentication);
        assert_eq!(http(500).category(), ApiErrorCategory::Server);
        assert_eq!(http(422).category(), ApiErrorCategory::Client);
        assert_eq!(ApiError::Transport("refused".into()).category(), ApiErrorCategory::Network);
        assert_eq!(ApiError::Config("bad url".into()).category(), ApiErrorCategory::Config);
    }

    #[test]
    fn display_matches_user_facing_texts() {
        assert_eq!(http(401).to_string(), "Request failed with status code 401");
        assert_eq!(ApiError::NoRefreshToken.to_string(), "No refresh token");
        assert_eq!(ApiError::RefreshFailed.to_string(), "Token refresh failed");
    }

    #[test]
    fn converts_into_domain_error() {
        assert!(matches!(AdminHubError::from(http(401)), AdminHubError::Auth(_)));
        assert!(matches!(AdminHubError::from(http(404)), AdminHubError::NotFound(_)));
        assert!(matches!(AdminHubError::from(http(400)), AdminHubError::InvalidInput(_)));
        assert!(matches!(
            AdminHubError::from(ApiError::Transport("x".into())),
            AdminHubError::Network(_)
        ));
    }
}
