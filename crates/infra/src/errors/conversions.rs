//! Conversions from external infrastructure errors into domain errors.

use adminhub_common::StorageError;
use adminhub_domain::AdminHubError;
use reqwest::Error as HttpError;

/// Error newtype that keeps third-party conversions on the infrastructure
/// side; unwraps into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AdminHubError);

impl From<InfraError> for AdminHubError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

trait IntoAdminHubError {
    fn into_adminhub(self) -> AdminHubError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AdminHubError */
/* -------------------------------------------------------------------------- */

impl IntoAdminHubError for HttpError {
    fn into_adminhub(self) -> AdminHubError {
        if self.is_timeout() {
            return AdminHubError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AdminHubError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return AdminHubError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => AdminHubError::Auth(message),
                404 => AdminHubError::NotFound(message),
                400..=499 => AdminHubError::InvalidInput(message),
                _ => AdminHubError::Network(message),
            };
        }

        AdminHubError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_adminhub())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → AdminHubError */
/* -------------------------------------------------------------------------- */

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        let mapped = match value {
            StorageError::InvalidConfig(message) => AdminHubError::Config(message),
            other => AdminHubError::Storage(other.to_string()),
        };
        InfraError(mapped)
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
