//! Response classification
//!
//! Sorts a [`DispatchOutcome`] into what the client should do next and
//! extracts the user-facing text for failures.

use adminhub_domain::constants::MESSAGE_GENERIC_FAILURE;
use serde_json::Value;

use super::request::ApiRequest;
use crate::http::DispatchOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Success { status: u16, body: String },
    /// 401 eligible for a refresh cycle.
    AuthFailure { status: u16, body: String },
    /// Any other non-2xx, including 401s that may not refresh.
    Failure { status: u16, body: String },
    Transport { message: String },
}

pub fn classify(request: &ApiRequest, outcome: DispatchOutcome) -> Classification {
    match outcome {
        DispatchOutcome::Transport { message } => Classification::Transport { message },
        DispatchOutcome::Success { status, body } => Classification::Success { status, body },
        DispatchOutcome::Http { status, body } if is_refreshable(request, status) => {
            Classification::AuthFailure { status, body }
        }
        DispatchOutcome::Http { status, body } => Classification::Failure { status, body },
    }
}

/// A 401 on a first attempt that is not itself a refresh call.
pub fn is_refreshable(request: &ApiRequest, status: u16) -> bool {
    status == 401 && !request.retried && !request.is_refresh_call()
}

/// Best-effort message from an error body: `message`, then `error`, then the
/// status text, then a generic fallback.
pub fn error_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    field("message")
        .or_else(|| field("error"))
        .or_else(|| (status > 0).then(|| format!("Request failed with status code {status}")))
        .unwrap_or_else(|| MESSAGE_GENERIC_FAILURE.to_string())
}
