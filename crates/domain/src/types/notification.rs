//! User-visible notification events

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl_domain_status_conversions!(Severity {
    Success => "success",
    Error => "error",
    Warning => "warning",
    Info => "info",
});

/// A "show message" event for the notification surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: Severity::Error }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: Severity::Info }
    }
}
