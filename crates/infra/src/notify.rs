//! Notification sink that writes to the tracing pipeline
//!
//! Used when no UI surface is attached (the CLI, background jobs).

use adminhub_core::NotificationSink;
use adminhub_domain::{Notification, Severity};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification { message, severity } = notification;
        match severity {
            Severity::Error => error!(target: "adminhub::notify", %severity, "{message}"),
            Severity::Warning => warn!(target: "adminhub::notify", %severity, "{message}"),
            Severity::Success | Severity::Info => {
                info!(target: "adminhub::notify", %severity, "{message}")
            }
        }
    }
}
