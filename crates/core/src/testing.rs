//! Recording doubles for the session and notification ports
//!
//! Both recorders keep every event in arrival order so tests can assert on
//! counts ("logout emitted exactly once") as well as payloads.

use adminhub_domain::{CredentialPair, LoginResponse, Notification};
use parking_lot::Mutex;

use crate::auth::ports::{NotificationSink, SessionSink};

/// Session event as observed by [`RecordingSessionSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Credentials(LoginResponse),
    Tokens(CredentialPair),
    Logout,
}

#[derive(Debug, Default)]
pub struct RecordingSessionSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingSessionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().clone()
    }

    pub fn logout_count(&self) -> usize {
        self.events.lock().iter().filter(|e| matches!(e, SessionEvent::Logout)).count()
    }

    /// Every pair received through `set_tokens`, oldest first.
    pub fn token_updates(&self) -> Vec<CredentialPair> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Tokens(pair) => Some(pair.clone()),
                _ => None,
            })
            .collect()
    }
}

impl SessionSink for RecordingSessionSink {
    fn set_credentials(&self, login: &LoginResponse) {
        self.events.lock().push(SessionEvent::Credentials(login.clone()));
    }

    fn set_tokens(&self, pair: &CredentialPair) {
        self.events.lock().push(SessionEvent::Tokens(pair.clone()));
    }

    fn logout(&self) {
        self.events.lock().push(SessionEvent::Logout);
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications.lock().iter().map(|n| n.message.clone()).collect()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}
