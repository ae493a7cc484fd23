//! Port interfaces for authentication side effects
//!
//! The API client produces session and notification events but owns neither
//! the session store nor the notification surface. Both are handed to it at
//! construction time through these traits.

use adminhub_domain::{CredentialPair, LoginResponse, Notification};

/// Consumer of session events
///
/// Implementations must not block: the client calls them inline while
/// settling a refresh.
pub trait SessionSink: Send + Sync {
    /// A login or registration succeeded.
    fn set_credentials(&self, login: &LoginResponse);

    /// A refresh produced a new credential pair.
    fn set_tokens(&self, pair: &CredentialPair);

    /// Authentication ended; all session state must be cleared.
    fn logout(&self);
}

/// Consumer of user-visible "show message" events
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}
