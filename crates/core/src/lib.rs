//! # AdminHub Core
//!
//! Pure session logic layer - no HTTP.
//!
//! This crate contains:
//! - Port interfaces (traits) the API client reports to
//! - The application-wide session state that consumes auth events
//! - Typed access to persisted credentials
//!
//! ## Architecture Principles
//! - Only depends on `adminhub-common` and `adminhub-domain`
//! - No network code
//! - Collaborators are injected through traits

pub mod auth;
pub mod session;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::credentials::CredentialVault;
pub use auth::ports::{NotificationSink, SessionSink};
pub use session::SessionStore;
