//! Authenticated API client for the admin backend
//!
//! # Architecture
//!
//! - [`HttpClient`](crate::http::HttpClient) sends each request once
//! - [`ApiClient`] attaches credentials, classifies outcomes and replays
//!   requests after a refresh
//! - [`RefreshCoordinator`] keeps at most one refresh in flight and queues
//!   everyone else behind it
//! - [`AuthApi`] and [`UserApi`] are typed endpoint services on top

pub mod auth;
pub mod classifier;
pub mod client;
pub mod errors;
pub mod refresh;
pub mod request;
pub mod users;

pub use auth::AuthApi;
pub use classifier::{classify, error_message, Classification};
pub use client::{ApiClient, ApiClientBuilder, ApiResponse};
pub use errors::{ApiError, ApiErrorCategory};
pub use refresh::{HttpTokenRefresher, RefreshCoordinator, TokenRefresher};
pub use request::ApiRequest;
pub use users::UserApi;
