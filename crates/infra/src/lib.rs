//! # AdminHub Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP client
//! - The authenticated API client with coordinated token refresh
//! - Endpoint services for auth and user management
//! - Configuration loading, tracing setup and credential store selection
//!
//! ## Architecture
//! - Implements traits defined in `adminhub-core`
//! - Depends on `adminhub-domain`, `adminhub-common` and `adminhub-core`
//! - Contains all "impure" code (network, files, process environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod notify;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use api::{
    ApiClient, ApiClientBuilder, ApiError, ApiErrorCategory, ApiRequest, AuthApi,
    RefreshCoordinator, TokenRefresher, UserApi,
};
pub use errors::InfraError;
pub use http::{DispatchOutcome, HttpClient};
pub use notify::TracingNotifier;
pub use observability::init_tracing;
pub use storage::open_credential_store;
