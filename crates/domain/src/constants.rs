//! Application constants
//!
//! Centralized location for storage keys, endpoint paths and user-facing
//! fallback messages shared by every layer.

// Credential store keys
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "access_token";
pub const STORAGE_KEY_REFRESH_TOKEN: &str = "refresh_token";
pub const STORAGE_KEY_USER: &str = "user";

// Auth endpoints
pub const ENDPOINT_AUTH_LOGIN: &str = "/auth/login";
pub const ENDPOINT_AUTH_LOGOUT: &str = "/auth/logout";
pub const ENDPOINT_AUTH_REFRESH: &str = "/auth/refresh";
pub const ENDPOINT_AUTH_REGISTER: &str = "/auth/register";

// User endpoints
pub const ENDPOINT_USERS: &str = "/users";

/// `/users/{id}`
pub fn user_endpoint(id: &str) -> String {
    format!("{ENDPOINT_USERS}/{id}")
}

/// `/users/{id}/profile`
pub fn user_profile_endpoint(id: &str) -> String {
    format!("{ENDPOINT_USERS}/{id}/profile")
}

// Pagination defaults
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// API defaults
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

// Notification texts
pub const MESSAGE_CONNECTION_FAILED: &str = "Unable to connect to server";
pub const MESSAGE_GENERIC_FAILURE: &str = "Something went wrong";
