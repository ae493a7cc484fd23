//! Domain types and models
//!
//! Field names follow the backend's camelCase JSON.

pub mod auth;
pub mod common;
pub mod notification;
pub mod user;

pub use auth::{
    AuthState, AuthUser, AuthUserPatch, CredentialPair, LoginRequest, LoginResponse,
    RefreshTokenRequest, RefreshTokenResponse, RegisterRequest, UserRole,
};
pub use common::{EntityId, Paginated, Pagination, QueryParams};
pub use notification::{Notification, Severity};
pub use user::{
    CreateUserRequest, NotificationChannels, ThemeMode, UpdateUserRequest, User,
    UserPreferences, UserProfile, UserStatus,
};
