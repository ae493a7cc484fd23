//! # AdminHub Domain
//!
//! Business domain types and models for AdminHub.
//!
//! This crate contains:
//! - Wire DTOs exchanged with the admin REST backend (auth, users, paging)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Storage keys and endpoint paths
//!
//! ## Architecture
//! - No dependencies on other AdminHub crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
