//! Testing utilities
//!
//! Store doubles for exercising failure paths in downstream crates.

pub mod mocks;

pub use mocks::{ReadOnlyCredentialStore, UnavailableCredentialStore};
