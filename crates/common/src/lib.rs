//! Foundation utilities shared across AdminHub crates.
//!
//! # Modules
//!
//! - [`storage`]: the credential key-value store contract plus in-memory and
//!   file-backed implementations
//! - [`testing`]: store doubles for failure-path tests (`test-utils` feature)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod storage;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StorageError};
