//! Logging setup
//!
//! Everything logs through `tracing`. Events carry structured fields
//! (`method`, `path`, `status`, `queued`); tokens are never recorded.

pub mod logging;

pub use logging::{build_filter, init_tracing};
