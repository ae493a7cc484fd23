//! Authentication ports and credential access

pub mod credentials;
pub mod ports;
