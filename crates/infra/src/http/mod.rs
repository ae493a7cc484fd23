//! Thin reqwest wrapper shared by every outbound call

pub mod client;

pub use client::{DispatchOutcome, HttpClient, HttpClientBuilder};
