//! Application-level configuration.
//!
//! - [`ApiConfig`]: credentials and origins for the upstream REST API

pub mod api_config;

pub use api_config::{ApiConfig, DEFAULT_BASE_URL};
