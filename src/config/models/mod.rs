//! Configuration data models
//!
//! This module defines all configuration structures used throughout the
//! gateway.

pub mod backend;
pub mod logging;
pub mod server;
pub mod session;

// Re-export all configuration types
pub use backend::*;
pub use logging::*;
pub use server::*;
pub use session::*;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_true() -> bool {
    true
}
