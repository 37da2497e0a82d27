//! Utility modules for the Coachdesk gateway

pub mod error;

pub use error::{GatewayError, Result};
