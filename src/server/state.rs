//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::auth::AuthSystem;
use crate::config::GatewayConfig;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across threads.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<GatewayConfig>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// When the gateway started, for uptime reporting
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: GatewayConfig, auth: AuthSystem) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            started_at: chrono::Utc::now(),
        }
    }

    /// Seconds since the gateway started
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
