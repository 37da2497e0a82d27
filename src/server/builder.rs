//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function used by the gateway binary.

use crate::config::GatewayConfig;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<GatewayConfig>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the gateway with the given configuration
pub async fn run_server(config: GatewayConfig) -> Result<()> {
    info!("🚀 Starting Coachdesk access gateway");

    let server = HttpServer::new(&config)?;

    info!("🌐 Server starting at: http://{}", config.server.address());
    info!("📋 API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /version - Build information");
    info!("   GET  /api/v1/session - Current session");
    info!("   POST /api/v1/session/refresh - Re-resolve the session role");
    info!("   POST /api/v1/session/sign-out - Clear the session");
    info!("   GET  /api/v1/navigation - Accessible modules");
    info!("   GET  /api/v1/{{module}} - Guarded module landing pages");

    server.start().await
}
