//! # Coachdesk-RS
//!
//! Role-gated access gateway for a coaching platform. The gateway verifies
//! backend-issued session tokens, resolves each user's role from the
//! managed data backend, and admits or denies requests per module from a
//! single permission table.
//!
//! ## Features
//!
//! - **Closed role and module registries**: adding either is a compile-time
//!   decision, never a string comparison scattered through handlers
//! - **Single permission table**: every access decision reads one table;
//!   admin rights come from its rows, not a bypass
//! - **Fail-closed evaluation**: absent, unknown, or unresolved roles deny
//! - **Reactive sessions**: role changes and sign-outs reach live guards
//!   without tearing down the session
//! - **Identity-scoped role cache**: cached per user and token fingerprint,
//!   invalidated per user
//!
//! ## Access checks
//!
//! ```rust
//! use coachdesk_rs::access::{Module, Role, can_access};
//!
//! assert!(can_access(Some(Role::Admin), Module::Finances));
//! assert!(!can_access(Some(Role::Eleve), Module::Finances));
//! assert!(!can_access(None, Module::Dashboard));
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use coachdesk_rs::{Gateway, GatewayConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod access;
pub mod auth;
pub mod config;
pub mod server;
pub mod utils;

// Re-export main types
pub use access::{Module, Role};
pub use config::GatewayConfig;
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// A minimal gateway implementation
pub struct Gateway {
    config: GatewayConfig,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: GatewayConfig) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting Coachdesk access gateway");
        info!("Listening on {}", self.config.server.address());

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version used for the build
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build information for this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
