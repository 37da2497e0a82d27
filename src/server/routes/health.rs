//! Health check and status endpoints
//!
//! These sit outside the API scope so that load balancers and deploy
//! tooling can reach them without a session.

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Health status payload
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthStatus {
    /// Overall service status
    pub status: Cow<'static, str>,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Service version
    pub version: Cow<'static, str>,
    /// Seconds since the gateway started
    pub uptime_seconds: u64,
}

/// Build and version information payload
#[derive(Debug, Clone, serde::Serialize)]
pub struct VersionInfo {
    /// Service version
    pub version: Cow<'static, str>,
    /// When the binary was built
    pub build_time: Cow<'static, str>,
    /// Git commit the binary was built from
    pub git_hash: Cow<'static, str>,
    /// Rust toolchain used for the build
    pub rust_version: Cow<'static, str>,
}

/// Basic health check endpoint
///
/// Returns a simple health status indicating if the service is running.
/// This endpoint is typically used by load balancers and monitoring systems.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: state.uptime_seconds(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Version information endpoint
pub async fn version_info() -> ActixResult<HttpResponse> {
    let info = VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        rust_version: Cow::Borrowed(env!("RUST_VERSION")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(info)))
}
