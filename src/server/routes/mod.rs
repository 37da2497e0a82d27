//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod health;
pub mod modules;
pub mod navigation;
pub mod session;

use crate::access::Module;
use crate::server::middleware::{ModuleGuard, SessionMiddleware};
use actix_web::web;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[allow(dead_code)]
impl<T> ApiResponse<T> {
    /// Create an error response for any type
    pub fn error_for_type(message: String) -> ApiResponse<T> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Configure the versioned API surface
///
/// Every route under `/api/v1` runs behind the session middleware. Each
/// module gets its own scope wrapped in a guard for exactly that module;
/// the scope list follows the canonical module order.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let mut api = web::scope("/api/v1")
        .wrap(SessionMiddleware)
        .service(
            web::scope("/session")
                .route("", web::get().to(session::get_session))
                .route("/refresh", web::post().to(session::refresh_session))
                .route("/sign-out", web::post().to(session::sign_out)),
        )
        .route("/navigation", web::get().to(navigation::get_navigation));

    for module in Module::ALL {
        api = api.service(
            web::scope(module.route_prefix())
                .wrap(ModuleGuard::for_module(module))
                .route("", web::get().to(modules::module_home)),
        );
    }

    cfg.service(api);
}
