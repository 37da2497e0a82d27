//! Navigation endpoint
//!
//! Returns the modules the signed-in user can enter, in canonical order,
//! so a client renders exactly what the guards will admit.

use crate::access::{Module, accessible_modules};
use crate::server::middleware::{CurrentSession, current_session};
use crate::server::routes::ApiResponse;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

/// One entry in the navigation for the signed-in user
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavigationEntry {
    /// The module this entry leads to
    pub module: Module,
    /// Display label
    pub label: &'static str,
    /// Route prefix the client should link to
    pub path: &'static str,
}

/// The accessible modules for the current session
pub async fn get_navigation(req: HttpRequest) -> ActixResult<HttpResponse> {
    let CurrentSession::Authenticated { snapshot, .. } = current_session(&req)? else {
        return Err(GatewayError::auth("No active session").into());
    };
    if snapshot.user.is_none() {
        return Err(GatewayError::auth("No active session").into());
    }

    let entries: Vec<NavigationEntry> = accessible_modules(snapshot.role)
        .into_iter()
        .map(|module| NavigationEntry {
            module,
            label: module.label(),
            path: module.route_prefix(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}
