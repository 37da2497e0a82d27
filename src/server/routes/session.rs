//! Session endpoints
//!
//! These let a client inspect its settled session, force a role refresh
//! that bypasses the cache, and sign out.

use crate::access::{Module, Role, accessible_modules};
use crate::auth::{AuthSnapshot, AuthUser};
use crate::server::middleware::{CurrentSession, bearer_token, current_session};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// What the client needs to render for the signed-in user
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionPayload {
    /// The signed-in user
    pub user: AuthUser,
    /// Resolved role, absent for profiles without one
    pub role: Option<Role>,
    /// Display label for the role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_label: Option<&'static str>,
    /// Modules this role may enter, in canonical order
    pub accessible_modules: Vec<Module>,
}

impl SessionPayload {
    fn from_snapshot(snapshot: &AuthSnapshot) -> Option<Self> {
        let user = snapshot.user.clone()?;
        Some(Self {
            user,
            role: snapshot.role,
            role_label: snapshot.role.map(|r| r.label()),
            accessible_modules: accessible_modules(snapshot.role),
        })
    }
}

/// Sign-out acknowledgement payload
#[derive(Debug, Clone, serde::Serialize)]
pub struct SignOutPayload {
    /// Always true; the session is gone when this arrives
    pub signed_out: bool,
}

/// The settled session for the presented token
pub async fn get_session(req: HttpRequest) -> ActixResult<HttpResponse> {
    let CurrentSession::Authenticated { snapshot, .. } = current_session(&req)? else {
        return Err(GatewayError::auth("No active session").into());
    };

    let payload = SessionPayload::from_snapshot(&snapshot)
        .ok_or_else(|| GatewayError::auth("No active session"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(payload)))
}

/// Re-resolve the role for this session, bypassing the cache
pub async fn refresh_session(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| GatewayError::auth("No session token to refresh"))?;

    let snapshot = state.auth.refresh_role(&token).await?;
    debug!(role = ?snapshot.role, "Session role refreshed");

    let payload = SessionPayload::from_snapshot(&snapshot)
        .ok_or_else(|| GatewayError::auth("No active session"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(payload)))
}

/// Clear the session for the presented token
pub async fn sign_out(req: HttpRequest, state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| GatewayError::auth("No session token to sign out"))?;

    state.auth.sign_out(&token)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(SignOutPayload { signed_out: true })))
}
