//! Guarded module endpoints
//!
//! Every module scope shares one landing handler; by the time it runs, the
//! guard has already admitted the user and attached the verdict.

use crate::access::{Module, Role};
use crate::server::middleware::CurrentModule;
use crate::server::routes::ApiResponse;
use crate::utils::error::GatewayError;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result as ActixResult};

/// What a module landing endpoint returns
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModuleHome {
    /// The module that was entered
    pub module: Module,
    /// Display label
    pub label: &'static str,
    /// The role the guard admitted
    pub role: Role,
}

/// Landing endpoint shared by every guarded module scope
pub async fn module_home(req: HttpRequest) -> ActixResult<HttpResponse> {
    let current = req
        .extensions()
        .get::<CurrentModule>()
        .copied()
        .ok_or_else(|| GatewayError::internal("Module guard missing"))?;

    let home = ModuleHome {
        module: current.module,
        label: current.module.label(),
        role: current.role,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(home)))
}
