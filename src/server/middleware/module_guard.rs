//! Module guard middleware
//!
//! One guard wraps each module scope and turns the session attached by the
//! session middleware into a verdict for that module. Anonymous requests
//! are redirected to sign-in; authenticated ones pass or are denied by the
//! permission table alone.

use crate::access::{Module, Role};
use crate::auth::{GuardDisposition, RouteGuard};
use crate::server::AppState;
use crate::server::middleware::session::CurrentSession;
use crate::utils::error::GatewayError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, HttpMessage, ResponseError, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// The module verdict attached to requests that passed a guard
#[derive(Debug, Clone, Copy)]
pub struct CurrentModule {
    /// The module the request was admitted into
    pub module: Module,
    /// The role that granted access
    pub role: Role,
}

/// Module guard middleware for Actix-web
pub struct ModuleGuard {
    module: Module,
}

impl ModuleGuard {
    /// Guard a scope for one module
    pub fn for_module(module: Module) -> Self {
        Self { module }
    }
}

impl<S> Transform<S, ServiceRequest> for ModuleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type InitError = ();
    type Transform = ModuleGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ModuleGuardService {
            service: Rc::new(service),
            module: self.module,
        }))
    }
}

/// Service implementation for module guard middleware
pub struct ModuleGuardService<S> {
    service: Rc<S>,
    module: Module,
}

impl<S> Service<ServiceRequest> for ModuleGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let module = self.module;

        Box::pin(async move {
            let session = req
                .extensions()
                .get::<CurrentSession>()
                .cloned()
                .ok_or_else(|| GatewayError::internal("Session middleware missing"))?;

            let store = match session {
                CurrentSession::Anonymous => {
                    debug!(module = %module, "Anonymous request; redirecting to sign-in");
                    let sign_in_path = sign_in_path_from(&req);
                    return Ok(reject(req, GatewayError::SignInRequired { sign_in_path }));
                }
                CurrentSession::Authenticated { store, .. } => store,
            };

            // Evaluate against the live store, not the snapshot taken at
            // session resolution; a concurrent refresh or pushed role
            // change belongs in this verdict.
            let disposition = RouteGuard::new(&store, module).settled().await;

            match disposition {
                GuardDisposition::Allowed { module, role } => {
                    debug!(module = %module, role = %role, "Module access granted");
                    req.extensions_mut().insert(CurrentModule { module, role });
                    service.call(req).await
                }
                GuardDisposition::Denied { module, role } => {
                    debug!(module = %module, role = ?role, "Module access denied");
                    Ok(reject(req, GatewayError::ModuleAccess { module, role }))
                }
                // Reachable when a sign-out raced this request
                GuardDisposition::SignIn => {
                    let sign_in_path = sign_in_path_from(&req);
                    Ok(reject(req, GatewayError::SignInRequired { sign_in_path }))
                }
                GuardDisposition::Loading => {
                    Err(GatewayError::internal("Session not settled before module guard").into())
                }
            }
        })
    }
}

/// Short-circuit the request with the error's response envelope
fn reject(req: ServiceRequest, err: GatewayError) -> ServiceResponse {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response)
}

/// The sign-in path from configuration, with the built-in default as fallback
fn sign_in_path_from(req: &ServiceRequest) -> String {
    req.app_data::<web::Data<AppState>>()
        .map(|state| state.config.session.sign_in_path.clone())
        .unwrap_or_else(|| "/sign-in".to_string())
}
