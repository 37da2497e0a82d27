//! Session middleware
//!
//! Authenticates every API request from its bearer token and attaches the
//! outcome as a request extension. Route guards further in only decide
//! module access; they never touch the token themselves.

use crate::auth::{AuthOutcome, AuthSnapshot, SessionStore};
use crate::server::AppState;
use crate::utils::error::GatewayError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{self, HeaderMap};
use actix_web::{Error, HttpMessage, HttpRequest, ResponseError, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, warn};

/// What the session middleware concluded for this request
#[derive(Debug, Clone)]
pub enum CurrentSession {
    /// No bearer token was presented
    Anonymous,
    /// The token verified and the session settled
    Authenticated {
        /// The live store, for guards that keep watching the session
        store: Arc<SessionStore>,
        /// The settled snapshot taken when the request was authenticated
        snapshot: AuthSnapshot,
    },
}

/// Read the session the middleware attached to this request
pub fn current_session(req: &HttpRequest) -> crate::utils::error::Result<CurrentSession> {
    req.extensions()
        .get::<CurrentSession>()
        .cloned()
        .ok_or_else(|| GatewayError::internal("Session middleware missing"))
}

/// Extract the bearer token from request headers
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Session middleware for Actix-web
pub struct SessionMiddleware;

impl<S> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for session middleware
pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for SessionMiddlewareService<S>
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

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| GatewayError::internal("Application state missing"))?;

            let token = bearer_token(req.headers());
            let outcome = match state.auth.authenticate(token.as_deref()).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Session authentication failed: {}", e);
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, e.error_response()));
                }
            };

            let session = match outcome {
                AuthOutcome::Anonymous => {
                    debug!("Request carries no session");
                    CurrentSession::Anonymous
                }
                AuthOutcome::Session { store, snapshot } => {
                    debug!(user_id = ?snapshot.user.as_ref().map(|u| u.id), "Session attached");
                    CurrentSession::Authenticated { store, snapshot }
                }
            };

            req.extensions_mut().insert(session);
            service.call(req).await
        })
    }
}
