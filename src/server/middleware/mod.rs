//! HTTP middleware implementations
//!
//! This module provides the middleware the gateway runs on every request:
//! - Session authentication
//! - Per-module access guards
//! - Request ID tracking

mod module_guard;
mod request_id;
mod session;


// Re-export all middleware
pub use module_guard::{CurrentModule, ModuleGuard, ModuleGuardService};
pub use request_id::{RequestIdMiddleware, RequestIdMiddlewareService};
pub use session::{
    CurrentSession, SessionMiddleware, SessionMiddlewareService, current_session,
};

pub(crate) use session::bearer_token;
