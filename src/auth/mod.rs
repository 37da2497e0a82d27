//! Authentication and session management
//!
//! This module verifies backend-issued session tokens, resolves the role
//! attached to each user, and publishes per-user session state that module
//! guards react to.

mod claims;
mod guard;
mod resolver;
mod session;


pub use claims::{SessionClaims, TokenVerifier};
pub use guard::{GuardDisposition, RouteGuard};
pub use resolver::{
    BackendRoleResolver, CachingRoleResolver, RoleResolver, token_fingerprint,
};
pub use session::{AuthSnapshot, AuthUser, SessionStore};

#[cfg(test)]
pub use resolver::MockRoleResolver;

use crate::access::Role;
use crate::config::{BackendConfig, SessionConfig};
use crate::utils::error::Result;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What authentication concluded for one request
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// No token was presented
    Anonymous,
    /// A verified session, already settled
    Session {
        /// The live store for this user, for guards that keep watching
        store: Arc<SessionStore>,
        /// The snapshot taken once the session settled
        snapshot: AuthSnapshot,
    },
}

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// Session token verifier
    verifier: TokenVerifier,
    /// Role resolver with the identity-scoped cache in front
    resolver: Arc<CachingRoleResolver>,
    /// One session store per signed-in user
    sessions: Arc<DashMap<Uuid, Arc<SessionStore>>>,
}

impl AuthSystem {
    /// Create an authentication system backed by the managed data backend
    pub fn new(session: &SessionConfig, backend: &BackendConfig) -> Result<Self> {
        info!("Initializing authentication system");

        let resolver = Arc::new(BackendRoleResolver::new(backend)?);
        Ok(Self::with_resolver(session, resolver))
    }

    /// Create an authentication system with a custom role resolver
    ///
    /// This is the seam tests use to substitute a fake role source; the
    /// identity-scoped cache still sits in front of it.
    pub fn with_resolver(session: &SessionConfig, resolver: Arc<dyn RoleResolver>) -> Self {
        Self {
            verifier: TokenVerifier::new(session),
            resolver: Arc::new(CachingRoleResolver::new(resolver, &session.role_cache)),
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Authenticate a request from its bearer token, if any
    ///
    /// The returned snapshot is always settled. A resolver failure surfaces
    /// as an absent role, not an error, so access fails closed instead of
    /// taking the whole request down.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<AuthOutcome> {
        let Some(token) = token else {
            return Ok(AuthOutcome::Anonymous);
        };

        let claims = self.verifier.verify(token)?;
        let store = self.store_for(claims.sub);
        let user = AuthUser {
            id: claims.sub,
            email: claims.email.clone(),
        };

        if let Some(epoch) = store.begin_resolution(user) {
            let role = self.lookup_role(claims.sub, token).await;
            store.role_resolved(epoch, role);
        }

        let snapshot = store.settled().await;
        Ok(AuthOutcome::Session { store, snapshot })
    }

    /// Re-resolve the role for a session, bypassing the cache
    pub async fn refresh_role(&self, token: &str) -> Result<AuthSnapshot> {
        let claims = self.verifier.verify(token)?;
        let store = self.store_for(claims.sub);
        let user = AuthUser {
            id: claims.sub,
            email: claims.email.clone(),
        };

        self.resolver.invalidate_user(claims.sub);
        let epoch = store.begin_refresh(user);

        match self.resolver.resolve(claims.sub, token).await {
            Ok(role) => {
                store.role_resolved(epoch, role);
                Ok(store.settled().await)
            }
            Err(e) => {
                // Settle denied rather than leaving the store loading
                store.role_resolved(epoch, None);
                Err(e)
            }
        }
    }

    /// Clear the session for the user behind this token
    pub fn sign_out(&self, token: &str) -> Result<()> {
        let claims = self.verifier.verify(token)?;

        self.resolver.invalidate_user(claims.sub);
        if let Some(store) = self.sessions.get(&claims.sub) {
            store.signed_out();
        }

        info!(user_id = %claims.sub, "User signed out");
        Ok(())
    }

    /// Apply a role change pushed from outside the request flow
    ///
    /// Guards watching the user's session re-evaluate immediately; the
    /// cached role is dropped so the next resolution sees the new one.
    pub fn role_changed(&self, user_id: Uuid, role: Option<Role>) {
        self.resolver.invalidate_user(user_id);

        if let Some(store) = self.sessions.get(&user_id) {
            if store.role_changed(role) {
                info!(user_id = %user_id, role = ?role, "Applied pushed role change");
                return;
            }
        }
        debug!(user_id = %user_id, "Role change for user with no live session");
    }

    /// Get or create the session store for a user
    fn store_for(&self, user_id: Uuid) -> Arc<SessionStore> {
        self.sessions
            .entry(user_id)
            .or_insert_with(|| Arc::new(SessionStore::new()))
            .value()
            .clone()
    }

    async fn lookup_role(&self, user_id: Uuid, token: &str) -> Option<Role> {
        match self.resolver.resolve(user_id, token).await {
            Ok(role) => role,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Role lookup failed; treating role as absent");
                None
            }
        }
    }
}
