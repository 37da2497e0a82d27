//! Role resolution against the managed data backend
//!
//! Session tokens do not carry a role. It lives in a profile row keyed by
//! user ID and is fetched over the backend's REST interface with the
//! caller's own token, so row-level security still applies.

use crate::access::Role;
use crate::config::{BackendConfig, RoleCacheConfig};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use dashmap::DashSet;
use moka::future::Cache;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Source of truth for the role attached to a user
///
/// `Ok(None)` means the lookup worked and the user has no usable role,
/// which callers treat as deny-everything.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleResolver: Send + Sync {
    /// Resolve the role for `user_id`, authenticating as the user via `token`
    async fn resolve(&self, user_id: Uuid, token: &str) -> Result<Option<Role>>;
}

/// Hash a session token for use in cache keys and logs
///
/// The raw credential never sits in the cache.
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(digest)
}

/// Resolves roles from the backend's profile table over REST
pub struct BackendRoleResolver {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    profile_table: String,
    role_column: String,
    warned_roles: DashSet<String>,
}

impl BackendRoleResolver {
    /// Create a resolver from backend configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            profile_table: config.profile_table.clone(),
            role_column: config.role_column.clone(),
            warned_roles: DashSet::new(),
        })
    }

    /// Parse a raw role string from a profile row
    ///
    /// A typo'd role in a profile row is a deployment defect; report it once
    /// per distinct string, deny on every use.
    fn parse_role(&self, raw: &str) -> Option<Role> {
        match raw.parse() {
            Ok(role) => Some(role),
            Err(_) => {
                if self.warned_roles.insert(raw.to_string()) {
                    warn!(role = raw, "Unrecognized role in profile; treating as absent");
                }
                None
            }
        }
    }
}

#[async_trait]
impl RoleResolver for BackendRoleResolver {
    async fn resolve(&self, user_id: Uuid, token: &str) -> Result<Option<Role>> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.profile_table);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .query(&[
                ("id", format!("eq.{}", user_id)),
                ("select", self.role_column.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream(format!(
                "profile query returned {}: {}",
                status, body
            )));
        }

        let rows: Vec<serde_json::Value> = response.json().await?;
        let Some(row) = rows.first() else {
            debug!(user_id = %user_id, "No profile row for user");
            return Ok(None);
        };

        let role = row
            .get(self.role_column.as_str())
            .and_then(|v| v.as_str())
            .and_then(|raw| self.parse_role(raw));

        debug!(user_id = %user_id, role = ?role, "Resolved role from profile");
        Ok(role)
    }
}

/// Caches resolved roles keyed by user and token fingerprint
///
/// The key starts with the user ID so per-user invalidation can match on
/// prefix. Two sessions of the same user hash to different keys; both fall
/// to one `invalidate_user` call.
pub struct CachingRoleResolver {
    inner: Arc<dyn RoleResolver>,
    cache: Cache<String, Option<Role>>,
}

impl CachingRoleResolver {
    /// Wrap a resolver with a TTL cache
    pub fn new(inner: Arc<dyn RoleResolver>, config: &RoleCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(Duration::from_secs(config.ttl))
            .support_invalidation_closures()
            .build();

        Self { inner, cache }
    }

    fn cache_key(user_id: Uuid, token: &str) -> String {
        format!("{}:{}", user_id, token_fingerprint(token))
    }

    /// Drop every cached entry for one user, across all their sessions
    pub fn invalidate_user(&self, user_id: Uuid) {
        let prefix = format!("{}:", user_id);
        if let Err(e) = self
            .cache
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            warn!(user_id = %user_id, error = %e, "Role cache invalidation failed");
        }
    }
}

#[async_trait]
impl RoleResolver for CachingRoleResolver {
    async fn resolve(&self, user_id: Uuid, token: &str) -> Result<Option<Role>> {
        let key = Self::cache_key(user_id, token);

        if let Some(cached) = self.cache.get(&key).await {
            debug!(user_id = %user_id, "Role cache hit");
            return Ok(cached);
        }

        // Errors are never cached; absent roles are, until invalidated
        let role = self.inner.resolve(user_id, token).await?;
        self.cache.insert(key, role).await;
        Ok(role)
    }
}
