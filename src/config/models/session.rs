//! Session verification configuration

use serde::{Deserialize, Serialize};

/// Session verification and role cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to verify session token signatures
    #[serde(default)]
    pub jwt_secret: String,
    /// Expected token audience
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Clock skew tolerance when validating expiry, in seconds
    #[serde(default = "default_leeway")]
    pub leeway: u64,
    /// Where unauthenticated callers are redirected
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
    /// Role cache configuration
    #[serde(default)]
    pub role_cache: RoleCacheConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            audience: default_audience(),
            leeway: default_leeway(),
            sign_in_path: default_sign_in_path(),
            role_cache: RoleCacheConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Merge session configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.jwt_secret.is_empty() {
            self.jwt_secret = other.jwt_secret;
        }
        if other.audience != default_audience() {
            self.audience = other.audience;
        }
        if other.leeway != default_leeway() {
            self.leeway = other.leeway;
        }
        if other.sign_in_path != default_sign_in_path() {
            self.sign_in_path = other.sign_in_path;
        }
        self.role_cache = self.role_cache.merge(other.role_cache);
        self
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err("JWT secret must not use placeholder values".to_string());
        }

        if self.jwt_secret.len() < 32 {
            return Err(
                "JWT secret must be at least 32 characters long for security".to_string(),
            );
        }

        if self.audience.is_empty() {
            return Err("Token audience cannot be empty".to_string());
        }

        // Generous leeway turns expired tokens back into valid ones
        if self.leeway > 300 {
            return Err("Leeway should not exceed 300 seconds".to_string());
        }

        if !self.sign_in_path.starts_with('/') {
            return Err("Sign-in path must start with '/'".to_string());
        }

        self.role_cache.validate()
    }
}

/// Role cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCacheConfig {
    /// Entry time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl: u64,
    /// Maximum number of cached entries
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for RoleCacheConfig {
    fn default() -> Self {
        Self {
            ttl: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

impl RoleCacheConfig {
    /// Merge role cache configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.ttl != default_cache_ttl() {
            self.ttl = other.ttl;
        }
        if other.capacity != default_cache_capacity() {
            self.capacity = other.capacity;
        }
        self
    }

    /// Validate role cache configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl == 0 {
            return Err("Role cache TTL cannot be 0".to_string());
        }

        if self.capacity == 0 {
            return Err("Role cache capacity cannot be 0".to_string());
        }

        Ok(())
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}

fn default_leeway() -> u64 {
    30
}

fn default_sign_in_path() -> String {
    "/sign-in".to_string()
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_cache_capacity() -> u64 {
    10_000
}
