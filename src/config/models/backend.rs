//! Data backend configuration
//!
//! The gateway fronts a managed backend-as-a-service (hosted Postgres
//! with auto-generated REST access). Role lookups hit its REST surface
//! with the anonymous key plus the caller's own bearer token, so row
//! level security still applies to the query.

use super::*;
use serde::{Deserialize, Serialize};

/// Managed data backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend project
    #[serde(default)]
    pub url: String,
    /// Anonymous API key sent as the apikey header
    #[serde(default)]
    pub anon_key: String,
    /// Table holding user profiles
    #[serde(default = "default_profile_table")]
    pub profile_table: String,
    /// Column holding the user's role tag
    #[serde(default = "default_role_column")]
    pub role_column: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            profile_table: default_profile_table(),
            role_column: default_role_column(),
            timeout: default_timeout(),
        }
    }
}

impl BackendConfig {
    /// Merge backend configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.url.is_empty() {
            self.url = other.url;
        }
        if !other.anon_key.is_empty() {
            self.anon_key = other.anon_key;
        }
        if other.profile_table != default_profile_table() {
            self.profile_table = other.profile_table;
        }
        if other.role_column != default_role_column() {
            self.role_column = other.role_column;
        }
        if other.timeout != default_timeout() {
            self.timeout = other.timeout;
        }
        self
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Backend URL is required".to_string());
        }

        let parsed = url::Url::parse(&self.url)
            .map_err(|e| format!("Backend URL is not a valid URL: {}", e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!(
                "Backend URL must use http or https, got '{}'",
                parsed.scheme()
            ));
        }

        if self.anon_key.is_empty() {
            return Err("Backend anonymous key is required".to_string());
        }

        if self.profile_table.is_empty() {
            return Err("Profile table name cannot be empty".to_string());
        }

        if self.role_column.is_empty() {
            return Err("Role column name cannot be empty".to_string());
        }

        if self.timeout == 0 {
            return Err("Timeout cannot be 0".to_string());
        }

        Ok(())
    }
}

fn default_profile_table() -> String {
    "profiles".to_string()
}

fn default_role_column() -> String {
    "role".to_string()
}
