//! Mock profile backend
//!
//! Wiremock stand-in for the managed backend's REST surface. Profile
//! queries land on `/rest/v1/{table}` carrying the anonymous key and the
//! caller's own bearer token.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock profile backend serving role rows
pub struct ProfileBackend {
    server: MockServer,
}

impl ProfileBackend {
    /// Start a mock backend with no profiles mounted
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to put in `BackendConfig::url`
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Serve a profile row with the given role string for the given user
    pub async fn mount_profile(&self, user_id: Uuid, role: &str) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .and(query_param("id", format!("eq.{}", user_id)))
            .and(query_param("select", "role"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "role": role }])))
            .mount(&self.server)
            .await;
    }

    /// Serve an empty result set for the given user
    pub async fn mount_missing_profile(&self, user_id: Uuid) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .and(query_param("id", format!("eq.{}", user_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&self.server)
            .await;
    }

    /// Serve a server error for every profile query
    pub async fn mount_outage(&self) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&self.server)
            .await;
    }

    /// Access the underlying server for custom expectations
    pub fn server(&self) -> &MockServer {
        &self.server
    }
}
