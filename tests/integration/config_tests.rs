//! Configuration loading integration tests
//!
//! Load real YAML files through the same paths the binary uses, including
//! the shipped example file.

#[cfg(test)]
mod tests {
    use coachdesk_rs::config::GatewayConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    // ==================== Loading ====================

    /// The shipped example configuration stays loadable and valid
    #[tokio::test]
    async fn test_example_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/gateway.yaml.example");
        let config = GatewayConfig::from_file(path).await.unwrap();

        assert_eq!(config.backend.profile_table, "profiles");
        assert_eq!(config.session.audience, "authenticated");
        assert!(config.session.sign_in_path.starts_with('/'));
    }

    /// A partial file is completed from defaults
    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let file = write_config(
            r#"
backend:
  url: "https://project.supabase.co"
  anon_key: "anon-key"
session:
  jwt_secret: "0123456789abcdef0123456789abcdef"
"#,
        );

        let config = GatewayConfig::load(file.path()).await.unwrap();
        assert_eq!(config.backend.profile_table, "profiles");
        assert_eq!(config.backend.role_column, "role");
        assert_eq!(config.session.role_cache.ttl, 300);
        assert_eq!(config.session.leeway, 30);
    }

    /// An unreadable file is a configuration error, not a panic
    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = GatewayConfig::from_file("/nonexistent/gateway.yaml")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    // ==================== Validation ====================

    /// Credentialed CORS cannot be combined with an open origin list
    #[tokio::test]
    async fn test_rejects_cors_credentials_with_open_origins() {
        let file = write_config(
            r#"
server:
  cors:
    allow_credentials: true
backend:
  url: "https://project.supabase.co"
  anon_key: "anon-key"
session:
  jwt_secret: "0123456789abcdef0123456789abcdef"
"#,
        );

        let err = GatewayConfig::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Server config error"));
        assert!(err.to_string().contains("credentials"));
    }

    /// Placeholder secrets are rejected by name
    #[tokio::test]
    async fn test_rejects_placeholder_secret() {
        let file = write_config(
            r#"
backend:
  url: "https://project.supabase.co"
  anon_key: "anon-key"
session:
  jwt_secret: "change-me"
"#,
        );

        let err = GatewayConfig::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    /// Leeway wide enough to resurrect expired tokens is rejected
    #[tokio::test]
    async fn test_rejects_excessive_leeway() {
        let file = write_config(
            r#"
backend:
  url: "https://project.supabase.co"
  anon_key: "anon-key"
session:
  jwt_secret: "0123456789abcdef0123456789abcdef"
  leeway: 600
"#,
        );

        let err = GatewayConfig::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Leeway"));
    }

    /// Port 0 is rejected before the bind ever happens
    #[tokio::test]
    async fn test_rejects_port_zero() {
        let file = write_config(
            r#"
server:
  port: 0
backend:
  url: "https://project.supabase.co"
  anon_key: "anon-key"
session:
  jwt_secret: "0123456789abcdef0123456789abcdef"
"#,
        );

        let err = GatewayConfig::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Port"));
    }

    /// A backend URL without a scheme is rejected with the reason
    #[tokio::test]
    async fn test_rejects_unparseable_backend_url() {
        let file = write_config(
            r#"
backend:
  url: "project.supabase.co"
  anon_key: "anon-key"
session:
  jwt_secret: "0123456789abcdef0123456789abcdef"
"#,
        );

        let err = GatewayConfig::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Backend config error"));
    }

    // ==================== Serialization ====================

    /// A configuration survives a trip through its own YAML serializer
    #[test]
    fn test_yaml_round_trip() {
        let mut config = GatewayConfig::default();
        config.server.port = 9999;
        config.backend.url = "https://project.supabase.co".to_string();
        config.session.jwt_secret = "0123456789abcdef0123456789abcdef".to_string();

        let yaml = config.to_yaml().unwrap();
        let parsed: GatewayConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.server.port, 9999);
        assert_eq!(parsed.backend.url, config.backend.url);
        assert_eq!(parsed.session.jwt_secret, config.session.jwt_secret);
        assert_eq!(parsed.session.role_cache.capacity, config.session.role_cache.capacity);
    }
}
