//! Role resolver integration tests
//!
//! Exercise the backend role resolver against a wiremock stand-in for the
//! managed backend's REST surface, then the whole gateway on top of it.

#[cfg(test)]
mod tests {
    use crate::common::backend::ProfileBackend;
    use crate::common::fixtures::{ConfigFactory, TokenFactory};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test, web};
    use coachdesk_rs::access::Role;
    use coachdesk_rs::auth::{AuthSystem, BackendRoleResolver, RoleResolver};
    use coachdesk_rs::server::{AppState, routes};
    use coachdesk_rs::utils::error::GatewayError;
    use serde_json::{Value, json};
    use uuid::Uuid;
    use wiremock::matchers::{bearer_token, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn resolver_for(backend: &ProfileBackend) -> BackendRoleResolver {
        let config = ConfigFactory::with_backend(&backend.url());
        BackendRoleResolver::new(&config.backend).unwrap()
    }

    // ==================== Resolver Behavior ====================

    /// The role comes from the profile row, never from the token
    #[tokio::test]
    async fn test_role_read_from_profile_row() {
        let backend = ProfileBackend::start().await;
        let user = Uuid::new_v4();
        backend.mount_profile(user, "coach").await;

        let resolver = resolver_for(&backend);
        let role = resolver.resolve(user, "session-token").await.unwrap();

        assert_eq!(role, Some(Role::Coach));
    }

    /// A user without a profile row resolves to no role
    #[tokio::test]
    async fn test_missing_profile_resolves_to_no_role() {
        let backend = ProfileBackend::start().await;
        let user = Uuid::new_v4();
        backend.mount_missing_profile(user).await;

        let resolver = resolver_for(&backend);
        let role = resolver.resolve(user, "session-token").await.unwrap();

        assert_eq!(role, None);
    }

    /// A role string outside the registry is treated as absent, not an error
    #[tokio::test]
    async fn test_unknown_role_string_resolves_to_no_role() {
        let backend = ProfileBackend::start().await;
        let user = Uuid::new_v4();
        backend.mount_profile(user, "director").await;

        let resolver = resolver_for(&backend);
        let role = resolver.resolve(user, "session-token").await.unwrap();

        assert_eq!(role, None);
    }

    /// Backend failures surface as errors for the caller to map
    #[tokio::test]
    async fn test_backend_error_is_surfaced() {
        let backend = ProfileBackend::start().await;
        backend.mount_outage().await;

        let resolver = resolver_for(&backend);
        let err = resolver
            .resolve(Uuid::new_v4(), "session-token")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Upstream(_)));
        assert!(err.to_string().contains("500"), "error was: {}", err);
    }

    /// Profile queries carry the anon key and the caller's own bearer token,
    /// so row level security applies to the lookup itself
    #[tokio::test]
    async fn test_backend_receives_credentials() {
        let backend = ProfileBackend::start().await;
        let user = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .and(header("apikey", "test-anon-key"))
            .and(bearer_token("caller-session-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "role": "admin" }])))
            .expect(1)
            .mount(backend.server())
            .await;

        let resolver = resolver_for(&backend);
        let role = resolver.resolve(user, "caller-session-token").await.unwrap();

        assert_eq!(role, Some(Role::Admin));
    }

    // ==================== Full Gateway ====================

    fn gateway_over(backend: &ProfileBackend) -> (coachdesk_rs::GatewayConfig, AppState) {
        let config = ConfigFactory::with_backend(&backend.url());
        let auth = AuthSystem::new(&config.session, &config.backend).unwrap();
        let state = AppState::new(config.clone(), auth);
        (config, state)
    }

    /// A real token plus a profile row admits the user end to end
    #[actix_web::test]
    async fn test_full_gateway_against_mock_backend() {
        let backend = ProfileBackend::start().await;
        let user = Uuid::new_v4();
        backend.mount_profile(user, "admin").await;

        let (config, state) = gateway_over(&backend);
        let token = TokenFactory::for_user(&config, user);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["role"], "admin");
    }

    /// Repeat requests ride the settled session; the backend is hit once
    #[actix_web::test]
    async fn test_profile_queried_once_per_session() {
        let backend = ProfileBackend::start().await;
        let user = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "role": "manager" }])))
            .expect(1)
            .mount(backend.server())
            .await;

        let (config, state) = gateway_over(&backend);
        let token = TokenFactory::for_user(&config, user);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(routes::configure_routes),
        )
        .await;

        for _ in 0..3 {
            let req = test::TestRequest::get()
                .uri("/api/v1/clients")
                .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 200);
        }
    }
}
