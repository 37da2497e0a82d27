//! Session endpoint integration tests
//!
//! Cover the session inspection, refresh, and sign-out endpoints, plus the
//! navigation listing derived from the same permission table the guards use.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{self, StaticRoles, TokenFactory};
    use actix_web::http::header;
    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use coachdesk_rs::access::Role;
    use coachdesk_rs::auth::RoleResolver;
    use coachdesk_rs::server::AppState;
    use coachdesk_rs::server::routes;
    use coachdesk_rs::utils::error::Result;
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use uuid::Uuid;

    /// Role resolver that walks through a fixed sequence of answers,
    /// repeating the last one forever
    struct SequencedRoles {
        answers: Mutex<VecDeque<Option<Role>>>,
    }

    impl SequencedRoles {
        fn of(answers: Vec<Option<Role>>) -> Self {
            assert!(!answers.is_empty());
            Self {
                answers: Mutex::new(answers.into()),
            }
        }
    }

    #[async_trait]
    impl RoleResolver for SequencedRoles {
        async fn resolve(&self, _user_id: Uuid, _token: &str) -> Result<Option<Role>> {
            let mut answers = self.answers.lock().unwrap();
            if answers.len() > 1 {
                Ok(answers.pop_front().unwrap())
            } else {
                Ok(*answers.front().unwrap())
            }
        }
    }

    async fn api_request(
        state: &AppState,
        method: test::TestRequest,
        uri: &str,
        token: Option<&str>,
    ) -> (u16, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(routes::configure_routes),
        )
        .await;

        let mut req = method.uri(uri);
        if let Some(token) = token {
            req = req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)));
        }

        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    // ==================== Session Inspection ====================

    /// The session endpoint reports the user, role, and reachable modules
    #[actix_web::test]
    async fn test_session_reports_role_and_modules() {
        let user = Uuid::new_v4();
        let (config, state) = fixtures::app_state(StaticRoles::new().with(user, Role::Coach));
        let token = TokenFactory::for_user(&config, user);

        let (status, body) =
            api_request(&state, test::TestRequest::get(), "/api/v1/session", Some(&token)).await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["id"], user.to_string());
        assert_eq!(body["data"]["role"], "coach");
        assert_eq!(body["data"]["role_label"], "Coach");
        assert_eq!(
            body["data"]["accessible_modules"],
            serde_json::json!([
                "dashboard",
                "messaging",
                "formation",
                "clients",
                "calendrier",
                "notifications"
            ])
        );
    }

    /// The email claim is carried through to the session payload
    #[actix_web::test]
    async fn test_session_carries_email_claim() {
        let user = Uuid::new_v4();
        let (config, state) = fixtures::app_state(StaticRoles::new().with(user, Role::Manager));
        let token = TokenFactory::with_email(&config, user, "manager@example.com");

        let (status, body) =
            api_request(&state, test::TestRequest::get(), "/api/v1/session", Some(&token)).await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["user"]["email"], "manager@example.com");
    }

    /// Inspecting a session requires presenting one
    #[actix_web::test]
    async fn test_session_requires_authentication() {
        let (_, state) = fixtures::app_state(StaticRoles::new());

        let (status, body) =
            api_request(&state, test::TestRequest::get(), "/api/v1/session", None).await;

        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "AUTH_ERROR");
    }

    // ==================== Role Refresh ====================

    /// Refresh drops the cached role and picks up the new assignment
    #[actix_web::test]
    async fn test_refresh_picks_up_changed_role() {
        let user = Uuid::new_v4();
        let resolver = SequencedRoles::of(vec![Some(Role::Eleve), Some(Role::Admin)]);
        let (config, state) = fixtures::state_with_resolver(Arc::new(resolver));
        let token = TokenFactory::for_user(&config, user);

        let (status, body) =
            api_request(&state, test::TestRequest::get(), "/api/v1/session", Some(&token)).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["role"], "eleve");

        // Cache invalidation matches entries inserted strictly earlier
        tokio::time::sleep(Duration::from_millis(5)).await;

        let (status, body) = api_request(
            &state,
            test::TestRequest::post(),
            "/api/v1/session/refresh",
            Some(&token),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["role"], "admin");

        // The refreshed role governs subsequent module requests
        let (status, _) =
            api_request(&state, test::TestRequest::get(), "/api/v1/users", Some(&token)).await;
        assert_eq!(status, 200);
    }

    /// Refreshing without a token is an authentication error
    #[actix_web::test]
    async fn test_refresh_requires_token() {
        let (_, state) = fixtures::app_state(StaticRoles::new());

        let (status, body) = api_request(
            &state,
            test::TestRequest::post(),
            "/api/v1/session/refresh",
            None,
        )
        .await;

        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "AUTH_ERROR");
    }

    // ==================== Sign-out ====================

    /// Sign-out acknowledges and clears the live session
    #[actix_web::test]
    async fn test_sign_out_acknowledges() {
        let user = Uuid::new_v4();
        let (config, state) = fixtures::app_state(StaticRoles::new().with(user, Role::Coach));
        let token = TokenFactory::for_user(&config, user);

        let (status, _) =
            api_request(&state, test::TestRequest::get(), "/api/v1/dashboard", Some(&token)).await;
        assert_eq!(status, 200);

        let (status, body) = api_request(
            &state,
            test::TestRequest::post(),
            "/api/v1/session/sign-out",
            Some(&token),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["signed_out"], true);

        // Token revocation belongs to the backend; a replayed token that is
        // still valid re-establishes a session on the next request
        let (status, _) =
            api_request(&state, test::TestRequest::get(), "/api/v1/dashboard", Some(&token)).await;
        assert_eq!(status, 200);
    }

    // ==================== Navigation ====================

    /// Navigation lists exactly what the guards will admit, in order
    #[actix_web::test]
    async fn test_navigation_matches_guard_verdicts() {
        let user = Uuid::new_v4();
        let (config, state) = fixtures::app_state(StaticRoles::new().with(user, Role::Setter));
        let token = TokenFactory::for_user(&config, user);

        let (status, body) =
            api_request(&state, test::TestRequest::get(), "/api/v1/navigation", Some(&token)).await;

        assert_eq!(status, 200);
        let entries = body["data"].as_array().unwrap();
        let modules: Vec<&str> = entries
            .iter()
            .map(|e| e["module"].as_str().unwrap())
            .collect();
        assert_eq!(
            modules,
            vec!["dashboard", "messaging", "pipeline", "calendrier", "notifications"]
        );

        assert_eq!(entries[0]["label"], "Tableau de bord");
        assert_eq!(entries[0]["path"], "/dashboard");
    }

    /// Navigation is empty only behind authentication, never anonymous
    #[actix_web::test]
    async fn test_navigation_requires_authentication() {
        let (_, state) = fixtures::app_state(StaticRoles::new());

        let (status, body) =
            api_request(&state, test::TestRequest::get(), "/api/v1/navigation", None).await;

        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "AUTH_ERROR");
    }

    /// A signed-in user with no role gets an empty navigation, not an error
    #[actix_web::test]
    async fn test_navigation_empty_for_missing_role() {
        let user = Uuid::new_v4();
        let (config, state) = fixtures::app_state(StaticRoles::new());
        let token = TokenFactory::for_user(&config, user);

        let (status, body) =
            api_request(&state, test::TestRequest::get(), "/api/v1/navigation", Some(&token)).await;

        assert_eq!(status, 200);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }
}
