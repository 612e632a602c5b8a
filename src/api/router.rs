use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::v1;

/// Create a minimal router without state (health probes only)
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::query::QueryFilter;
    use crate::domain::reservation::Reservation;
    use crate::domain::storage::DocumentStore;
    use crate::domain::table::{Chair, Table};
    use crate::domain::team::{Team, TeamId};
    use crate::domain::user::{User, UserId};
    use crate::infrastructure::auth::{JwtService, TokenIssuer};
    use crate::infrastructure::email::TracingEmailSender;
    use crate::infrastructure::reservation::ReservationService;
    use crate::infrastructure::storage::InMemoryStore;
    use crate::infrastructure::table::TableService;
    use crate::infrastructure::team::TeamService;
    use crate::infrastructure::user::{Argon2Hasher, UserService};

    struct TestHarness {
        state: AppState,
        users: Arc<InMemoryStore<User>>,
        token_issuer: Arc<JwtService>,
    }

    fn harness() -> TestHarness {
        let users = Arc::new(InMemoryStore::<User>::new().with_unique_field("email"));
        let token_issuer = Arc::new(JwtService::with_default_config());

        let user_service = Arc::new(UserService::new(
            users.clone(),
            Arc::new(Argon2Hasher::new()),
            Arc::new(TracingEmailSender::new()),
        ));
        let team_service = Arc::new(TeamService::new(Arc::new(InMemoryStore::<Team>::new())));
        let table_service = Arc::new(TableService::new(
            Arc::new(InMemoryStore::<Table>::new()),
            Arc::new(InMemoryStore::<Chair>::new()),
        ));
        let reservation_service = Arc::new(ReservationService::new(Arc::new(InMemoryStore::<
            Reservation,
        >::new())));

        let state = AppState::new(
            user_service,
            team_service,
            table_service,
            reservation_service,
            token_issuer.clone(),
            None,
        );

        TestHarness {
            state,
            users,
            token_issuer,
        }
    }

    async fn seed_user(harness: &TestHarness, id: &str, is_admin: bool) -> String {
        let mut user = User::invited(
            UserId::new(id).unwrap(),
            format!("{}@example.com", id),
            "Test",
            "User",
            TeamId::new("team-1").unwrap(),
            is_admin,
        );
        user.accept(None);

        let token = harness.token_issuer.issue(&user).unwrap();
        harness.users.create(user).await.unwrap();

        token
    }

    fn invite_request(token: &str, email: &str) -> Request<Body> {
        let body = json!({
            "email": email,
            "first_name": "Grace",
            "last_name": "Hopper",
            "team_id": "team-1"
        });

        Request::builder()
            .method("POST")
            .uri("/v1/auth/invite")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let router = create_router();

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let harness = harness();
        let router = create_router_with_state(harness.state);

        let response = router
            .oneshot(Request::get("/v1/users/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_route_rejects_regular_user() {
        let harness = harness();
        let token = seed_user(&harness, "user-1", false).await;
        let router = create_router_with_state(harness.state);

        let response = router
            .oneshot(invite_request(&token, "newcomer@example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invite_lifecycle_created_resent_conflict() {
        let harness = harness();
        let token = seed_user(&harness, "admin-1", true).await;
        let router = create_router_with_state(harness.state);

        // First invite creates a pending user
        let response = router
            .clone()
            .oneshot(invite_request(&token, "grace@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Second invite resends to the still-pending user
        let response = router
            .clone()
            .oneshot(invite_request(&token, "grace@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        // Acceptance closes the invitation
        let mut invited = harness
            .users
            .find_one(&QueryFilter::new().with_eq("email", "grace@example.com"))
            .await
            .unwrap()
            .unwrap();
        invited.accept(None);
        harness.users.update(invited).await.unwrap();

        let response = router
            .oneshot(invite_request(&token, "grace@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_me_returns_user_without_password_hash() {
        let harness = harness();
        let token = seed_user(&harness, "user-2", false).await;
        let router = create_router_with_state(harness.state);

        let response = router
            .oneshot(
                Request::get("/v1/users/me")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["data"]["id"], "user-2");
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_table_create_and_chairs_fan_out() {
        let harness = harness();
        let token = seed_user(&harness, "admin-2", true).await;
        let router = create_router_with_state(harness.state);

        let body = json!({"team_id": "team-1", "chairs_count": 3});
        let response = router
            .clone()
            .oneshot(
                Request::post("/v1/tables")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created: Value = serde_json::from_slice(&bytes).unwrap();
        let table_id = created["data"]["id"].as_str().unwrap().to_string();

        let response = router
            .oneshot(
                Request::get(format!("/v1/tables/{}/chairs", table_id))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let chairs: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(chairs["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let harness = harness();
        let token = seed_user(&harness, "admin-3", true).await;
        let router = create_router_with_state(harness.state);

        let body = json!({"team_id": "team-1", "chairs_count": 31});
        let response = router
            .oneshot(
                Request::post("/v1/tables")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
