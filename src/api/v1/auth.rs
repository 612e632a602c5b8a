//! Authentication endpoints: login, Google sign-in, invitations

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use validator::Validate;

use crate::api::middleware::{RequireAdmin, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json};
use crate::infrastructure::user::{InviteOutcome, InviteUserRequest};

/// Request to log in with email and password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to sign in with a Google ID token
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GoogleSignInRequest {
    #[validate(length(min = 1))]
    pub id_token: String,
}

/// Session token plus the authenticated user
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: Value,
}

/// Request to invite a user into a team
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteApiRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    pub team_id: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// POST /v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(email = %request.email, "Login attempt");

    let user = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await
        .map_err(ApiError::from)?;

    let token = state.token_issuer.issue(&user).map_err(ApiError::from)?;

    info!(user_id = %user.id(), "User logged in");

    Ok(Json(SessionResponse {
        token,
        user: user.to_public(),
    }))
}

/// POST /v1/auth/google
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(request): Json<GoogleSignInRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let verifier = state
        .google_verifier
        .as_ref()
        .ok_or_else(|| ApiError::internal("Google sign-in is not configured"))?;

    let identity = verifier
        .verify(&request.id_token)
        .await
        .map_err(ApiError::from)?;

    let user = state
        .user_service
        .google_sign_in(identity)
        .await
        .map_err(ApiError::from)?;

    let token = state.token_issuer.issue(&user).map_err(ApiError::from)?;

    info!(user_id = %user.id(), "User signed in with Google");

    Ok(Json(SessionResponse {
        token,
        user: user.to_public(),
    }))
}

/// GET /v1/auth/me
pub async fn me(RequireUser(user): RequireUser) -> Json<DataResponse<Value>> {
    Json(DataResponse::new(user.to_public()))
}

/// POST /v1/auth/invite
pub async fn invite(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<InviteApiRequest>,
) -> Result<(StatusCode, Json<DataResponse<Value>>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(email = %request.email, "Inviting user");

    let outcome = state
        .user_service
        .invite(InviteUserRequest {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            birthday: request.birthday,
            team_id: request.team_id,
            position: request.position,
            is_admin: request.is_admin,
        })
        .await
        .map_err(ApiError::from)?;

    let status = match &outcome {
        InviteOutcome::Created(_) => StatusCode::CREATED,
        InviteOutcome::Resent(_) => StatusCode::ACCEPTED,
    };

    Ok((status, Json(DataResponse::new(outcome.user().to_public()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_deserialization() {
        let json = r#"{"email": "ada@example.com", "password": "secret"}"#;

        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.password, "secret");
    }

    #[test]
    fn test_login_request_rejects_malformed_email() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_invite_request_defaults() {
        let json = r#"{
            "email": "grace@example.com",
            "first_name": "Grace",
            "last_name": "Hopper",
            "team_id": "team-1"
        }"#;

        let request: InviteApiRequest = serde_json::from_str(json).unwrap();
        assert!(!request.is_admin);
        assert!(request.phone.is_none());
        assert!(request.position.is_none());
    }

    #[test]
    fn test_invite_request_validation() {
        let request = InviteApiRequest {
            email: "bad".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone: None,
            birthday: None,
            team_id: "team-1".to_string(),
            position: None,
            is_admin: false,
        };

        assert!(request.validate().is_err());
    }
}
