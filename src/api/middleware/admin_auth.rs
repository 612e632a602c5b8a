//! Admin authorization on top of user authentication

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

use super::user_auth::RequireUser;

/// Extractor that requires a valid JWT token belonging to an admin
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(ApiError::forbidden("Administrator access required"));
        }

        Ok(RequireAdmin(user))
    }
}
