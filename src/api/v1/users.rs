//! User management endpoints

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::api::middleware::{RequireAdmin, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json, ListResponse, MessageResponse};
use crate::domain::query::QueryParams;
use crate::infrastructure::user::UpdateUserRequest;

/// Request to update a user; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserApiRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub team_id: Option<String>,
    pub position: Option<String>,
    pub is_admin: Option<bool>,
}

impl From<UpdateUserApiRequest> for UpdateUserRequest {
    fn from(request: UpdateUserApiRequest) -> Self {
        Self {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            birthday: request.birthday,
            team_id: request.team_id,
            position: request.position,
            is_admin: request.is_admin,
        }
    }
}

/// GET /v1/users
///
/// Lists users belonging to the caller's team.
pub async fn list_team_users(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
    let params = QueryParams::from_pairs(pairs);

    let page = state
        .user_service
        .query(&params, Some(user.team_id()))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListResponse::from(page)))
}

/// GET /v1/users/all
pub async fn list_all_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
    let params = QueryParams::from_pairs(pairs);

    let page = state
        .user_service
        .query(&params, None)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListResponse::from(page)))
}

/// GET /v1/users/me
pub async fn get_me(RequireUser(user): RequireUser) -> Json<DataResponse<Value>> {
    Json(DataResponse::new(user.to_public()))
}

/// GET /v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    let user = state
        .user_service
        .get(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    Ok(Json(DataResponse::new(user.to_public())))
}

/// PUT /v1/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    debug!(user_id = %user_id, "Updating user");

    let user = state
        .user_service
        .update(&user_id, request.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataResponse::new(user.to_public())))
}

/// DELETE /v1/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .user_service
        .delete(&user_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "User '{}' not found",
            user_id
        )));
    }

    Ok(Json(MessageResponse::new("User was deleted")))
}
