//! Team management endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json, ListResponse, MessageResponse};
use crate::domain::query::QueryParams;
use crate::domain::team::Team;

/// Request to create or rename a team
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TeamApiRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Team representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().as_str().to_string(),
            name: team.name().to_string(),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

/// POST /v1/teams
pub async fn create_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<TeamApiRequest>,
) -> Result<(StatusCode, Json<DataResponse<TeamResponse>>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(name = %request.name, "Creating team");

    let team = state
        .team_service
        .create(&request.name)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(TeamResponse::from(&team))),
    ))
}

/// GET /v1/teams
pub async fn list_teams(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
    let params = QueryParams::from_pairs(pairs);

    let page = state
        .team_service
        .query(&params)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListResponse::from(page)))
}

/// GET /v1/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(team_id): Path<String>,
) -> Result<Json<DataResponse<TeamResponse>>, ApiError> {
    let team = state
        .team_service
        .get(&team_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(DataResponse::new(TeamResponse::from(&team))))
}

/// PUT /v1/teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(team_id): Path<String>,
    Json(request): Json<TeamApiRequest>,
) -> Result<Json<DataResponse<TeamResponse>>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let team = state
        .team_service
        .rename(&team_id, &request.name)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataResponse::new(TeamResponse::from(&team))))
}

/// DELETE /v1/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(team_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .team_service
        .delete(&team_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "Team '{}' not found",
            team_id
        )));
    }

    Ok(Json(MessageResponse::new("Team was deleted")))
}
