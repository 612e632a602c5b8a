//! Table and chair endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use crate::api::middleware::{RequireAdmin, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json, ListResponse, MessageResponse};
use crate::domain::query::QueryParams;
use crate::domain::table::{Chair, Table};

/// Request to create a table with its chairs
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTableApiRequest {
    pub team_id: String,
    #[validate(range(min = 1, max = 30))]
    pub chairs_count: u32,
}

/// Request to resize a table's chair set
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTableApiRequest {
    #[validate(range(min = 1, max = 30))]
    pub chairs_count: u32,
}

/// POST /v1/tables
pub async fn create_table(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<CreateTableApiRequest>,
) -> Result<(StatusCode, Json<DataResponse<Table>>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(
        team_id = %request.team_id,
        chairs_count = request.chairs_count,
        "Creating table"
    );

    let table = state
        .table_service
        .create(&request.team_id, request.chairs_count)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(table))))
}

/// GET /v1/tables
///
/// Admins see every table; regular users only their team's tables.
pub async fn list_tables(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
    let params = QueryParams::from_pairs(pairs);
    let team_scope = (!user.is_admin()).then(|| user.team_id().clone());

    let page = state
        .table_service
        .query(&params, team_scope.as_ref())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListResponse::from(page)))
}

/// GET /v1/tables/{table_id}
pub async fn get_table(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(table_id): Path<String>,
) -> Result<Json<DataResponse<Table>>, ApiError> {
    let table = state
        .table_service
        .get(&table_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Table '{}' not found", table_id)))?;

    Ok(Json(DataResponse::new(table)))
}

/// GET /v1/tables/{table_id}/chairs
pub async fn get_table_chairs(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(table_id): Path<String>,
) -> Result<Json<DataResponse<Vec<Chair>>>, ApiError> {
    let chairs = state
        .table_service
        .chairs(&table_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataResponse::new(chairs)))
}

/// PUT /v1/tables/{table_id}
pub async fn update_table(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(table_id): Path<String>,
    Json(request): Json<UpdateTableApiRequest>,
) -> Result<Json<DataResponse<Table>>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(table_id = %table_id, chairs_count = request.chairs_count, "Resizing table");

    let table = state
        .table_service
        .resize(&table_id, request.chairs_count)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataResponse::new(table)))
}

/// DELETE /v1/tables/{table_id}
pub async fn delete_table(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(table_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .table_service
        .delete(&table_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "Table '{}' not found",
            table_id
        )));
    }

    Ok(Json(MessageResponse::new("Table was deleted")))
}
