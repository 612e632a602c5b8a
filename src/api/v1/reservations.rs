//! Reservation endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::{RequireAdmin, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, DataResponse, Json, ListResponse, MessageResponse};
use crate::domain::query::QueryParams;
use crate::domain::reservation::Reservation;
use crate::infrastructure::reservation::{CreateReservationRequest, UpdateReservationRequest};

/// Request to create a reservation
///
/// `user_id` and `team_id` default to the caller's own; only admins may
/// reserve on behalf of someone else.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationApiRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    pub table_id: String,
    pub chair_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Request to update a reservation; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReservationApiRequest {
    pub table_id: Option<String>,
    pub chair_id: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// POST /v1/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateReservationApiRequest>,
) -> Result<(StatusCode, Json<DataResponse<Reservation>>), ApiError> {
    let on_behalf = request.user_id.is_some() || request.team_id.is_some();
    if on_behalf && !user.is_admin() {
        return Err(ApiError::forbidden(
            "Only administrators may reserve on behalf of another user",
        ));
    }

    let user_id = request
        .user_id
        .unwrap_or_else(|| user.id().as_str().to_string());
    let team_id = request
        .team_id
        .unwrap_or_else(|| user.team_id().as_str().to_string());

    debug!(user_id = %user_id, table_id = %request.table_id, "Creating reservation");

    let reservation = state
        .reservation_service
        .create(CreateReservationRequest {
            user_id,
            team_id,
            table_id: request.table_id,
            chair_id: request.chair_id,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(reservation))))
}

/// GET /v1/reservations
///
/// Supports `from`/`to` range narrowing on top of the query pipeline.
pub async fn list_reservations(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
    let params = QueryParams::from_pairs(pairs);

    let page = state
        .reservation_service
        .query(&params, None)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListResponse::from(page)))
}

/// GET /v1/reservations/{reservation_id}
pub async fn get_reservation(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(reservation_id): Path<String>,
) -> Result<Json<DataResponse<Reservation>>, ApiError> {
    let reservation = state
        .reservation_service
        .get(&reservation_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            ApiError::not_found(format!("Reservation '{}' not found", reservation_id))
        })?;

    Ok(Json(DataResponse::new(reservation)))
}

/// PUT /v1/reservations/{reservation_id}
pub async fn update_reservation(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(reservation_id): Path<String>,
    Json(request): Json<UpdateReservationApiRequest>,
) -> Result<(StatusCode, Json<DataResponse<Reservation>>), ApiError> {
    debug!(reservation_id = %reservation_id, "Updating reservation");

    let reservation = state
        .reservation_service
        .update(
            &reservation_id,
            UpdateReservationRequest {
                table_id: request.table_id,
                chair_id: request.chair_id,
                starts_at: request.starts_at,
                ends_at: request.ends_at,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::ACCEPTED, Json(DataResponse::new(reservation))))
}

/// DELETE /v1/reservations/{reservation_id}
pub async fn delete_reservation(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(reservation_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .reservation_service
        .delete(&reservation_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "Reservation '{}' not found",
            reservation_id
        )));
    }

    Ok(Json(MessageResponse::new("Reservation was deleted")))
}
