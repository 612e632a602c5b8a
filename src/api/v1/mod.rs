//! Versioned API endpoints

pub mod auth;
pub mod reservations;
pub mod tables;
pub mod teams;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use super::state::AppState;

/// Create the v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/google", post(auth::google_sign_in))
        .route("/auth/me", get(auth::me))
        .route("/auth/invite", post(auth::invite))
        .route("/users", get(users::list_team_users))
        .route("/users/all", get(users::list_all_users))
        .route("/users/me", get(users::get_me))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/teams", post(teams::create_team).get(teams::list_teams))
        .route(
            "/teams/{team_id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route(
            "/tables",
            post(tables::create_table).get(tables::list_tables),
        )
        .route(
            "/tables/{table_id}",
            get(tables::get_table)
                .put(tables::update_table)
                .delete(tables::delete_table),
        )
        .route("/tables/{table_id}/chairs", get(tables::get_table_chairs))
        .route(
            "/reservations",
            post(reservations::create_reservation).get(reservations::list_reservations),
        )
        .route(
            "/reservations/{reservation_id}",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .delete(reservations::delete_reservation),
        )
}
