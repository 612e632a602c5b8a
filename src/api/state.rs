//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::{IdTokenVerifier, TokenIssuer};
use crate::infrastructure::reservation::ReservationService;
use crate::infrastructure::table::TableService;
use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::UserService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub team_service: Arc<TeamService>,
    pub table_service: Arc<TableService>,
    pub reservation_service: Arc<ReservationService>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    /// Google sign-in is disabled when no verifier is configured
    pub google_verifier: Option<Arc<dyn IdTokenVerifier>>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        team_service: Arc<TeamService>,
        table_service: Arc<TableService>,
        reservation_service: Arc<ReservationService>,
        token_issuer: Arc<dyn TokenIssuer>,
        google_verifier: Option<Arc<dyn IdTokenVerifier>>,
    ) -> Self {
        Self {
            user_service,
            team_service,
            table_service,
            reservation_service,
            token_issuer,
            google_verifier,
        }
    }
}
