//! Booking backend
//!
//! Multi-tenant booking and reservation REST API:
//! - Teams, users with invitation-based onboarding
//! - Tables with fanned-out chairs, reservations with time windows
//! - Local (email/password) and Google sign-in issuing JWT session tokens
//! - In-memory or PostgreSQL JSONB document storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::reservation::Reservation;
use domain::storage::DocumentStore;
use domain::table::{Chair, Table};
use domain::team::Team;
use domain::user::User;
use infrastructure::auth::{
    GoogleAuthConfig, GoogleTokenVerifier, IdTokenVerifier, JwtConfig, JwtService, TokenIssuer,
};
use infrastructure::email::TracingEmailSender;
use infrastructure::reservation::ReservationService;
use infrastructure::storage::{InMemoryStore, PostgresConfig, PostgresStore, connect_pool};
use infrastructure::table::TableService;
use infrastructure::team::TeamService;
use infrastructure::user::{Argon2Hasher, UserService};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let token_issuer = create_token_issuer(config);
    let google_verifier = create_google_verifier(config);

    let use_postgres = config.storage.backend.eq_ignore_ascii_case("postgres");
    info!(
        backend = %config.storage.backend,
        "Initializing storage backend"
    );

    let (users, teams, tables, chairs, reservations): (
        Arc<dyn DocumentStore<User>>,
        Arc<dyn DocumentStore<Team>>,
        Arc<dyn DocumentStore<Table>>,
        Arc<dyn DocumentStore<Chair>>,
        Arc<dyn DocumentStore<Reservation>>,
    ) = if use_postgres {
        let database_url = config
            .storage
            .database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL is required for the postgres storage backend")
            })?;

        info!("Connecting to PostgreSQL...");
        let pool = connect_pool(&PostgresConfig::new(database_url)).await?;
        info!("PostgreSQL connection established");

        let users = PostgresStore::<User>::new(pool.clone());
        let teams = PostgresStore::<Team>::new(pool.clone());
        let tables = PostgresStore::<Table>::new(pool.clone());
        let chairs = PostgresStore::<Chair>::new(pool.clone());
        let reservations = PostgresStore::<Reservation>::new(pool);

        users.ensure_table().await?;
        teams.ensure_table().await?;
        tables.ensure_table().await?;
        chairs.ensure_table().await?;
        reservations.ensure_table().await?;

        // Invite races on the same email resolve to Conflict
        users.ensure_unique_field_index("email").await?;

        (
            Arc::new(users),
            Arc::new(teams),
            Arc::new(tables),
            Arc::new(chairs),
            Arc::new(reservations),
        )
    } else {
        (
            Arc::new(InMemoryStore::<User>::new().with_unique_field("email")),
            Arc::new(InMemoryStore::<Team>::new()),
            Arc::new(InMemoryStore::<Table>::new()),
            Arc::new(InMemoryStore::<Chair>::new()),
            Arc::new(InMemoryStore::<Reservation>::new()),
        )
    };

    let user_service = Arc::new(UserService::new(
        users,
        Arc::new(Argon2Hasher::new()),
        Arc::new(TracingEmailSender::new()),
    ));
    let team_service = Arc::new(TeamService::new(teams));
    let table_service = Arc::new(TableService::new(tables, chairs));
    let reservation_service = Arc::new(ReservationService::new(reservations));

    Ok(AppState::new(
        user_service,
        team_service,
        table_service,
        reservation_service,
        token_issuer,
        google_verifier,
    ))
}

fn create_token_issuer(config: &AppConfig) -> Arc<dyn TokenIssuer> {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok());

    let jwt_config = match secret {
        Some(secret) => JwtConfig::new(secret, config.auth.jwt_expiration_hours as u64),
        None => JwtConfig::default(),
    };

    Arc::new(JwtService::new(jwt_config))
}

fn create_google_verifier(config: &AppConfig) -> Option<Arc<dyn IdTokenVerifier>> {
    config.auth.google_client_id.as_ref().map(|client_id| {
        info!("Google sign-in enabled");
        Arc::new(GoogleTokenVerifier::new(GoogleAuthConfig::new(
            client_id.clone(),
        )))
            as Arc<dyn IdTokenVerifier>
    })
}
