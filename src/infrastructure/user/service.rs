//! User service: invitations, sign-in and user management

use std::sync::Arc;

use tracing::warn;

use crate::domain::DomainError;
use crate::domain::query::{QueryFilter, QueryParams, QueryPlan};
use crate::domain::storage::DocumentStore;
use crate::domain::team::TeamId;
use crate::domain::user::{
    User, UserId, UserUpdate, validate_email, validate_name,
};
use crate::infrastructure::auth::GoogleIdentity;
use crate::infrastructure::email::EmailSender;
use crate::infrastructure::listing::{DocumentPage, run_query};

use super::password::PasswordHasher;

/// Properties carried by an invitation request
#[derive(Debug, Clone)]
pub struct InviteUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub team_id: String,
    pub position: Option<String>,
    pub is_admin: bool,
}

/// How an invitation request was resolved
#[derive(Debug, Clone)]
pub enum InviteOutcome {
    /// No record existed for the email; a pending user was created
    Created(User),
    /// A pending record existed; its properties were refreshed and the
    /// invitation email sent again
    Resent(User),
}

impl InviteOutcome {
    pub fn user(&self) -> &User {
        match self {
            Self::Created(user) | Self::Resent(user) => user,
        }
    }
}

/// Request for updating a user's profile
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub team_id: Option<String>,
    pub position: Option<String>,
    pub is_admin: Option<bool>,
}

/// User service over the document store
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn DocumentStore<User>>,
    hasher: Arc<dyn PasswordHasher>,
    email_sender: Arc<dyn EmailSender>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("store", &self.store)
            .finish()
    }
}

impl UserService {
    pub fn new(
        store: Arc<dyn DocumentStore<User>>,
        hasher: Arc<dyn PasswordHasher>,
        email_sender: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            store,
            hasher,
            email_sender,
        }
    }

    /// Resolve an invitation: create a pending user, resend to a pending
    /// one, or conflict when the invite was already accepted.
    pub async fn invite(&self, request: InviteUserRequest) -> Result<InviteOutcome, DomainError> {
        validate_email(&request.email)?;
        validate_name("first_name", &request.first_name)?;
        validate_name("last_name", &request.last_name)?;
        let team_id = TeamId::new(&request.team_id)?;

        let existing = self
            .store
            .find_one(&QueryFilter::new().with_eq("email", &request.email))
            .await?;

        let outcome = match existing {
            None => {
                let user = User::invited(
                    UserId::generate(),
                    &request.email,
                    &request.first_name,
                    &request.last_name,
                    team_id,
                    request.is_admin,
                )
                .with_phone(request.phone)
                .with_birthday(request.birthday)
                .with_position(request.position);

                // Concurrent invites for the same email race to this insert;
                // the unique email constraint turns the loser into a conflict.
                let user = self.store.create(user).await?;
                InviteOutcome::Created(user)
            }
            Some(user) if user.accepted() => {
                return Err(DomainError::conflict(format!(
                    "User '{}' has already accepted the invitation",
                    request.email
                )));
            }
            Some(mut user) => {
                user.apply_update(UserUpdate {
                    first_name: Some(request.first_name),
                    last_name: Some(request.last_name),
                    phone: request.phone,
                    birthday: request.birthday,
                    team_id: Some(team_id),
                    position: request.position,
                    is_admin: Some(request.is_admin),
                    ..Default::default()
                });

                let user = self.store.update(user).await?;
                InviteOutcome::Resent(user)
            }
        };

        // Delivery is best-effort: the write stands even if the email fails
        if let Err(error) = self.email_sender.send(outcome.user().email()).await {
            warn!(
                email = %outcome.user().email(),
                error = %error,
                "Failed to send invitation email"
            );
        }

        Ok(outcome)
    }

    /// Authenticate with email and password.
    ///
    /// Only accepted users may log in; every failure mode returns the same
    /// indistinct error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .store
            .find_one(&QueryFilter::new().with_eq("email", email))
            .await?
            .ok_or_else(|| DomainError::invalid_token("Invalid email or password"))?;

        if !user.accepted() {
            return Err(DomainError::invalid_token("Invalid email or password"));
        }

        let hash = user
            .password_hash()
            .ok_or_else(|| DomainError::invalid_token("Invalid email or password"))?;

        if !self.hasher.verify(password, hash) {
            return Err(DomainError::invalid_token("Invalid email or password"));
        }

        Ok(user)
    }

    /// Sign in with a verified Google identity.
    ///
    /// Only invited emails may enter; a first successful sign-in accepts the
    /// invitation and records the Google profile picture.
    pub async fn google_sign_in(&self, identity: GoogleIdentity) -> Result<User, DomainError> {
        let mut user = self
            .store
            .find_one(&QueryFilter::new().with_eq("email", &identity.email))
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("No invitation found for '{}'", identity.email))
            })?;

        user.accept(identity.picture);
        self.store.update(user).await
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.store.get(&user_id).await
    }

    /// Run the query pipeline over users, optionally scoped to one team.
    ///
    /// Password hashes never leave the service, regardless of projection.
    pub async fn query(
        &self,
        params: &QueryParams,
        team_scope: Option<&TeamId>,
    ) -> Result<DocumentPage, DomainError> {
        let mut plan = QueryPlan::from_params(params);
        if let Some(team_id) = team_scope {
            plan = plan.scope_eq("team_id", team_id.as_str());
        }

        run_query(self.store.as_ref(), &plan, User::to_public).await
    }

    /// Update a user's profile
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if let Some(email) = &request.email {
            validate_email(email)?;
        }
        if let Some(first_name) = &request.first_name {
            validate_name("first_name", first_name)?;
        }
        if let Some(last_name) = &request.last_name {
            validate_name("last_name", last_name)?;
        }
        let team_id = request.team_id.as_deref().map(TeamId::new).transpose()?;

        let mut user = self
            .store
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.apply_update(UserUpdate {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            birthday: request.birthday,
            team_id,
            position: request.position,
            is_admin: request.is_admin,
        });

        self.store.update(user).await
    }

    /// Set a user's password for local login
    pub async fn set_password(&self, id: &str, password: &str) -> Result<User, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut user = self
            .store
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        let hash = self.hasher.hash(password)?;
        user.set_password_hash(hash);

        self.store.update(user).await
    }

    /// Delete a user
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.store.delete(&user_id).await
    }
}
