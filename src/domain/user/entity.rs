//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{UserValidationError, validate_user_id};
use crate::domain::storage::{Document, DocumentKey};
use crate::domain::team::TeamId;

/// User identifier - alphanumeric + hyphens, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DocumentKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// User account.
///
/// Users enter the system through an admin invitation (`accepted` false) and
/// become active members once they accept through sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
    team_id: TeamId,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<String>,
    is_admin: bool,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_picture: Option<String>,
    /// Argon2 hash for local login; present only once the user sets one.
    /// Stored with the document but stripped from API output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly-invited user (accepted = false)
    pub fn invited(
        id: UserId,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        team_id: TeamId,
        is_admin: bool,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            birthday: None,
            team_id,
            position: None,
            is_admin,
            accepted: false,
            profile_picture: None,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }

    pub fn with_birthday(mut self, birthday: Option<String>) -> Self {
        self.birthday = birthday;
        self
    }

    pub fn with_position(mut self, position: Option<String>) -> Self {
        self.position = position;
        self
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn birthday(&self) -> Option<&str> {
        self.birthday.as_deref()
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn profile_picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Mark the invitation accepted, recording the sign-in profile picture
    pub fn accept(&mut self, profile_picture: Option<String>) {
        self.accepted = true;
        if profile_picture.is_some() {
            self.profile_picture = profile_picture;
        }
        self.touch();
    }

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = Some(password_hash.into());
        self.touch();
    }

    /// Apply a partial update; absent fields are left untouched
    pub fn apply_update(&mut self, update: UserUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(birthday) = update.birthday {
            self.birthday = Some(birthday);
        }
        if let Some(team_id) = update.team_id {
            self.team_id = team_id;
        }
        if let Some(position) = update.position {
            self.position = Some(position);
        }
        if let Some(is_admin) = update.is_admin {
            self.is_admin = is_admin;
        }
        self.touch();
    }

    /// Serialized form safe to expose over the API (no password hash)
    pub fn to_public(&self) -> Value {
        let mut document = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut document {
            map.remove("password_hash");
        }
        document
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    const COLLECTION: &'static str = "users";
}

/// Partial update of user properties; `None` means "leave unchanged"
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub team_id: Option<TeamId>,
    pub position: Option<String>,
    pub is_admin: Option<bool>,
}
