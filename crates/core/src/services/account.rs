//! Account service.
//!
//! Registration, login, and token resolution. Login failures for an unknown
//! username and a wrong password are indistinguishable to the caller, so the
//! endpoint cannot be used to enumerate usernames.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use pictor_common::{AppError, AppResult, IdGenerator, UserView};
use pictor_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::projection::Projector;

/// Input for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    /// Unique username.
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    /// Plaintext password; stored only as an Argon2 hash.
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Display name.
    #[validate(length(max = 256))]
    pub name: Option<String>,
}

/// A signed-in user and their bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    /// The signed-in user.
    pub user: user::Model,
    /// Opaque bearer token for subsequent requests.
    pub token: String,
}

/// Account service for business logic.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    projector: Projector,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(user_repo: UserRepository, projector: Projector) -> Self {
        Self {
            user_repo,
            projector,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account and sign it in.
    pub async fn register(&self, input: RegisterInput) -> AppResult<Session> {
        input.validate()?;

        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let token = self.id_gen.generate_token();

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username.clone()),
            username_lower: Set(input.username.to_lowercase()),
            name: Set(input.name),
            password_hash: Set(password_hash),
            token: Set(Some(token.clone())),
            ..Default::default()
        };
        let user = self.user_repo.create(model).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Account registered");

        Ok(Session { user, token })
    }

    /// Sign in with a username and password, rotating the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = self.id_gen.generate_token();
        let mut active: user::ActiveModel = user.into();
        active.token = Set(Some(token.clone()));
        active.updated_at = Set(Some(Utc::now().into()));
        let user = self.user_repo.update(active).await?;

        Ok(Session { user, token })
    }

    /// Sign out: clear the bearer token so it stops resolving.
    pub async fn logout(&self, user: user::Model) -> AppResult<()> {
        let user_id = user.id.clone();
        let mut active: user::ActiveModel = user.into();
        active.token = Set(None);
        active.updated_at = Set(Some(Utc::now().into()));
        self.user_repo.update(active).await?;

        tracing::debug!(user_id = %user_id, "Signed out");
        Ok(())
    }

    /// Resolve a bearer token to its user.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Get a user's profile as seen by the viewer.
    pub async fn get_info(&self, viewer_id: &str, username: &str) -> AppResult<UserView> {
        let user = self.user_repo.get_by_username(username).await?;
        self.projector.user_view(viewer_id, &user).await
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
