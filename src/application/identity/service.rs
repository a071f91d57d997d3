//! Account management: signup, login and profile.
//!
//! HTTP handlers stay thin wrappers that delegate here.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, NewUser, ProfileUpdate, RepositoryProvider, User};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password, DEFAULT_COST};

/// Authentication result returned after signup or login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost: DEFAULT_COST,
        }
    }

    /// Lower costs are only meant for tests.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    fn issue(&self, user: User) -> DomainResult<AuthResult> {
        let token = create_token(&user.id, &user.email, &user.name, &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn signup(&self, email: &str, name: &str, password: &str) -> DomainResult<AuthResult> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Name must not be empty".into()));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }

        let password_hash = hash_password(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repos
            .users()
            .create(NewUser {
                email,
                name: name.trim().to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "New user registered");
        self.issue(user)
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    // ── Profile ─────────────────────────────────────────────────

    pub async fn get_profile(&self, user_id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))
    }

    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> DomainResult<User> {
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::Validation("Name must not be empty".into()));
        }
        self.repos
            .users()
            .update_profile(user_id, update)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))
    }
}
