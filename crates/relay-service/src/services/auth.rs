//! Authentication service - registration, login, logout

use relay_common::{hash_password, validate_password_strength, verify_password, AppError};
use relay_core::{DomainError, User};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user account
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let username = request.username.trim().to_string();

        if !Self::is_valid_username(&username) {
            return Err(DomainError::InvalidUsername(username).into());
        }

        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(DomainError::UsernameTaken(username).into());
        }

        validate_password_strength(&request.password)?;
        let password_hash = hash_password(&request.password)?;

        let user = User::new(self.ctx.generate_id(), username);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        Ok(AuthResponse {
            user_id: user.id,
            username: user.username,
        })
    }

    /// Verify credentials and issue a session token
    ///
    /// Unknown usernames and wrong passwords return the same error so the
    /// response does not reveal which accounts exist.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<(String, AuthResponse)> {
        let username = request.username.trim();

        let Some(user) = self.ctx.user_repo().find_by_username(username).await? else {
            warn!("Login failed: unknown username");
            return Err(AppError::InvalidCredentials.into());
        };

        let Some(hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            return Err(AppError::InvalidCredentials.into());
        };

        if !verify_password(&request.password, &hash)? {
            warn!(user_id = %user.id, "Login failed: bad password");
            return Err(AppError::InvalidCredentials.into());
        }

        let token = self.ctx.sessions().issue(user.id);
        info!(user_id = %user.id, "User logged in");

        Ok((
            token,
            AuthResponse {
                user_id: user.id,
                username: user.username,
            },
        ))
    }

    /// Revoke a session token
    #[instrument(skip_all)]
    pub fn logout(&self, token: &str) -> ServiceResult<()> {
        if self.ctx.sessions().revoke(token) {
            info!("Session revoked");
        }
        Ok(())
    }

    /// Usernames are ASCII alphanumerics and underscores
    fn is_valid_username(username: &str) -> bool {
        !username.is_empty()
            && username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
