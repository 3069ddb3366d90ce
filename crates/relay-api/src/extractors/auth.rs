//! Authentication extractor
//!
//! Resolves the `session` cookie to a verified user identity.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use relay_common::{AppError, SessionError, SESSION_COOKIE};
use relay_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the session cookie
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Verified user identity
    pub user_id: Snowflake,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let user_id = app_state.sessions().verify(&token).map_err(|e| {
            tracing::debug!(error = %e, "Session verification failed");
            match e {
                SessionError::Expired => ApiError::App(AppError::SessionExpired),
                SessionError::Invalid => ApiError::App(AppError::InvalidSession),
            }
        })?;

        Ok(AuthUser::new(user_id))
    }
}

/// The raw session token, without verifying it
///
/// Logout needs the token itself to revoke it.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingSession)?;

        jar.get(SESSION_COOKIE)
            .map(|cookie| SessionToken(cookie.value().to_string()))
            .ok_or(ApiError::MissingSession)
    }
}
