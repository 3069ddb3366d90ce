//! Authentication handlers
//!
//! Endpoints for user registration, login, and logout. Login issues an
//! HttpOnly session cookie; the WebSocket handshake and every other
//! endpoint authenticate against it.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use relay_common::SESSION_COOKIE;
use relay_service::{AuthResponse, AuthService, LoginRequest, RegisterRequest};

use crate::extractors::{SessionToken, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with username and password
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let service = AuthService::new(state.service_context());
    let (token, response) = service.login(request).await?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config().app.env.is_production())
        .build();

    Ok((jar.add(cookie), Json(response)))
}

/// Logout and clear the session cookie
///
/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    token: SessionToken,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = AuthService::new(state.service_context());
    service.logout(&token.0)?;

    let removal = Cookie::build(SESSION_COOKIE).path("/").build();
    Ok((jar.remove(removal), NoContent))
}
