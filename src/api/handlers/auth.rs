//! Handlers for account registration and login.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and signs it in.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "correct-horse",
///   "name": "Ada"   // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails and 409 Conflict if the
/// email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let tokens = state
        .auth_service
        .register(payload.email, payload.password, payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token: tokens.access_token,
            user: tokens.user.to_public(),
        }),
    ))
}

/// Verifies credentials and issues an access token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Errors
///
/// Returns 401 Unauthorized for both an unknown email and a wrong
/// password, with an identical body.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let tokens = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        user: tokens.user.to_public(),
    }))
}
