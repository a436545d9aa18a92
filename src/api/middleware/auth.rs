//! Bearer token authentication extractor.

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use axum_auth::AuthBearer;
use serde_json::json;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// The authenticated caller, resolved from a Bearer token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature and expiry
/// 3. Resolve the token subject to a live account
///
/// Used as a required extractor on protected endpoints and as
/// `Option<AuthUser>` where authentication is optional. In the optional
/// form a missing header yields `None`, but a present-and-invalid token
/// is still rejected.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing or malformed
/// - Token signature is invalid or the token has expired
/// - The account behind the token no longer exists
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Authorization header is missing or invalid" }),
                )
            })?;

        let claims = state.jwt.verify(&token)?;

        let user = state
            .auth_service
            .validate_user(claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Account no longer exists" }),
                )
            })?;

        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        // No header means an anonymous request; a bad token is still an error.
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(None);
        }

        <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}
