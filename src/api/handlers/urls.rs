//! Handlers for URL management endpoints (create, list, update, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::url::{CreateUrlRequest, UpdateUrlRequest, UrlListResponse, UrlResponse};
use crate::api::middleware::AuthUser;
use crate::application::services::CreateUrlInput;
use crate::domain::entities::UrlPatch;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /urls`
///
/// Authentication is optional: with a Bearer token the URL is owned by
/// the caller, without one it is anonymous. Anonymous URLs can be
/// resolved but never edited.
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/some/long/path",
///   "expiresAt": "2027-01-01T00:00:00Z",
///   "title": "Example",        // optional
///   "description": "...",      // optional
///   "qrCode": true             // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails or `expiresAt` is not in
/// the future, and 409 Conflict if slug allocation is exhausted.
pub async fn create_url_handler(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let url = state
        .url_service
        .create_url(
            CreateUrlInput {
                original_url: payload.original_url,
                title: payload.title,
                description: payload.description,
                expires_at: payload.expires_at,
                qr_code: payload.qr_code.unwrap_or(false),
            },
            user.as_ref().map(|u| u.id),
        )
        .await?;

    let short_url = state.url_service.short_url(&url.slug);

    let response = if let Some(owner) = &user {
        let owned = state.url_service.find_by_id(url.id, owner.id).await?;
        UrlResponse::from_owned(owned, short_url)
    } else {
        UrlResponse::new(url, short_url, None)
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists the caller's URLs, newest first.
///
/// # Endpoint
///
/// `GET /urls?page=1&limit=10`
///
/// # Errors
///
/// Returns 400 Bad Request for out-of-range pagination parameters.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<UrlListResponse>, AppError> {
    let (page, limit) = params
        .validate_and_get()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (urls, total) = state.url_service.find_by_user_id(user.id, page, limit).await?;

    let urls = urls
        .into_iter()
        .map(|owned| {
            let short_url = state.url_service.short_url(&owned.url.slug);
            UrlResponse::from_owned(owned, short_url)
        })
        .collect();

    Ok(Json(UrlListResponse {
        urls,
        total,
        page,
        limit,
    }))
}

/// Fetches a single URL owned by the caller.
///
/// # Endpoint
///
/// `GET /urls/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the URL is missing or owned by someone else.
pub async fn get_url_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UrlResponse>, AppError> {
    let owned = state.url_service.find_by_id(id, user.id).await?;
    let short_url = state.url_service.short_url(&owned.url.slug);

    Ok(Json(UrlResponse::from_owned(owned, short_url)))
}

/// Partially updates a URL owned by the caller.
///
/// # Endpoint
///
/// `PUT /urls/{id}`
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// # Errors
///
/// Returns 404 Not Found if the URL is missing or owned by someone else;
/// foreign URLs are never reported as forbidden. Returns 400 Bad Request
/// if validation fails or `expiresAt` is moved into the past.
pub async fn update_url_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    payload.validate()?;

    let patch = UrlPatch {
        original_url: payload.original_url,
        title: payload.title,
        description: payload.description,
        expires_at: payload.expires_at,
        qr_code: payload.qr_code,
    };

    let owned = state.url_service.update_url(id, patch, user.id).await?;
    let short_url = state.url_service.short_url(&owned.url.slug);

    Ok(Json(UrlResponse::from_owned(owned, short_url)))
}

/// Soft-deletes a URL owned by the caller.
///
/// # Endpoint
///
/// `DELETE /urls/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the URL is missing or owned by someone else.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.url_service.delete_url(id, user.id).await?;

    Ok(Json(json!({ "message": "URL deleted successfully" })))
}
