//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookies::{has_cookie, suppression_cookie};

/// Redirects a short link to its destination, counting the click.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Click Deduplication
///
/// Each redirect sets a short-lived `clicked_<id>` cookie; while it is
/// present, repeat visits follow the redirect without counting another
/// click. This absorbs double-clicks and browser prefetches.
///
/// # Response
///
/// `302 Found` with the destination in the `Location` header.
///
/// # Errors
///
/// Returns 404 Not Found for unknown, expired and deleted slugs alike.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let url = state.url_service.find_by_slug(&slug).await?;

    let cookie_name = format!("clicked_{}", url.id);
    let count_click = !has_cookie(&headers, &cookie_name);

    if count_click {
        state.url_service.increment_clicks(url.id).await?;
    }

    let location = HeaderValue::from_str(&url.original_url).map_err(|_| {
        tracing::error!(url_id = %url.id, "stored destination is not a valid header value");
        AppError::internal("Invalid redirect destination", json!({}))
    })?;

    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::LOCATION, location);

    if count_click {
        let cookie = suppression_cookie(&cookie_name, state.click_dedup_seconds);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response_headers.insert(header::SET_COOKIE, value);
        }
    }

    Ok((StatusCode::FOUND, response_headers).into_response())
}
