//! Request and response bodies for URL management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{PublicUser, Url, UrlWithOwner};

/// Request body for `POST /urls`.
///
/// `expires_at` is required; every short URL has a finite lifetime.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    #[validate(url(message = "Invalid URL"))]
    pub original_url: String,

    #[validate(length(max = 255, message = "Title too long"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    pub expires_at: DateTime<Utc>,

    pub qr_code: Option<bool>,
}

/// Request body for `PUT /urls/{id}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUrlRequest {
    #[validate(url(message = "Invalid URL"))]
    pub original_url: Option<String>,

    #[validate(length(max = 255, message = "Title too long"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    pub expires_at: Option<DateTime<Utc>>,

    pub qr_code: Option<bool>,
}

/// JSON representation of a shortened URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: uuid::Uuid,
    pub original_url: String,
    pub short_url: String,
    pub slug: String,
    pub clicks: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub qr_code: bool,
    pub user: Option<PublicUser>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlResponse {
    /// Builds a response from a URL, its absolute short link and its owner.
    pub fn new(url: Url, short_url: String, user: Option<PublicUser>) -> Self {
        Self {
            id: url.id,
            original_url: url.original_url,
            short_url,
            slug: url.slug,
            clicks: url.clicks,
            title: url.title,
            description: url.description,
            expires_at: url.expires_at,
            qr_code: url.qr_code,
            user,
            created_at: url.created_at,
            updated_at: url.updated_at,
        }
    }

    /// Builds a response from a URL joined with its owner.
    pub fn from_owned(url: UrlWithOwner, short_url: String) -> Self {
        Self::new(url.url, short_url, url.owner)
    }
}

/// Response body for `GET /urls`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlListResponse {
    pub urls: Vec<UrlResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
