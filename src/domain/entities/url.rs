//! Url entity representing a shortened URL record.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::PublicUser;

/// A shortened URL with its slug, click counter and lifecycle timestamps.
///
/// Records are never hard-deleted; `deleted_at` marks a soft delete and
/// excludes the row from all normal lookups. `expires_at`, once in the past,
/// makes the record inaccessible via redirect and reads even though the row
/// remains in storage.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Url {
    pub id: Uuid,
    pub original_url: String,
    pub slug: String,
    pub clicks: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub qr_code: bool,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Url {
    /// Returns true if the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if the record has passed its expiry instant.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() > e)
    }
}

/// Input data for persisting a new URL. The slug is allocated by the
/// service before this struct is built.
#[derive(Debug, Clone)]
pub struct NewUrl {
    pub original_url: String,
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub qr_code: bool,
    pub user_id: Option<Uuid>,
}

/// Partial update for an existing URL. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UrlPatch {
    pub original_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub qr_code: Option<bool>,
}

/// A URL together with its owner's public profile, as returned by
/// owner-facing lookups. Anonymous URLs carry no owner.
#[derive(Debug, Clone)]
pub struct UrlWithOwner {
    pub url: Url,
    pub owner: Option<PublicUser>,
}
