//! Shortened URL lifecycle: creation, lookup, updates and click counting.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewUrl, Url, UrlPatch, UrlWithOwner};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::slug::generate_slug;

/// Upper bound on slug generation attempts before giving up.
const MAX_SLUG_ATTEMPTS: usize = 20;

/// Caller-supplied fields for a new shortened URL.
pub struct CreateUrlInput {
    pub original_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub qr_code: bool,
}

/// Application service for shortened URLs.
///
/// Owns slug allocation and the visibility rules: expired and soft-deleted
/// URLs resolve identically to missing ones, and ownership violations are
/// reported as not-found rather than forbidden.
pub struct UrlService<R: UrlRepository> {
    repository: Arc<R>,
    base_url: String,
}

impl<R: UrlRepository> UrlService<R> {
    /// Creates a new service over a URL repository.
    ///
    /// `base_url` is the public origin short links are served from.
    pub fn new(repository: Arc<R>, base_url: String) -> Self {
        Self {
            repository,
            base_url,
        }
    }

    /// Creates a shortened URL with a freshly allocated slug.
    ///
    /// Slug allocation retries on collision, including the race where a
    /// concurrent insert claims the slug between the existence check and
    /// our own insert (surfaced by the unique constraint).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `expires_at` is not in the
    /// future, and [`AppError::Conflict`] if no free slug was found within
    /// the attempt budget.
    pub async fn create_url(
        &self,
        input: CreateUrlInput,
        owner_id: Option<Uuid>,
    ) -> Result<Url, AppError> {
        validate_expiry(input.expires_at)?;

        for _ in 0..MAX_SLUG_ATTEMPTS {
            let slug = generate_slug();
            if self.repository.slug_exists(&slug).await? {
                continue;
            }

            let result = self
                .repository
                .create(NewUrl {
                    original_url: input.original_url.clone(),
                    slug,
                    title: input.title.clone(),
                    description: input.description.clone(),
                    expires_at: input.expires_at,
                    qr_code: input.qr_code,
                    user_id: owner_id,
                })
                .await;

            match result {
                Ok(url) => {
                    tracing::info!(url_id = %url.id, slug = %url.slug, "created short URL");
                    return Ok(url);
                }
                // Lost an insert race on the slug; try another one.
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(
            "Unable to generate unique slug",
            json!({ "attempts": MAX_SLUG_ATTEMPTS }),
        ))
    }

    /// Resolves a slug to a live URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for missing, soft-deleted and expired
    /// slugs alike; the caller cannot tell them apart.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Url, AppError> {
        let url = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| url_not_found(json!({ "slug": slug })))?;

        if url.is_expired() {
            return Err(url_not_found(json!({ "slug": slug })));
        }

        Ok(url)
    }

    /// Fetches a URL owned by `requester` together with its owner profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL is missing, deleted or
    /// owned by someone else.
    pub async fn find_by_id(&self, id: Uuid, requester: Uuid) -> Result<UrlWithOwner, AppError> {
        self.require_owned(id, requester).await
    }

    /// Lists a user's live URLs, newest first, with the total count.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<UrlWithOwner>, i64), AppError> {
        self.repository
            .find_by_user_id(user_id, page, page_size)
            .await
    }

    /// Applies a partial update to a URL owned by `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL is missing or owned by
    /// someone else, and [`AppError::Validation`] if the patch moves
    /// `expires_at` into the past.
    pub async fn update_url(
        &self,
        id: Uuid,
        patch: UrlPatch,
        requester: Uuid,
    ) -> Result<UrlWithOwner, AppError> {
        let existing = self.require_owned(id, requester).await?;

        if let Some(expires_at) = patch.expires_at {
            validate_expiry(expires_at)?;
        }

        let url = self.repository.update(id, patch).await?;
        Ok(UrlWithOwner {
            url,
            owner: existing.owner,
        })
    }

    /// Soft-deletes a URL owned by `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL is missing or owned by
    /// someone else.
    pub async fn delete_url(&self, id: Uuid, requester: Uuid) -> Result<(), AppError> {
        self.require_owned(id, requester).await?;

        if !self.repository.soft_delete(id).await? {
            return Err(url_not_found(json!({ "id": id })));
        }

        tracing::info!(url_id = %id, "deleted short URL");
        Ok(())
    }

    /// Records one click against a URL. No-op if the URL was deleted.
    pub async fn increment_clicks(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.increment_clicks(id).await
    }

    /// Returns the absolute short link for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), slug)
    }

    /// Lists live URLs whose expiry has passed, for external cleanup jobs.
    pub async fn find_expired_urls(&self) -> Result<Vec<Url>, AppError> {
        self.repository.find_expired().await
    }

    async fn require_owned(&self, id: Uuid, requester: Uuid) -> Result<UrlWithOwner, AppError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| url_not_found(json!({ "id": id })))?;

        // Foreign URLs are reported as missing, not forbidden, so their
        // existence is not leaked to other users.
        if existing.url.user_id != Some(requester) {
            return Err(url_not_found(json!({ "id": id })));
        }

        Ok(existing)
    }
}

fn validate_expiry(expires_at: DateTime<Utc>) -> Result<(), AppError> {
    if expires_at <= Utc::now() {
        return Err(AppError::bad_request(
            "Expiration date must be in the future",
            json!({ "expiresAt": expires_at }),
        ));
    }
    Ok(())
}

fn url_not_found(details: serde_json::Value) -> AppError {
    AppError::not_found("URL not found", details)
}
