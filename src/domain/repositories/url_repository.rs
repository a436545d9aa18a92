//! Repository trait for URL data access.

use crate::domain::entities::{NewUrl, Url, UrlPatch, UrlWithOwner};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for shortened URL records.
///
/// All lookups except [`slug_exists`](UrlRepository::slug_exists) exclude
/// soft-deleted rows. Expiry is not filtered here; the service layer decides
/// how an expired record is surfaced.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new URL record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug collides with an existing
    /// row (the `urls_slug_key` unique constraint is the correctness
    /// backstop for the generator's check-then-insert).
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_url: NewUrl) -> Result<Url, AppError>;

    /// Finds a non-deleted URL by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Url>, AppError>;

    /// Finds a non-deleted URL by id, joined with its owner's public profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlWithOwner>, AppError>;

    /// Lists a user's non-deleted URLs newest-first, with the total count.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<UrlWithOwner>, i64), AppError>;

    /// Partially updates a non-deleted URL. `None` fields are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no non-deleted row matches `id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: Uuid, patch: UrlPatch) -> Result<Url, AppError>;

    /// Soft-deletes a URL by setting `deleted_at = now()`.
    ///
    /// Returns `Ok(true)` if the row was found and deleted, `Ok(false)` if
    /// not found or already deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Increments the click counter for a non-deleted URL.
    ///
    /// A no-op (not an error) when the row is absent or soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, id: Uuid) -> Result<(), AppError>;

    /// Returns true if any row (including soft-deleted ones) carries `slug`.
    ///
    /// Deleted rows keep their slug, so the generator must avoid them too.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Lists non-deleted URLs whose expiry instant has passed.
    ///
    /// Intended for an external cleanup scheduler; nothing in the service
    /// invokes it on a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_expired(&self) -> Result<Vec<Url>, AppError>;
}
