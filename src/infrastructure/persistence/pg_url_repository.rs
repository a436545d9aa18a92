//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewUrl, PublicUser, Url, UrlPatch, UrlWithOwner};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for shortened URL storage and retrieval.
///
/// Uses SQLx prepared statements; soft deletion is expressed as
/// `deleted_at IS NULL` predicates rather than row removal.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const URL_COLUMNS: &str = "id, original_url, slug, clicks, title, description, \
     expires_at, deleted_at, qr_code, user_id, created_at, updated_at";

/// Flat row shape for URL + owner joins.
#[derive(sqlx::FromRow)]
struct UrlOwnerRow {
    #[sqlx(flatten)]
    url: Url,
    owner_id: Option<Uuid>,
    owner_email: Option<String>,
    owner_name: Option<String>,
    owner_created_at: Option<DateTime<Utc>>,
    owner_updated_at: Option<DateTime<Utc>>,
}

impl From<UrlOwnerRow> for UrlWithOwner {
    fn from(row: UrlOwnerRow) -> Self {
        let owner = match (
            row.owner_id,
            row.owner_email,
            row.owner_created_at,
            row.owner_updated_at,
        ) {
            (Some(id), Some(email), Some(created_at), Some(updated_at)) => Some(PublicUser {
                id,
                email,
                name: row.owner_name,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        UrlWithOwner {
            url: row.url,
            owner,
        }
    }
}

fn owner_join_query(where_clause: &str, tail: &str) -> String {
    format!(
        "SELECT u.id, u.original_url, u.slug, u.clicks, u.title, u.description, \
                u.expires_at, u.deleted_at, u.qr_code, u.user_id, u.created_at, u.updated_at, \
                o.id AS owner_id, o.email AS owner_email, o.name AS owner_name, \
                o.created_at AS owner_created_at, o.updated_at AS owner_updated_at \
         FROM urls u \
         LEFT JOIN users o ON o.id = u.user_id \
         WHERE {where_clause} {tail}"
    )
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewUrl) -> Result<Url, AppError> {
        let url = sqlx::query_as::<_, Url>(&format!(
            "INSERT INTO urls (original_url, slug, title, description, expires_at, qr_code, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {URL_COLUMNS}"
        ))
        .bind(&new_url.original_url)
        .bind(&new_url.slug)
        .bind(&new_url.title)
        .bind(&new_url.description)
        .bind(new_url.expires_at)
        .bind(new_url.qr_code)
        .bind(new_url.user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Url>, AppError> {
        let url = sqlx::query_as::<_, Url>(&format!(
            "SELECT {URL_COLUMNS} FROM urls WHERE slug = $1 AND deleted_at IS NULL"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlWithOwner>, AppError> {
        let row = sqlx::query_as::<_, UrlOwnerRow>(&owner_join_query(
            "u.id = $1 AND u.deleted_at IS NULL",
            "",
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlWithOwner::from))
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<UrlWithOwner>, i64), AppError> {
        let offset = (page - 1) * page_size;

        let rows = sqlx::query_as::<_, UrlOwnerRow>(&owner_join_query(
            "u.user_id = $1 AND u.deleted_at IS NULL",
            "ORDER BY u.created_at DESC LIMIT $2 OFFSET $3",
        ))
        .bind(user_id)
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM urls WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok((rows.into_iter().map(UrlWithOwner::from).collect(), total))
    }

    async fn update(&self, id: Uuid, patch: UrlPatch) -> Result<Url, AppError> {
        let url = sqlx::query_as::<_, Url>(&format!(
            "UPDATE urls SET \
                 original_url = COALESCE($2, original_url), \
                 title        = COALESCE($3, title), \
                 description  = COALESCE($4, description), \
                 expires_at   = COALESCE($5, expires_at), \
                 qr_code      = COALESCE($6, qr_code), \
                 updated_at   = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {URL_COLUMNS}"
        ))
        .bind(id)
        .bind(&patch.original_url)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.expires_at)
        .bind(patch.qr_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        url.ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE urls SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_clicks(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM urls WHERE slug = $1)")
            .bind(slug)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn find_expired(&self) -> Result<Vec<Url>, AppError> {
        let urls = sqlx::query_as::<_, Url>(&format!(
            "SELECT {URL_COLUMNS} FROM urls \
             WHERE expires_at < now() AND deleted_at IS NULL \
             ORDER BY expires_at"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(urls)
    }
}
