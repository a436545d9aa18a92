mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use shortr::domain::entities::{NewUrl, UrlPatch};
use shortr::domain::repositories::UrlRepository;
use shortr::error::AppError;
use shortr::infrastructure::persistence::PgUrlRepository;

fn repo(pool: PgPool) -> PgUrlRepository {
    PgUrlRepository::new(Arc::new(pool))
}

fn new_url(slug: &str, user_id: Option<Uuid>) -> NewUrl {
    NewUrl {
        original_url: "https://example.com/page".to_string(),
        slug: slug.to_string(),
        title: Some("Example".to_string()),
        description: None,
        expires_at: Utc::now() + Duration::days(7),
        qr_code: false,
        user_id,
    }
}

#[sqlx::test]
async fn test_create_and_find_by_slug(pool: PgPool) {
    let repo = repo(pool);

    let created = repo.create(new_url("abc123", None)).await.unwrap();
    assert_eq!(created.slug, "abc123");
    assert_eq!(created.clicks, 0);
    assert!(created.deleted_at.is_none());

    let found = repo.find_by_slug("abc123").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.title.as_deref(), Some("Example"));
}

#[sqlx::test]
async fn test_create_duplicate_slug_conflicts(pool: PgPool) {
    let repo = repo(pool);

    repo.create(new_url("abc123", None)).await.unwrap();
    let result = repo.create(new_url("abc123", None)).await;

    match result {
        Err(AppError::Conflict { details, .. }) => {
            assert_eq!(details["constraint"], "urls_slug_key");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_find_by_slug_excludes_deleted(pool: PgPool) {
    common::create_deleted_url(&pool, "gone01", "https://example.com").await;

    let repo = repo(pool);

    assert!(repo.find_by_slug("gone01").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_slug_exists_includes_deleted(pool: PgPool) {
    common::create_deleted_url(&pool, "gone01", "https://example.com").await;

    let repo = repo(pool);

    // Deleted rows keep their slug reserved.
    assert!(repo.slug_exists("gone01").await.unwrap());
    assert!(!repo.slug_exists("fresh1").await.unwrap());
}

#[sqlx::test]
async fn test_find_by_id_joins_owner(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner@example.com", "pw").await;
    let id = common::create_test_url(&pool, "owned1", "https://example.com", Some(user.id)).await;

    let repo = repo(pool);

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    let owner = found.owner.unwrap();
    assert_eq!(owner.id, user.id);
    assert_eq!(owner.email, "owner@example.com");
}

#[sqlx::test]
async fn test_find_by_id_anonymous_has_no_owner(pool: PgPool) {
    let id = common::create_test_url(&pool, "anon01", "https://example.com", None).await;

    let repo = repo(pool);

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert!(found.owner.is_none());
}

#[sqlx::test]
async fn test_find_by_id_excludes_deleted(pool: PgPool) {
    let id = common::create_deleted_url(&pool, "gone01", "https://example.com").await;

    let repo = repo(pool);

    assert!(repo.find_by_id(id).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_by_user_id_paginates_newest_first(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner@example.com", "pw").await;
    for i in 0..5 {
        common::create_test_url(
            &pool,
            &format!("list0{i}"),
            "https://example.com",
            Some(user.id),
        )
        .await;
    }
    common::create_deleted_url(&pool, "zapped", "https://example.com").await;

    let repo = repo(pool);

    let (first_page, total) = repo.find_by_user_id(user.id, 1, 2).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(first_page.len(), 2);

    let (last_page, _) = repo.find_by_user_id(user.id, 3, 2).await.unwrap();
    assert_eq!(last_page.len(), 1);
}

#[sqlx::test]
async fn test_update_patches_only_provided_fields(pool: PgPool) {
    let id = common::create_test_url(&pool, "edit01", "https://example.com", None).await;

    let repo = repo(pool);

    let updated = repo
        .update(
            id,
            UrlPatch {
                title: Some("New title".to_string()),
                ..UrlPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title.as_deref(), Some("New title"));
    assert_eq!(updated.original_url, "https://example.com");
    assert_eq!(updated.slug, "edit01");
    assert!(updated.updated_at >= updated.created_at);
}

#[sqlx::test]
async fn test_update_missing_is_not_found(pool: PgPool) {
    let repo = repo(pool);

    let result = repo.update(Uuid::new_v4(), UrlPatch::default()).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_update_deleted_is_not_found(pool: PgPool) {
    let id = common::create_deleted_url(&pool, "gone01", "https://example.com").await;

    let repo = repo(pool);

    let result = repo.update(id, UrlPatch::default()).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_soft_delete_is_idempotent_on_second_call(pool: PgPool) {
    let id = common::create_test_url(&pool, "del001", "https://example.com", None).await;

    let repo = repo(pool);

    assert!(repo.soft_delete(id).await.unwrap());
    assert!(!repo.soft_delete(id).await.unwrap());
}

#[sqlx::test]
async fn test_increment_clicks(pool: PgPool) {
    let id = common::create_test_url(&pool, "click1", "https://example.com", None).await;

    let repo = repo(pool.clone());

    repo.increment_clicks(id).await.unwrap();
    repo.increment_clicks(id).await.unwrap();

    assert_eq!(common::url_clicks(&pool, id).await, 2);
}

#[sqlx::test]
async fn test_increment_clicks_noop_on_deleted(pool: PgPool) {
    let id = common::create_deleted_url(&pool, "gone01", "https://example.com").await;

    let repo = repo(pool.clone());

    repo.increment_clicks(id).await.unwrap();

    assert_eq!(common::url_clicks(&pool, id).await, 0);
}

#[sqlx::test]
async fn test_find_expired_returns_only_expired_live_rows(pool: PgPool) {
    common::create_test_url(&pool, "alive1", "https://example.com", None).await;
    common::create_expired_url(&pool, "stale1", "https://example.com").await;
    common::create_deleted_url(&pool, "gone01", "https://example.com").await;

    let repo = repo(pool);

    let expired = repo.find_expired().await.unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].slug, "stale1");
}
