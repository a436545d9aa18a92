#![allow(dead_code)]

use axum::Router;
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shortr::api::handlers::{
    create_url_handler, delete_url_handler, get_url_handler, health_handler, list_urls_handler,
    login_handler, redirect_handler, register_handler, update_url_handler,
};
use shortr::domain::entities::User;
use shortr::state::AppState;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(pool, TEST_BASE_URL.to_string(), "test-secret", 3600, 2)
}

/// Full route table without the outer tracing/normalization layers.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/urls", post(create_url_handler).get(list_urls_handler))
        .route(
            "/urls/{id}",
            get(get_url_handler)
                .put(update_url_handler)
                .delete(delete_url_handler),
        )
        .route("/{slug}", get(redirect_handler))
        .with_state(state)
}

/// Inserts a user with the given password (low bcrypt cost to keep tests fast).
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> User {
    let hash = bcrypt::hash(password, 4).unwrap();

    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) \
         RETURNING id, email, password_hash, name, created_at, updated_at",
    )
    .bind(email)
    .bind(hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Signs an access token for a user via the state's token service.
pub fn bearer_token(state: &AppState, user: &User) -> String {
    state.jwt.sign(user).unwrap()
}

pub async fn create_test_url(
    pool: &PgPool,
    slug: &str,
    original_url: &str,
    user_id: Option<Uuid>,
) -> Uuid {
    insert_url(pool, slug, original_url, user_id, Utc::now() + chrono::Duration::days(7), false)
        .await
}

pub async fn create_expired_url(pool: &PgPool, slug: &str, original_url: &str) -> Uuid {
    insert_url(pool, slug, original_url, None, Utc::now() - chrono::Duration::hours(1), false)
        .await
}

pub async fn create_deleted_url(pool: &PgPool, slug: &str, original_url: &str) -> Uuid {
    insert_url(pool, slug, original_url, None, Utc::now() + chrono::Duration::days(7), true).await
}

async fn insert_url(
    pool: &PgPool,
    slug: &str,
    original_url: &str,
    user_id: Option<Uuid>,
    expires_at: DateTime<Utc>,
    deleted: bool,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO urls (slug, original_url, user_id, expires_at, deleted_at) \
         VALUES ($1, $2, $3, $4, CASE WHEN $5 THEN now() ELSE NULL END) \
         RETURNING id",
    )
    .bind(slug)
    .bind(original_url)
    .bind(user_id)
    .bind(expires_at)
    .bind(deleted)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn url_clicks(pool: &PgPool, id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM urls WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}
