//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{slug}`        - Short link redirect (public)
//! - `GET    /health`        - Health check (public)
//! - `POST   /auth/register` - Account registration (public)
//! - `POST   /auth/login`    - Login (public)
//! - `POST   /urls`          - Create short URL (optional Bearer token)
//! - `GET    /urls`          - List own URLs (Bearer token required)
//! - `GET    /urls/{id}`     - Fetch a URL (Bearer token required)
//! - `PUT    /urls/{id}`     - Update own URL (Bearer token required)
//! - `DELETE /urls/{id}`     - Delete own URL (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling
//!
//! Authentication is enforced per handler via the
//! [`AuthUser`](crate::api::middleware::AuthUser) extractor.

use crate::api::handlers::{
    create_url_handler, delete_url_handler, get_url_handler, health_handler, list_urls_handler,
    login_handler, redirect_handler, register_handler, update_url_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The catch-all `/{slug}` redirect route is registered last so the fixed
/// routes above it take precedence.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
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
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
