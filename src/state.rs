//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, JwtService, UrlService};
use crate::infrastructure::persistence::{PgUrlRepository, PgUserRepository};

/// Application state shared by all request handlers.
///
/// Services are held behind `Arc` so cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub url_service: Arc<UrlService<PgUrlRepository>>,
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub jwt: Arc<JwtService>,
    /// Lifetime of the per-URL click suppression cookie in seconds.
    pub click_dedup_seconds: u64,
}

impl AppState {
    /// Wires repositories and services over a connection pool.
    pub fn new(
        db: PgPool,
        base_url: String,
        jwt_secret: &str,
        jwt_expires_in: u64,
        click_dedup_seconds: u64,
    ) -> Self {
        let pool = Arc::new(db.clone());

        let jwt = Arc::new(JwtService::new(jwt_secret, jwt_expires_in));
        let url_service = Arc::new(UrlService::new(
            Arc::new(PgUrlRepository::new(pool.clone())),
            base_url,
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(PgUserRepository::new(pool)),
            jwt.clone(),
        ));

        Self {
            db,
            url_service,
            auth_service,
            jwt,
            click_dedup_seconds,
        }
    }
}
