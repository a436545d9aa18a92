//! Application services.
//!
//! Services are generic over the domain repository traits so unit tests can
//! drive them with mocks.
//!
//! # Services
//!
//! - [`UrlService`] - slug allocation, lookups, updates, click counting
//! - [`AuthService`] - registration, login, token-subject resolution
//! - [`JwtService`] - access token signing and verification

pub mod auth_service;
pub mod jwt_service;
pub mod url_service;

pub use auth_service::{AuthService, AuthTokens};
pub use jwt_service::{Claims, JwtService};
pub use url_service::{CreateUrlInput, UrlService};
