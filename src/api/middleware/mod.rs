//! Request middleware: authentication and tracing.

pub mod auth;
pub mod tracing;

pub use auth::AuthUser;
