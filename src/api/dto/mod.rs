//! Request and response bodies for the REST API.
//!
//! All wire formats use camelCase field names.

pub mod auth;
pub mod health;
pub mod pagination;
pub mod url;
