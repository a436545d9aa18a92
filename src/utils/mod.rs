//! Utility functions shared across the application.
//!
//! - [`slug`] - Random slug generation
//! - [`cookies`] - Cookie parsing and the click-suppression Set-Cookie builder

pub mod cookies;
pub mod slug;
