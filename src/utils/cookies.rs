//! Cookie helpers for the redirect click-suppression flow.

use axum::http::{HeaderMap, header::COOKIE};

/// Returns true if the request carries a cookie named `name`.
///
/// Handles multiple cookies in the `Cookie` header by splitting on
/// semicolons and comparing names; values are ignored.
pub fn has_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .is_some_and(|cookie_str| {
            cookie_str.split(';').any(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                matches!((parts.next(), parts.next()), (Some(n), Some(_)) if n == name)
            })
        })
}

/// Builds a `Set-Cookie` value for the short-lived click-suppression cookie.
///
/// HttpOnly and SameSite=Lax; `max_age` is a handful of seconds, just
/// long enough to absorb a reload or browser prefetch.
pub fn suppression_cookie(name: &str, max_age_seconds: u64) -> String {
    format!("{name}=true; Max-Age={max_age_seconds}; Path=/; HttpOnly; SameSite=Lax")
}
