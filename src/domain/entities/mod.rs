//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic beyond small
//! state predicates. Creation and partial-update inputs use separate structs
//! (`NewUrl`, `UrlPatch`, `NewUser`, `UserPatch`).

pub mod url;
pub mod user;

pub use url::{NewUrl, Url, UrlPatch, UrlWithOwner};
pub use user::{NewUser, PublicUser, User, UserPatch};
