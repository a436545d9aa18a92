//! HTTP request handlers.

pub mod auth;
pub mod health;
pub mod redirect;
pub mod urls;

pub use auth::{login_handler, register_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use urls::{
    create_url_handler, delete_url_handler, get_url_handler, list_urls_handler,
    update_url_handler,
};
