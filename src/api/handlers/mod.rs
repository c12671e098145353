//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.
//! Handlers read the caller's [`crate::api::middleware::auth::Owner`] from
//! request extensions and delegate to the configured store.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod user_urls;

pub use health::ping_handler;
pub use redirect::redirect_handler;
pub use shorten::{shorten_batch_handler, shorten_handler, shorten_text_handler};
pub use user_urls::{delete_user_urls_handler, list_user_urls_handler};
