//! Shared application state passed to handlers and middleware.

use std::sync::Arc;

use crate::api::middleware::auth::OwnerSigner;
use crate::domain::repositories::UrlStore;

/// State cloned into every request.
///
/// The store is chosen once at startup; handlers only see the trait.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UrlStore>,
    pub signer: OwnerSigner,
}

impl AppState {
    pub fn new(store: Arc<dyn UrlStore>, signer: OwnerSigner) -> Self {
        Self { store, signer }
    }
}
