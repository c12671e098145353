#![allow(dead_code)]

use axum::http::{HeaderValue, header};
use axum_test::{TestResponse, TestServer};
use std::sync::Arc;

use shortener_store::api::middleware::auth::{COOKIE_NAME, OwnerSigner};
use shortener_store::domain::links::LinkBuilder;
use shortener_store::infrastructure::memory::MemoryUrlStore;
use shortener_store::routes::router;
use shortener_store::state::AppState;
use shortener_store::utils::codec::Codec;

pub const BASE_URL: &str = "http://localhost:8080";
pub const SECRET: &[u8] = b"integration-secret";

pub fn links() -> LinkBuilder {
    LinkBuilder::new(BASE_URL, Codec::default())
}

pub fn signer() -> OwnerSigner {
    OwnerSigner::new(SECRET).unwrap()
}

pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(MemoryUrlStore::new(links())), signer())
}

/// Full router over a fresh in-memory store.
pub fn create_test_server() -> TestServer {
    TestServer::new(router(create_test_state())).unwrap()
}

/// `Cookie` header value identifying `owner`.
pub fn owner_cookie(owner: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{}={}", COOKIE_NAME, signer().sign(owner))).unwrap()
}

/// Extracts the owner id from a `Set-Cookie` response header, if present.
pub fn issued_owner(response: &TestResponse) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let value = set_cookie
        .split(';')
        .next()?
        .strip_prefix(&format!("{COOKIE_NAME}="))?;
    signer().verify(value)
}

/// Last path segment of a short link.
pub fn code_of(short_url: &str) -> &str {
    short_url.rsplit('/').next().unwrap()
}

pub mod contract;
