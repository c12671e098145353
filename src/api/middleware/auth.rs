//! Signed owner cookie middleware.
//!
//! Every request is tagged with an [`Owner`]. The identity comes from the
//! `uid` cookie when its signature checks out; otherwise a fresh random
//! owner id is issued and returned in `Set-Cookie`.

use axum::{
    extract::{Request, State},
    http::{
        HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac, digest::InvalidLength};
use sha2::Sha256;

use crate::state::AppState;

/// Name of the identity cookie.
pub const COOKIE_NAME: &str = "uid";

type HmacSha256 = Hmac<Sha256>;

/// Authenticated owner of the current request, stored as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Signs and verifies owner ids with HMAC-SHA256.
#[derive(Clone)]
pub struct OwnerSigner {
    mac: HmacSha256,
}

impl OwnerSigner {
    /// Creates a signer keyed with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLength`] if the key is rejected by the MAC.
    pub fn new(secret: &[u8]) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(secret)?,
        })
    }

    /// Renders the cookie value `<owner>.<hex signature>`.
    pub fn sign(&self, owner: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(owner.as_bytes());
        format!("{}.{}", owner, hex::encode(mac.finalize().into_bytes()))
    }

    /// Returns the owner encoded in `value` if its signature is valid.
    pub fn verify(&self, value: &str) -> Option<String> {
        let (owner, signature) = value.rsplit_once('.')?;
        if owner.is_empty() {
            return None;
        }

        let signature = hex::decode(signature).ok()?;
        let mut mac = self.mac.clone();
        mac.update(owner.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(owner.to_string())
    }
}

impl std::fmt::Debug for OwnerSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OwnerSigner(..)")
    }
}

/// Generates a random 128-bit owner id, hex encoded.
pub fn new_owner_id() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

fn cookie_value<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

/// Resolves the request owner from the `uid` cookie.
///
/// # Flow
///
/// 1. Read the `uid` cookie and verify its HMAC
/// 2. On success, use the embedded owner id
/// 3. Otherwise generate a new owner id and set a fresh cookie on the response
/// 4. Insert [`Owner`] into request extensions and continue
///
/// Requests are never rejected here; a forged cookie only loses its identity.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::api::middleware::auth;
///
/// let app = Router::new()
///     .route("/api/user/urls", get(list_user_urls_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let verified = cookie_value(&req, COOKIE_NAME).and_then(|value| st.signer.verify(value));

    let (owner, issued) = match verified {
        Some(owner) => (owner, None),
        None => {
            let owner = new_owner_id();
            tracing::debug!(owner = %owner, "Issued new owner id");
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                COOKIE_NAME,
                st.signer.sign(&owner)
            );
            (owner, Some(cookie))
        }
    };

    req.extensions_mut().insert(Owner(owner));
    let mut response = next.run(req).await;

    if let Some(cookie) = issued
        && let Ok(value) = HeaderValue::from_str(&cookie)
    {
        response.headers_mut().append(SET_COOKIE, value);
    }

    response
}
