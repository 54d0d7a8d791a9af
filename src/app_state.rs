//! Implements a struct that holds the state shared by all route handlers.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::api::ApiClient;

/// The state of the web client.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The client for the remote finance API.
    pub api: ApiClient,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `cookie_secret` seeds the private cookie key and `api_base_url` is
    /// the address of the finance API, e.g. `http://127.0.0.1:8000`.
    pub fn new(cookie_secret: &str, api_base_url: &str) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            api: ApiClient::new(api_base_url),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
