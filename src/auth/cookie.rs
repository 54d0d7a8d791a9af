//! Defines functions for storing the session's bearer token in a private
//! cookie.
//!
//! The cookie is the client's only durable session storage: it survives page
//! reloads and is removed on log out. No expiry is tracked client side. A
//! token stays in the jar until the user logs out or the API rejects it,
//! matching the reactive expiry model of the finance API.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::api::SessionToken;

pub(crate) const COOKIE_TOKEN: &str = "session_token";

/// Add the session cookie to the cookie jar, indicating that a user is
/// logged in.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_session_cookie(jar: PrivateCookieJar, token: &SessionToken) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, token.as_str().to_owned()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Set the session cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub(crate) fn clear_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// The bearer token of the current session, if one is stored in `jar`.
pub(crate) fn session_token(jar: &PrivateCookieJar) -> Option<SessionToken> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| SessionToken::new(cookie.value_trimmed()))
}
