//! Session cookie handling
//!
//! One opaque cookie per client. The id is read from the jar if present,
//! generated otherwise; the handler writes the cookie back on every
//! response so a fresh client gets one on first contact.

use application::SessionId;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Session cookie name
pub const SESSION_COOKIE: &str = "skycast_session";

/// Read the session id from the jar, generating a fresh one if absent
#[must_use]
pub fn extract_session(jar: &CookieJar) -> SessionId {
    jar.get(SESSION_COOKIE).map_or_else(SessionId::generate, |c| {
        SessionId::from_cookie(c.value())
    })
}

/// Return a jar carrying the session cookie
#[must_use]
pub fn with_session_cookie(jar: CookieJar, id: &SessionId) -> CookieJar {
    let mut cookie = Cookie::new(SESSION_COOKIE, id.as_str().to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    jar.add(cookie)
}
