use cookie::SameSite;
use tower_cookies::{Cookie, Cookies, Key};
use uuid::Uuid;

use crate::{Error, Result};

pub const CSRF_COOKIE: &str = "csrf_token";
const MIN_SECRET_LEN: usize = 32;

/// Derives the cookie signing key from the process secret.
pub fn signing_key(secret: &str) -> Result<Key> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(Error::Config(::config::ConfigError::Message(format!(
            "SECRET_KEY must be at least {} bytes",
            MIN_SECRET_LEN
        ))));
    }

    Ok(Key::derive_from(secret.as_bytes()))
}

/// Returns the token bound to this client, issuing a signed cookie for a
/// fresh one when the client has none.
pub fn issue_token(cookies: &Cookies, key: &Key) -> String {
    let signed = cookies.signed(key);
    if let Some(existing) = signed.get(CSRF_COOKIE) {
        return existing.value().to_string();
    }

    let token = Uuid::new_v4().simple().to_string();
    let mut cookie = Cookie::new(CSRF_COOKIE, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    signed.add(cookie);

    token
}

/// Accepts the submission only when `submitted` matches the signed cookie.
pub fn verify_token(cookies: &Cookies, key: &Key, submitted: &str) -> Result<()> {
    let expected = cookies
        .signed(key)
        .get(CSRF_COOKIE)
        .map(|c| c.value().to_string());

    match expected {
        Some(expected) if !submitted.is_empty() && expected == submitted => Ok(()),
        _ => {
            tracing::warn!("CSRF validation failed");
            Err(Error::Forbidden)
        }
    }
}
