// Session cookie plumbing. The session itself is a signed token (auth::jwt)
// carried in an HttpOnly cookie rather than an Authorization header, so
// browser form submissions stay authenticated without client-side code.
use axum::http::{header, HeaderMap};

use crate::auth::jwt::{verify_session, SessionClaims};
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_HOURS: i64 = 8;

pub fn session_secret() -> Result<String, AppError> {
    std::env::var("SESSION_SECRET").map_err(|_| AppError::internal("SESSION_SECRET not configured"))
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_HOURS * 3600
    )
}

/// Set-Cookie value that expires the session immediately.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

/// Claims for the current request, when it carries a valid session cookie.
pub fn current_session(headers: &HeaderMap) -> Option<SessionClaims> {
    let secret = std::env::var("SESSION_SECRET").ok()?;
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    let token = token_from_cookie_header(cookies)?;
    verify_session(token, &secret).ok()
}
