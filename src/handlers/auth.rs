// src/handlers/auth.rs
use axum::{
    extract::{Form, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use bcrypt::verify;
use tracing::{instrument, warn};

use crate::auth::jwt::sign_session;
use crate::auth::session::{clear_session_cookie, current_session, session_cookie, session_secret};
use crate::dtos::user::{LoginForm, LoginPageResponse};
use crate::error::AppError;
use crate::state::AppState;

// GET /login/ - Credential form; authenticated visitors go straight home
pub async fn login_form(headers: HeaderMap) -> Response {
    if current_session(&headers).is_some() {
        return Redirect::to("/").into_response();
    }

    Json(LoginPageResponse::default()).into_response()
}

// POST /login/ - Establish a session
#[instrument(skip(state, headers, form))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if current_session(&headers).is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    let user = match state.users.find_by_username(username.trim()).await? {
        Some(user) if !password.is_empty() => user,
        _ => return Ok(login_failed()),
    };

    let ok = verify(&password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;
    if !ok {
        warn!(username = %user.username, "Failed login attempt");
        return Ok(login_failed());
    }

    let token = sign_session(user.id, &user.username, &session_secret()?)?;
    Ok((
        [(header::SET_COOKIE, session_cookie(&token))],
        Redirect::to("/"),
    )
        .into_response())
}

// The form is re-rendered with errors rather than answered with an error
// status, matching how the credential page is consumed.
fn login_failed() -> Response {
    Json(LoginPageResponse {
        errors: vec!["Invalid username or password".to_string()],
    })
    .into_response()
}

// GET /logout/ - Destroy the session
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/login/"),
    )
        .into_response()
}
