use axum::response::{Response, IntoResponse, Redirect};
use axum::middleware::Next;
use crate::auth::session::current_session;

#[derive(Clone)]
pub struct SessionContext {
    pub user_id: i64,
    pub username: String,
}

use axum::http::Request;

// Inventory pages never surface data to anonymous visitors; anything without
// a valid session cookie is sent to the login page.
pub async fn require_session(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let Some(claims) = current_session(req.headers()) else {
        return Redirect::to("/login/").into_response();
    };

    // Attach context
    req.extensions_mut().insert(SessionContext {
        user_id: claims.sub,
        username: claims.username,
    });

    next.run(req).await
}
