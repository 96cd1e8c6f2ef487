use crate::server::auth::SessionStore;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

/// Cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "admin_session";

/// Middleware gating the admin boundary.
///
/// This middleware:
/// 1. Extracts the session token from the `admin_session` cookie
///    (Authorization bearer accepted as a fallback)
/// 2. Looks up the session in the SessionStore
/// 3. Redirects to the password prompt, carrying the return path, when no
///    valid session exists
pub async fn admin_auth_middleware(
    session_store: Arc<SessionStore>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(&request);
    let session = match token {
        Some(token) => session_store.get_session(&token).await,
        None => None,
    };

    match session {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => {
            let target = format!("/password?redirect_to={}", request.uri().path());
            Redirect::to(&target).into_response()
        }
    }
}

fn session_token(request: &Request) -> Option<String> {
    let jar = CookieJar::from_headers(request.headers());
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    // Fallback: Authorization header with an optional "Bearer " prefix
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);
    Some(token.to_string())
}
