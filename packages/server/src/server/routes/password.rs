//! Password prompt: the single shared-secret gate in front of the admin
//! boundary.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use axum_extra::extract::Form;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::server::app::AppState;
use crate::server::middleware::SESSION_COOKIE;

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub password: String,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PasswordError {
    pub error: String,
}

/// POST /password - compare the submitted secret against the server-held
/// value. A match creates a session, sets the session cookie, and redirects
/// to the caller-supplied path; a mismatch returns an inline error without
/// redirecting.
pub async fn password_handler(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
    Form(form): Form<PasswordForm>,
) -> Response {
    if form.password != state.admin_password {
        warn!("Admin password attempt rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(PasswordError {
                error: "Invalid password".to_string(),
            }),
        )
            .into_response();
    }

    let token = state.session_store.create_session().await;
    info!("Admin session created");

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build();

    let target = form
        .redirect_to
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| "/".to_string());

    (jar.add(cookie), Redirect::to(&target)).into_response()
}
