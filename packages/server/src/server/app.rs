//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::auth::SessionStore;
use crate::server::middleware::admin_auth_middleware;
use crate::server::routes::{
    admin_action_handler, admin_page_handler, filter_options_handler, health_handler,
    password_handler, psychiatrist_detail_handler, psychiatrist_list_handler, search_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub session_store: Arc<SessionStore>,
    pub admin_password: String,
}

/// Build the Axum application router
///
/// Admin routes are grouped behind the session middleware; everything else is
/// public. The session store lives in-process for the lifetime of the server.
pub fn build_app(pool: PgPool, admin_password: String) -> Router {
    let session_store = Arc::new(SessionStore::new());

    let app_state = AppState {
        db_pool: pool,
        session_store: session_store.clone(),
        admin_password,
    };

    // CORS configuration - the web client runs as a separate service
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    // Admin boundary: every route here requires an authenticated session
    let admin_routes = Router::new()
        .route("/admin", get(admin_page_handler).post(admin_action_handler))
        .route("/admin/psychiatrists", get(psychiatrist_list_handler))
        .route("/admin/psychiatrists/:id", get(psychiatrist_detail_handler))
        .route_layer(middleware::from_fn(move |req, next| {
            let session_store = session_store.clone();
            async move { admin_auth_middleware(session_store, req, next).await }
        }));

    Router::new()
        // Public search
        .route("/", get(filter_options_handler))
        .route("/search", post(search_handler))
        // Auth
        .route("/password", post(password_handler))
        .merge(admin_routes)
        // Health check
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
