use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_error: Option<String>,
    pool_size: u32,
    idle_connections: usize,
}

/// Health check endpoint: one round-trip against the database plus the pool
/// counters. Returns 200 OK when the database answers, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database_error = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        sqlx::query("SELECT 1").execute(&state.db_pool),
    )
    .await
    {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(format!("Query failed: {}", e)),
        Err(_) => Some("Query timeout (>5s)".to_string()),
    };

    let healthy = database_error.is_none();

    (
        if healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        },
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" },
            database_error,
            pool_size: state.db_pool.size(),
            idle_connections: state.db_pool.num_idle(),
        }),
    )
}
