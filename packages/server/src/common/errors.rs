use axum::http::StatusCode;
use thiserror::Error;

/// Faults raised by the intake directory's stores and workflows.
///
/// Validation faults are raised before storage is touched; not-found faults
/// come back from writes that matched zero rows.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("{0}")]
    Validation(String),

    #[error("Unknown entity type: {0}")]
    UnknownEntityKind(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntakeError {
    /// HTTP status the admin/search boundary maps this fault to.
    pub fn status(&self) -> StatusCode {
        match self {
            IntakeError::Validation(_) | IntakeError::UnknownEntityKind(_) => {
                StatusCode::BAD_REQUEST
            }
            IntakeError::NotFound(_) => StatusCode::NOT_FOUND,
            IntakeError::Database(_) | IntakeError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
