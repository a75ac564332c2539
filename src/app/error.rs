use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type for unified error handling across the app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Validation errors (400 Bad Request) - invalid input data
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication errors (401 Unauthorized) - missing or expired session
    #[error("auth error: {0}")]
    Auth(String),

    /// Not found (404). Also used for access denials so existence is not leaked.
    #[error("not found: {0}")]
    NotFound(String),

    /// Database errors (500 Internal Server Error)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic internal errors (500 Internal Server Error)
    #[error("internal error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Database(err) => {
                tracing::error!(%err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
