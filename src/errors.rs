use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::LexiconError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] LexiconError),

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("dialogue engine unavailable")]
    EngineClosed,

    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Invalid(_) => StatusCode::BAD_REQUEST,
            AppError::EngineClosed => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
