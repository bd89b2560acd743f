use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rentsim_core::model::ContactResponse;

/// Custom error types for the rentsim API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid parameter: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Lock error")]
    LockError,
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::InvalidJson(err.body_text())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ApiError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ApiError::LockError
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::MissingFields(_)
            | ApiError::ValidationError { .. }
            | ApiError::InvalidJson(_) => {
                tracing::debug!("Rejected request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            ApiError::LockError => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ContactResponse::failure(error_message))).into_response()
    }
}

/// Helper type for API results
pub type ApiResult<T> = Result<T, ApiError>;
