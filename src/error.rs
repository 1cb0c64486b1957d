use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required form field: {0}")]
    MissingField(&'static str),

    #[error("No files uploaded")]
    EmptyUpload,

    #[error("Invalid order value {token:?}: expected a comma-separated list of file indices")]
    InvalidOrderToken { token: String },

    #[error("Order index {index} out of range for {file_count} uploaded file(s)")]
    OrderIndexOutOfRange { index: usize, file_count: usize },

    #[error("Invalid magnitude {value:?}: {reason}")]
    InvalidMagnitude { value: String, reason: &'static str },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Unsupported output format for file {0:?}")]
    UnsupportedFormat(String),

    #[error("Could not decode uploaded image: {0}")]
    Decode(String),

    #[error("Could not encode response image: {0}")]
    Encode(String),

    #[error("Malformed multipart request: {0}")]
    Multipart(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        ApiError::Multipart(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingField(_)
            | ApiError::EmptyUpload
            | ApiError::InvalidOrderToken { .. }
            | ApiError::OrderIndexOutOfRange { .. }
            | ApiError::InvalidMagnitude { .. }
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownOperation(_) | ApiError::Decode(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Encode(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
