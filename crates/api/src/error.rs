use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinical_rag_common::CapabilityError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Fixed message for server-side failures. Internal detail stays in the
/// logs and never crosses the HTTP boundary.
const GENERIC_FAILURE: &str = "The clinical knowledge service could not process this request";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(#[from] CapabilityError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Generation(err) => {
                error!("Answer generation failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
