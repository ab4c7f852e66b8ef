use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::translate::TranslationOutcome;

/// Every way a translation request can fail, with its HTTP mapping
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Request envelope is malformed (not JSON, missing or mistyped `text_obj`)
    #[error("Invalid input data")]
    Validation,

    /// Every field of a batch is null
    #[error("Missing text fields")]
    MissingFields,

    #[error("Text length exceeds limit.")]
    LengthExceeded { length: usize, limit: usize },

    /// Body rejected before parsing because it is over `limits.max_body_bytes`
    #[error("Request body exceeds limit.")]
    BodyTooLarge,

    /// Single-item provider failure, carrying the outcome's reason
    #[error("{0}")]
    Translation(String),

    /// At least one batch item failed; `details` holds every outcome in dispatch order
    #[error("One or more translations failed")]
    BatchFailure { details: Vec<TranslationOutcome> },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl TranslateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::IM_A_TEAPOT,
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::LengthExceeded { .. } | Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Translation(_) | Self::BatchFailure { .. } | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::BatchFailure { details } => json!({
                "error": self.to_string(),
                "details": details,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
