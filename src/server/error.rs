//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::pipeline::ProcessError;

/// Terminal failures of a summarize request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file provided.")]
    NoFile,

    #[error("No extractable text found in the PDF.")]
    NoExtractableText,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFile | ApiError::NoExtractableText => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::NoExtractableText => ApiError::NoExtractableText,
            ProcessError::Extraction(e) => ApiError::internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(message) = &self {
            tracing::error!(target: "server", "request failed: {message}");
        } else {
            crate::debug_event!("server", "rejected", "{}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
