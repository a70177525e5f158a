use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::reconciler::ReconcileError;
use crate::llm_client::LlmError;
use crate::resume::extract::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only the code and a generic message reach the client; upstream detail and
/// raw model output are logged here and dropped.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Client state error: {0}")]
    ClientState(#[from] ReconcileError),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("LLM backend is not configured")]
    BackendUnavailable,

    #[error("Upstream LLM error: {0}")]
    Upstream(#[from] LlmError),

    #[error("Malformed evaluation: {reason}")]
    MalformedEvaluation { reason: String, raw: String },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedType(content_type) => AppError::UnsupportedType(content_type),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ClientState(e) => {
                tracing::warn!("Rejected client transcript: {e}");
                (
                    StatusCode::BAD_REQUEST,
                    "CLIENT_STATE_ERROR",
                    "Waiting for the candidate's answer".to_string(),
                )
            }
            AppError::UnsupportedType(content_type) => {
                tracing::warn!("Unsupported upload type: {content_type}");
                (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_TYPE",
                    "Unsupported file type".to_string(),
                )
            }
            AppError::BackendUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "BACKEND_UNAVAILABLE",
                "The interview model is not configured".to_string(),
            ),
            AppError::Upstream(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::MalformedEvaluation { reason, raw } => {
                tracing::error!(raw = %raw, "Failed to parse evaluation: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_EVALUATION",
                    "Failed to parse evaluation".to_string(),
                )
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    "Failed to parse file".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
