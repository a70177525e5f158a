//! Axum route handler for résumé upload.

use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::resume::extract::extract_text;

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub text: String,
}

/// POST /parse-resume
///
/// Multipart body with a `file` field. The declared content type of that
/// field selects the extractor.
pub async fn handle_parse_resume(
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| {
            warn!("Rejected multipart body: {e}");
            AppError::Validation("Invalid multipart body".to_string())
        })?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| {
                warn!("Failed to read uploaded file: {e}");
                AppError::Validation("Failed to read upload".to_string())
            })?;
        upload = Some((content_type, data));
        break;
    }

    let (content_type, data) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    info!(content_type = %content_type, size = data.len(), "Parsing uploaded resume");

    let text = tokio::task::spawn_blocking(move || extract_text(&content_type, &data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))??;

    Ok(Json(ParseResumeResponse { text }))
}
