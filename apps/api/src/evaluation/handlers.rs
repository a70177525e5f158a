//! Axum route handler for end-of-session evaluation.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::evaluation::evaluator::{evaluate_interview, Evaluation};
use crate::interview::models::Transcript;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[serde(default)]
    pub history: Transcript,
    pub job_description: String,
}

/// POST /evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, AppError> {
    let evaluation = evaluate_interview(
        state.llm.as_deref(),
        &request.history,
        &request.job_description,
        state.config.prompt_field_max_chars,
    )
    .await?;

    Ok(Json(evaluation))
}
