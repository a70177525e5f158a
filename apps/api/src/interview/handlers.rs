//! Axum route handler for the interview conversation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::models::{SessionContext, Transcript};
use crate::interview::service::next_interviewer_turn;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    #[serde(default)]
    pub history: Transcript,
    #[serde(flatten)]
    pub context: SessionContext,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub text: String,
}

/// POST /interview
///
/// Returns the interviewer's next utterance for the supplied history. The
/// history must be empty or end with the candidate's answer.
pub async fn handle_interview(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    let text = next_interviewer_turn(
        state.llm.as_deref(),
        &request.history,
        &request.context,
        state.config.prompt_field_max_chars,
    )
    .await?;

    Ok(Json(InterviewResponse { text }))
}
