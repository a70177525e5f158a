//! Evaluation Service: scores a finished (or in-progress) interview.
//!
//! Flow: build prompt → one `generate` call → strip code fences → parse.
//! A response that does not parse as [`Evaluation`] is a terminal failure;
//! the raw text travels inside the error so the boundary can log it.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::interview::models::Transcript;
use crate::llm_client::prompts::{bound_field, fill_template, NO_FENCES_INSTRUCTION};
use crate::llm_client::{strip_json_fences, LlmBackend};

/// Structured end-of-session result.
///
/// Fields are advisory: beyond parsing into this shape nothing is checked,
/// so `score` may fall outside 0–10 if the model says so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: i64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub feedback: String,
}

/// Builds the single evaluation prompt.
pub fn build_evaluation_prompt(
    transcript: &Transcript,
    job_description: &str,
    max_field_chars: usize,
) -> Result<String, AppError> {
    let chat_history_json = serde_json::to_string(transcript)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize transcript: {e}")))?;

    Ok(fill_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            (
                "job_description",
                bound_field(job_description, max_field_chars),
            ),
            ("chat_history_json", &chat_history_json),
            ("no_fences_instruction", NO_FENCES_INSTRUCTION),
        ],
    ))
}

/// Sanitize-then-parse: strips surrounding code fences, then requires the
/// exact four-field shape.
pub fn parse_evaluation(raw: &str) -> Result<Evaluation, AppError> {
    serde_json::from_str(strip_json_fences(raw)).map_err(|e| AppError::MalformedEvaluation {
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}

/// Runs the evaluation call against `llm`.
pub async fn evaluate_interview(
    llm: Option<&dyn LlmBackend>,
    transcript: &Transcript,
    job_description: &str,
    max_field_chars: usize,
) -> Result<Evaluation, AppError> {
    let llm = llm.ok_or(AppError::BackendUnavailable)?;

    let prompt = build_evaluation_prompt(transcript, job_description, max_field_chars)?;
    let raw = llm.generate(&prompt).await?;
    let evaluation = parse_evaluation(&raw)?;

    info!(
        transcript_len = transcript.len(),
        score = evaluation.score,
        "Interview evaluated"
    );
    Ok(evaluation)
}
