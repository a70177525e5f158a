//! Interview Turn Service: produces the interviewer's next utterance.
//!
//! Stateless: the caller owns the transcript and appends the returned text.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::interview::models::{SessionContext, Transcript};
use crate::interview::reconciler::reconcile;
use crate::llm_client::LlmBackend;

/// Runs one interview turn against `llm`.
///
/// The reply is returned exactly as the model produced it.
pub async fn next_interviewer_turn(
    llm: Option<&dyn LlmBackend>,
    transcript: &Transcript,
    context: &SessionContext,
    max_field_chars: usize,
) -> Result<String, AppError> {
    let llm = llm.ok_or(AppError::BackendUnavailable)?;

    let history = reconcile(transcript, context, max_field_chars)?;
    debug!(
        prior_turns = history.prior_turns.len(),
        difficulty = %context.difficulty,
        "Reconciled interview history"
    );

    let reply = llm
        .converse(&history.prior_turns, &history.pending_message)
        .await?;

    info!(
        transcript_len = transcript.len(),
        reply_chars = reply.chars().count(),
        "Interviewer turn generated"
    );
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::{Difficulty, Turn};
    use crate::llm_client::testing::{RecordedCall, ScriptedBackend};
    use crate::llm_client::ChatRole;

    const LIMIT: usize = 20_000;

    fn hard_context() -> SessionContext {
        SessionContext {
            resume_text: "Backend engineer".to_string(),
            job_description: "Staff Engineer, Payments".to_string(),
            difficulty: Difficulty::Hard,
        }
    }

    #[tokio::test]
    async fn test_missing_backend_is_unavailable() {
        let err = next_interviewer_turn(None, &Transcript::new(), &hard_context(), LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BackendUnavailable));
    }

    #[tokio::test]
    async fn test_trailing_interviewer_makes_no_backend_call() {
        let backend = ScriptedBackend::replying(&["unused"]);
        let transcript = Transcript::from(vec![
            Turn::candidate("Hi"),
            Turn::interviewer("Tell me about yourself."),
        ]);

        let err = next_interviewer_turn(Some(&backend), &transcript, &hard_context(), LIMIT)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ClientState(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_reported() {
        let backend = ScriptedBackend::failing();
        let err = next_interviewer_turn(Some(&backend), &Transcript::new(), &hard_context(), LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_reply_is_returned_unmodified() {
        let raw = "**Hello!** I'm Alex.\n\nTell me about yourself.";
        let backend = ScriptedBackend::replying(&[raw]);
        let reply = next_interviewer_turn(Some(&backend), &Transcript::new(), &hard_context(), LIMIT)
            .await
            .unwrap();
        assert_eq!(reply, raw);
    }

    #[tokio::test]
    async fn test_two_round_conversation() {
        let backend = ScriptedBackend::replying(&[
            "What was the hardest scaling problem you solved?",
            "How did you verify the fix?",
        ]);
        let ctx = hard_context();
        let mut transcript = Transcript::new();

        transcript.append(Turn::candidate("I have 5 years...")).unwrap();
        let first = next_interviewer_turn(Some(&backend), &transcript, &ctx, LIMIT)
            .await
            .unwrap();
        transcript.append(Turn::interviewer(first.clone())).unwrap();
        transcript
            .append(Turn::candidate("Sharding our ledger"))
            .unwrap();
        next_interviewer_turn(Some(&backend), &transcript, &ctx, LIMIT)
            .await
            .unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);

        match &calls[0] {
            RecordedCall::Converse {
                prior_turns,
                new_message,
            } => {
                assert_eq!(prior_turns.len(), 2);
                assert!(prior_turns[0].text.contains("Interview Difficulty Level: Hard"));
                assert_eq!(new_message, "I have 5 years...");
            }
            other => panic!("unexpected call {other:?}"),
        }

        match &calls[1] {
            RecordedCall::Converse {
                prior_turns,
                new_message,
            } => {
                assert_eq!(prior_turns.len(), 4);
                assert_eq!(prior_turns[2].role, ChatRole::User);
                assert_eq!(prior_turns[2].text, "I have 5 years...");
                assert_eq!(prior_turns[3].role, ChatRole::Assistant);
                assert_eq!(prior_turns[3].text, first);
                assert_eq!(new_message, "Sharding our ledger");
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
}
