//! History Reconciler: turns a client-held transcript into a stateless chat call.
//!
//! Every request rebuilds the conversation from scratch:
//!
//! ```text
//! [persona (user), acknowledgement (assistant)] ++ transcript[..n-1]   -> prior turns
//! transcript[n-1] (must be the candidate)                              -> pending message
//! ```
//!
//! An empty transcript sends the synthetic kickoff message instead. A transcript
//! ending with the interviewer is waiting on the candidate and is rejected.

use thiserror::Error;
use tracing::warn;

use crate::interview::models::{SessionContext, Speaker, Transcript};
use crate::interview::prompts::{
    INTERVIEWER_PERSONA_TEMPLATE, KICKOFF_MESSAGE, PERSONA_ACKNOWLEDGEMENT,
};
use crate::llm_client::prompts::{bound_field, fill_template};
use crate::llm_client::{ChatRole, ChatTurn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("invalid turn order at index {index}: expected {expected:?}, found {found:?}")]
    InvalidTurnOrder {
        index: usize,
        expected: Speaker,
        found: Speaker,
    },
}

/// Output of reconciliation: alternating context plus the message to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledHistory {
    pub prior_turns: Vec<ChatTurn>,
    pub pending_message: String,
}

impl From<Speaker> for ChatRole {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::Candidate => ChatRole::User,
            Speaker::Interviewer => ChatRole::Assistant,
        }
    }
}

/// Builds the persona instructions for this session.
///
/// `max_field_chars` bounds the résumé and job description independently.
pub fn build_persona(context: &SessionContext, max_field_chars: usize) -> String {
    let job_description = bound_field(&context.job_description, max_field_chars);
    let resume_text = bound_field(&context.resume_text, max_field_chars);

    if job_description.len() < context.job_description.trim().len()
        || resume_text.len() < context.resume_text.trim().len()
    {
        warn!(
            max_field_chars,
            "Truncated session context before building interviewer persona"
        );
    }

    let difficulty = context.difficulty.to_string();
    fill_template(
        INTERVIEWER_PERSONA_TEMPLATE,
        &[
            ("job_description", job_description),
            ("resume_text", resume_text),
            ("difficulty", &difficulty),
        ],
    )
}

/// The synthetic persona/acknowledgement exchange placed ahead of real history.
pub fn priming_pair(context: &SessionContext, max_field_chars: usize) -> [ChatTurn; 2] {
    [
        ChatTurn {
            role: ChatRole::User,
            text: build_persona(context, max_field_chars),
        },
        ChatTurn {
            role: ChatRole::Assistant,
            text: PERSONA_ACKNOWLEDGEMENT.to_string(),
        },
    ]
}

/// Splits `transcript` into prior turns and the pending candidate message.
///
/// Pure: identical inputs always produce identical output.
pub fn reconcile(
    transcript: &Transcript,
    context: &SessionContext,
    max_field_chars: usize,
) -> Result<ReconciledHistory, ReconcileError> {
    let turns = transcript.turns();

    let (history, pending_message) = match turns.split_last() {
        None => (turns, KICKOFF_MESSAGE.to_string()),
        Some((last, earlier)) if last.role == Speaker::Candidate => {
            (earlier, last.content.clone())
        }
        Some((last, _)) => {
            return Err(ReconcileError::InvalidTurnOrder {
                index: turns.len() - 1,
                expected: Speaker::Candidate,
                found: last.role,
            })
        }
    };

    // Priming ends on the interviewer, so real history must open with the
    // candidate and alternate from there.
    let mut expected = Speaker::Candidate;
    for (index, turn) in history.iter().enumerate() {
        if turn.role != expected {
            return Err(ReconcileError::InvalidTurnOrder {
                index,
                expected,
                found: turn.role,
            });
        }
        expected = expected.other();
    }

    let mut prior_turns = Vec::with_capacity(history.len() + 2);
    prior_turns.extend(priming_pair(context, max_field_chars));
    prior_turns.extend(history.iter().map(|turn| ChatTurn {
        role: turn.role.into(),
        text: turn.content.clone(),
    }));

    Ok(ReconciledHistory {
        prior_turns,
        pending_message,
    })
}
