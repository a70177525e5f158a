//! Client-side session record: the transcript store plus the inputs and
//! result of one mock interview.
//!
//! The HTTP service never holds this state. A client keeps an
//! [`InterviewSession`], sends its transcript and [`SessionContext`] with every
//! request, and appends what comes back.

pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evaluation::evaluator::Evaluation;
use crate::interview::models::{Difficulty, SessionContext, Transcript, Turn};
use crate::interview::prompts::KICKOFF_MESSAGE;
use crate::interview::reconciler::ReconcileError;

/// Key under which the single client session is persisted.
pub const SESSION_STORAGE_KEY: &str = "ai-interview-storage";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Interviewing,
    Completed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is {0:?}, not interviewing")]
    NotInterviewing(SessionStatus),

    #[error(transparent)]
    TurnOrder(#[from] ReconcileError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    pub resume_text: String,
    pub job_description: String,
    pub chat_history: Transcript,
    pub evaluation: Option<Evaluation>,
    pub status: SessionStatus,
    pub difficulty: Difficulty,
}

impl InterviewSession {
    /// Begins a new interview with fresh inputs and an empty transcript.
    pub fn start(
        &mut self,
        resume_text: impl Into<String>,
        job_description: impl Into<String>,
        difficulty: Difficulty,
    ) {
        self.resume_text = resume_text.into();
        self.job_description = job_description.into();
        self.difficulty = difficulty;
        self.chat_history.clear();
        self.evaluation = None;
        self.status = SessionStatus::Interviewing;
    }

    /// The context sent alongside the transcript on every interview request.
    pub fn context(&self) -> SessionContext {
        SessionContext {
            resume_text: self.resume_text.clone(),
            job_description: self.job_description.clone(),
            difficulty: self.difficulty,
        }
    }

    /// Appends the candidate's answer.
    pub fn record_answer(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_interviewing()?;
        self.chat_history.append(Turn::candidate(text))?;
        Ok(())
    }

    /// Appends the interviewer's reply.
    ///
    /// The reply to an empty transcript answered the synthetic kickoff, so the
    /// kickoff is stored first as the opening candidate turn. The stored
    /// history then matches what the model saw and keeps alternating.
    pub fn record_reply(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_interviewing()?;
        if self.chat_history.is_empty() {
            self.chat_history.append(Turn::candidate(KICKOFF_MESSAGE))?;
        }
        self.chat_history.append(Turn::interviewer(text))?;
        Ok(())
    }

    /// Turns to display: the stored kickoff is hidden.
    pub fn visible_turns(&self) -> &[Turn] {
        match self.chat_history.turns() {
            [first, rest @ ..] if first == &Turn::candidate(KICKOFF_MESSAGE) => rest,
            turns => turns,
        }
    }

    /// Stores the evaluation (replacing any earlier one) and ends the interview.
    pub fn complete(&mut self, evaluation: Evaluation) {
        self.evaluation = Some(evaluation);
        self.status = SessionStatus::Completed;
    }

    /// Drops the conversation but keeps résumé, job description and difficulty.
    pub fn clear_chat(&mut self) {
        self.chat_history.clear();
        self.evaluation = None;
        self.status = SessionStatus::Idle;
    }

    /// Back to a blank session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn ensure_interviewing(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Interviewing => Ok(()),
            other => Err(SessionError::NotInterviewing(other)),
        }
    }
}
