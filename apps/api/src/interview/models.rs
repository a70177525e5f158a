//! Transcript data model shared by the reconciler, the turn service, the
//! evaluation service and the client session record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interview::reconciler::ReconcileError;

/// Who produced a turn. Serialized with the client's history vocabulary:
/// `"user"` for the candidate, `"model"` for the interviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "user", alias = "candidate")]
    Candidate,
    #[serde(rename = "model", alias = "interviewer")]
    Interviewer,
}

impl Speaker {
    pub fn other(self) -> Self {
        match self {
            Speaker::Candidate => Speaker::Interviewer,
            Speaker::Interviewer => Speaker::Candidate,
        }
    }
}

/// One utterance. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Speaker,
    pub content: String,
}

impl Turn {
    pub fn candidate(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Candidate,
            content: content.into(),
        }
    }

    pub fn interviewer(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Interviewer,
            content: content.into(),
        }
    }
}

/// Ordered, append-only conversation log for one session.
///
/// Decoding from JSON does not validate alternation; a transcript received
/// from a client is checked by the reconciler instead. Transcripts built with
/// [`Transcript::append`] always alternate starting with the candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checked append: the first turn must come from the candidate and every
    /// later turn must switch speaker.
    pub fn append(&mut self, turn: Turn) -> Result<(), ReconcileError> {
        let expected = self
            .last()
            .map(|t| t.role.other())
            .unwrap_or(Speaker::Candidate);
        if turn.role != expected {
            return Err(ReconcileError::InvalidTurnOrder {
                index: self.0.len(),
                expected,
                found: turn.role,
            });
        }
        self.0.push(turn);
        Ok(())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn last(&self) -> Option<&Turn> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<Vec<Turn>> for Transcript {
    /// Wraps turns as-is, without the append check.
    fn from(turns: Vec<Turn>) -> Self {
        Self(turns)
    }
}

/// Interview difficulty tier. Drives question complexity in the persona.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// Per-session inputs that shape the interviewer persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}
