//! Session module - One quiz run from queue to summary
//!
//! A [`Session`] is the serializable record of one quiz run: the frozen
//! queue, the cursor, and per-question results. The [`SessionRunner`]
//! wraps it in a phase state machine that enforces the
//! present/answer/advance protocol and guards against double
//! submissions. Timing is the host's job; the runner only interprets
//! the timestamps it is handed.

mod distractors;
mod runner;

pub use distractors::{answer_text, draw_distractors, CHOICE_COUNT};
pub use runner::{Phase, Question, SessionRunner};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::queue::SessionConfig;
use crate::scheduler::LevelTransition;
use crate::vocab::VocabItem;

/// Session error
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An operation was invoked in the wrong phase
    #[error("operation not valid in phase {0:?}")]
    Phase(Phase),
    /// The corpus lacks enough distinct answers to build a choice set
    #[error("corpus too small to draw distractors")]
    CorpusTooSmall,
}

/// Outcome of one answered question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// The level change the scheduler applied
    pub transition: LevelTransition,
    /// Whether the chosen answer was correct
    pub correct: bool,
    /// Whether the hint was revealed before answering
    pub hint_used: bool,
}

/// Serializable state of one quiz run.
///
/// The queue holds deep copies frozen at selection time; the Item
/// Store's live items keep mutating underneath.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier
    pub id: String,
    /// Frozen question queue
    pub queue: Vec<VocabItem>,
    /// Cursor into the queue
    pub index: usize,
    /// One record per answered question
    pub results: Vec<ResultRecord>,
    /// Config the session was started with
    pub config: SessionConfig,
    /// Whether this session was already written to history
    pub saved: bool,
    /// Affinity points earned so far
    pub points_gained: f64,
}

impl Session {
    /// Start a fresh session over `queue`.
    pub fn new(queue: Vec<VocabItem>, config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            queue,
            index: 0,
            results: Vec::new(),
            config,
            saved: false,
            points_gained: 0.0,
        }
    }

    /// Number of correctly answered questions so far.
    pub fn correct_count(&self) -> u32 {
        self.results.iter().filter(|r| r.correct).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_state() {
        let queue = vec![VocabItem::new(1, "run", "走る")];
        let session = Session::new(queue, SessionConfig::default());
        assert_eq!(session.index, 0);
        assert!(session.results.is_empty());
        assert!(!session.saved);
        assert!(!session.id.is_empty());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::new(Vec::new(), SessionConfig::default());
        let b = Session::new(Vec::new(), SessionConfig::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut session = Session::new(
            vec![VocabItem::new(1, "run", "走る")],
            SessionConfig::default(),
        );
        session.points_gained = 2.5;
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, session.id);
        assert_eq!(back.points_gained, 2.5);
        assert_eq!(back.queue.len(), 1);
    }
}
