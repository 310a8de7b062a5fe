//! # Kotoba Core
//!
//! Spaced-repetition vocabulary trainer engine:
//!
//! - **Fixed-table scheduling**: mastery levels 0-4, review offsets of
//!   0/1/3/7/14 days indexed by the new level
//! - **Latency-graded answers**: correct answers grade bad/good/great/excellent
//!   against the per-question timeout
//! - **Adaptive quiz formats**: recognition, masked recall, production, and
//!   cloze fill-in, derived from mastery level
//! - **Session state machine**: present/answer/advance protocol with
//!   double-submission guards and resumable snapshots
//! - **Engagement tracking**: decaying affinity points plus a capped daily
//!   history log
//!
//! All state persists as JSON through a pluggable key-value store, with an
//! in-memory backend for tests and sessions and a SQLite backend for
//! durable data. Legacy persisted collections (bare arrays with unbounded
//! levels) upgrade transparently on load.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kotoba_core::{MemoryKv, SessionConfig, SqliteKv, Trainer};
//!
//! let persistent = Box::new(SqliteKv::open("kotoba.db")?);
//! let ephemeral = Box::new(MemoryKv::new());
//! let csv = std::fs::read_to_string("words.csv")?;
//!
//! let mut trainer = Trainer::open(
//!     persistent, ephemeral, "lab_data_v30", Some(&csv), chrono::Utc::now(),
//! )?;
//!
//! let mut rng = rand::thread_rng();
//! trainer.start_session(SessionConfig::default(), chrono::Utc::now(), &mut rng)?;
//! let question = trainer.present_next(&mut rng, chrono::Utc::now())?;
//! trainer.answer(Some(question.answer_index), chrono::Utc::now())?;
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod affinity;
pub mod corpus;
pub mod history;
pub mod queue;
pub mod quiz;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod trainer;
pub mod vocab;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Vocabulary types
pub use vocab::{level_distribution, ItemStats, VocabItem, LEVEL_BUCKETS, MAX_LEVEL};

// Scheduling
pub use scheduler::{
    schedule, AnswerEvent, LevelTransition, Quality, MS_PER_DAY, REVIEW_OFFSET_DAYS,
};

// Quiz formats
pub use quiz::{
    blank_example, select_type, supports_fill_in, QuizMethod, QuizType, TypeSelection,
    CLOZE_BLANK,
};

// Queue building and configuration
pub use queue::{
    build_queue, LevelTarget, ProblemFilter, QueueError, SessionConfig, DEFAULT_LIMIT,
    DEFAULT_TIMEOUT_MS,
};

// Sessions
pub use session::{
    answer_text, draw_distractors, Phase, Question, ResultRecord, Session, SessionError,
    SessionRunner, CHOICE_COUNT,
};

// Engagement and history
pub use affinity::{AffinityState, DECAY_PER_DAY, MAX_POINTS};
pub use history::{DailyCounter, HistoryEntry, HistoryLog, HISTORY_CAP};

// Corpus ingestion
pub use corpus::{namespace_for, parse_corpus, parse_manifest, resolve, CorpusError, Dataset};

// Storage layer
pub use store::{ItemStore, KvStore, MemoryKv, SqliteKv, StoreError};

// Facade
pub use trainer::{Trainer, TrainerError};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        AffinityState, AnswerEvent, HistoryEntry, HistoryLog, ItemStore, KvStore,
        LevelTransition, MemoryKv, Phase, Quality, Question, QuizMethod, QuizType, Session,
        SessionConfig, SessionRunner, SqliteKv, Trainer, TrainerError, VocabItem,
    };
}
