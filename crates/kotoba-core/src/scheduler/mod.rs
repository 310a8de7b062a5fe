//! Scheduler module - Fixed-table spaced-repetition scheduling
//!
//! Maps an answer event (correctness, response latency, hint usage) to a
//! mastery-level transition and a next-review timestamp. The interval
//! table is indexed by the *new* level:
//!
//! | level | next review |
//! |-------|-------------|
//! | 0     | immediately |
//! | 1     | +1 day      |
//! | 2     | +3 days     |
//! | 3     | +7 days     |
//! | 4     | +14 days    |
//!
//! This fixed-table scheme replaces the earlier multiplicative-interval
//! scheme; legacy data written by that scheme is tolerated via load-time
//! migration (see `store::migrations`), never re-interpreted here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vocab::{VocabItem, MAX_LEVEL};

/// Day offset until the next review, indexed by the new mastery level.
pub const REVIEW_OFFSET_DAYS: [i64; 5] = [0, 1, 3, 7, 14];

/// Milliseconds per day.
pub const MS_PER_DAY: i64 = 86_400_000;

// ============================================================================
// QUALITY
// ============================================================================

/// Classification of an answer: incorrect answers are always `Bad`;
/// correct answers grade by response latency against the per-question
/// timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Incorrect answer (including timer expiry)
    Bad,
    /// Correct, slower than half the timeout
    Good,
    /// Correct within half the timeout
    Great,
    /// Correct within a quarter of the timeout
    Excellent,
}

impl Quality {
    /// Classify an answer. Latency thresholds only apply to correct
    /// answers.
    pub fn classify(correct: bool, elapsed_ms: u64, timeout_ms: u64) -> Self {
        if !correct {
            Quality::Bad
        } else if elapsed_ms <= timeout_ms / 4 {
            Quality::Excellent
        } else if elapsed_ms <= timeout_ms / 2 {
            Quality::Great
        } else {
            Quality::Good
        }
    }

    /// Level increment awarded for a correct answer of this quality.
    pub fn level_gain(self) -> u8 {
        match self {
            Quality::Bad => 0,
            Quality::Good => 1,
            Quality::Great => 2,
            Quality::Excellent => 3,
        }
    }

    /// Fast answers earn the affinity bonus.
    pub fn is_fast(self) -> bool {
        matches!(self, Quality::Great | Quality::Excellent)
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Bad => write!(f, "bad"),
            Quality::Good => write!(f, "good"),
            Quality::Great => write!(f, "great"),
            Quality::Excellent => write!(f, "excellent"),
        }
    }
}

// ============================================================================
// ANSWER EVENT / LEVEL TRANSITION
// ============================================================================

/// One answered quiz question, consumed exactly once by [`schedule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvent {
    /// The item being answered
    pub item_id: i64,
    /// Whether the selected choice was correct
    pub correct: bool,
    /// Response latency in milliseconds
    pub elapsed_ms: u64,
    /// Whether the mask-reveal hint was used. Recorded on the outcome;
    /// has no scheduling effect under the fixed-table scheme.
    pub hint_used: bool,
}

/// Result of scheduling one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTransition {
    /// The item that transitioned
    pub item_id: i64,
    /// Level before the answer
    pub old_level: u8,
    /// Level after the answer, in `[0, MAX_LEVEL]`
    pub new_level: u8,
    /// Answer quality classification
    pub quality: Quality,
}

// ============================================================================
// SCHEDULE
// ============================================================================

/// Apply one answer event to an item's learning state.
///
/// Writes the new level and next-review timestamp back into
/// `item.stats` before returning; the caller persists the Item Store
/// exactly once per answer and must not retry the write.
pub fn schedule(
    item: &mut VocabItem,
    event: &AnswerEvent,
    timeout_ms: u64,
    now: DateTime<Utc>,
) -> LevelTransition {
    debug_assert_eq!(item.id, event.item_id);

    let old_level = item.stats.level;
    let quality = Quality::classify(event.correct, event.elapsed_ms, timeout_ms);

    let new_level = if event.correct {
        (old_level + quality.level_gain()).min(MAX_LEVEL)
    } else {
        old_level.saturating_sub(1)
    };

    item.stats.level = new_level;
    item.stats.next_review =
        now.timestamp_millis() + REVIEW_OFFSET_DAYS[new_level as usize] * MS_PER_DAY;

    LevelTransition {
        item_id: item.id,
        old_level,
        new_level,
        quality,
    }
}

// ============================================================================
// TESTS
// ============================================================================
