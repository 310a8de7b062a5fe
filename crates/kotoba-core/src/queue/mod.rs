//! Queue module - Session configuration and queue building
//!
//! Selects which items to quiz in a session under competing priorities:
//! explicit level targeting beats the unlearned filter, which beats the
//! automatic mix of due reviews and unlearned items. The winning
//! candidate set is shuffled uniformly and truncated to the configured
//! limit.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::quiz::QuizMethod;
use crate::vocab::VocabItem;

/// Default per-question timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default session size limit.
pub const DEFAULT_LIMIT: usize = 10;

// ============================================================================
// CONFIG
// ============================================================================

/// Level-targeting setting: quiz only items at a specific mastery level,
/// or let the builder choose candidates automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LevelTarget {
    /// No explicit target
    #[default]
    Automatic,
    /// Only items at exactly this level
    Level(u8),
}

/// Candidate filter applied when no level target is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProblemFilter {
    /// Due reviews first, then unlearned items
    #[default]
    Automatic,
    /// Only items that were never answered correctly (level 0)
    Unlearned,
}

/// Resolved session configuration. Also serves as the persisted user
/// preference blob; serde defaults keep partial blobs loading cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Explicit level targeting, wins over the problem filter
    pub target_level: LevelTarget,
    /// Candidate filter for non-targeted sessions
    pub problem_filter: ProblemFilter,
    /// Presentation-format override
    pub method: QuizMethod,
    /// Maximum queue length
    pub limit: usize,
    /// Per-question timeout in milliseconds
    pub timeout_ms: u64,
    /// Show the priming (preview) screen before quizzing
    pub priming: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_level: LevelTarget::Automatic,
            problem_filter: ProblemFilter::Automatic,
            method: QuizMethod::Automatic,
            limit: DEFAULT_LIMIT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            priming: false,
        }
    }
}

// ============================================================================
// QUEUE BUILDER
// ============================================================================

/// Queue building error
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The corpus holds no items at all
    #[error("nothing to study: the corpus is empty")]
    NothingToStudy,
}

/// Build the ordered, size-bounded session queue.
///
/// The returned items are deep copies: the session displays state as of
/// selection time while the Item Store's live copies keep mutating.
/// Guaranteed non-empty whenever `items` is non-empty.
pub fn build_queue(
    items: &[VocabItem],
    config: &SessionConfig,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<Vec<VocabItem>, QueueError> {
    if items.is_empty() {
        return Err(QueueError::NothingToStudy);
    }

    let now_ms = now.timestamp_millis();

    let mut candidates: Vec<VocabItem> = match (config.target_level, config.problem_filter) {
        (LevelTarget::Level(target), _) => items
            .iter()
            .filter(|w| w.stats.level == target)
            .cloned()
            .collect(),
        (LevelTarget::Automatic, ProblemFilter::Unlearned) => {
            items.iter().filter(|w| w.is_unlearned()).cloned().collect()
        }
        (LevelTarget::Automatic, ProblemFilter::Automatic) => {
            // Due reviews ahead of unlearned items. The concatenation
            // order is unobservable after the shuffle below; it is kept
            // for parity with the selection tiers, not as a priority
            // signal.
            let mut due: Vec<VocabItem> = items
                .iter()
                .filter(|w| w.is_due(now_ms) && w.stats.level > 0)
                .cloned()
                .collect();
            let unlearned = items.iter().filter(|w| w.is_unlearned()).cloned();
            due.extend(unlearned);
            due
        }
    };

    // Absolute fallback: quiz the whole corpus rather than nothing.
    if candidates.is_empty() {
        tracing::debug!("queue tiers empty, falling back to the full corpus");
        candidates = items.to_vec();
    }

    candidates.shuffle(rng);
    candidates.truncate(config.limit);

    tracing::debug!(selected = candidates.len(), limit = config.limit, "session queue built");
    Ok(candidates)
}

// ============================================================================
// TESTS
// ============================================================================
