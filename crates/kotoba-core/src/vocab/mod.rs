//! Vocabulary module - Core item types
//!
//! A [`VocabItem`] is the fundamental unit of study: immutable textual
//! content plus mutable per-item learning state ([`ItemStats`]).
//! Serialized field names match the legacy persisted shape (`en`, `ja`,
//! `ex`, `exJa`, `stats.nextReview`) so existing data loads unchanged.

use serde::{Deserialize, Serialize};

/// Maximum mastery level. Levels live in `[0, MAX_LEVEL]`.
pub const MAX_LEVEL: u8 = 4;

/// Number of level buckets (levels `0..=MAX_LEVEL`).
pub const LEVEL_BUCKETS: usize = MAX_LEVEL as usize + 1;

// ============================================================================
// ITEM STATS
// ============================================================================

/// Per-item learning state, owned by the Item Store and written back
/// in place by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemStats {
    /// Mastery level in `[0, MAX_LEVEL]`
    pub level: u8,
    /// Next-review timestamp (ms since epoch); the item is not due
    /// before this instant
    #[serde(rename = "nextReview")]
    pub next_review: i64,
}

impl ItemStats {
    /// Clamp the level into the supported domain. Legacy data may carry
    /// levels up to 5 and beyond.
    pub fn clamp_level(&mut self) {
        if self.level > MAX_LEVEL {
            self.level = MAX_LEVEL;
        }
    }
}

// ============================================================================
// VOCAB ITEM
// ============================================================================

/// A vocabulary item: English term, Japanese meaning, part of speech,
/// example sentence and its translation, plus learning stats.
///
/// Content fields are immutable once loaded; only `stats` mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabItem {
    /// Stable integer identifier, unique within a dataset
    pub id: i64,
    /// English term
    pub en: String,
    /// Japanese meaning
    pub ja: String,
    /// Part of speech
    #[serde(default)]
    pub pos: String,
    /// Example sentence containing the term
    #[serde(default)]
    pub ex: String,
    /// Translation of the example sentence
    #[serde(default, rename = "exJa")]
    pub ex_ja: String,

    // ========== Extended dataset columns (optional, default empty) ==========
    /// Pronunciation guide
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pronunciation: String,
    /// Synonyms, as provided by the dataset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub synonyms: String,
    /// Antonyms, as provided by the dataset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub antonyms: String,
    /// Corpus frequency band
    #[serde(default, rename = "frequencyBand", skip_serializing_if = "String::is_empty")]
    pub frequency_band: String,

    /// Learning state
    #[serde(default)]
    pub stats: ItemStats,
}

impl VocabItem {
    /// Create a new unlearned item with the required content fields.
    pub fn new(id: i64, en: impl Into<String>, ja: impl Into<String>) -> Self {
        Self {
            id,
            en: en.into(),
            ja: ja.into(),
            pos: String::new(),
            ex: String::new(),
            ex_ja: String::new(),
            pronunciation: String::new(),
            synonyms: String::new(),
            antonyms: String::new(),
            frequency_band: String::new(),
            stats: ItemStats::default(),
        }
    }

    /// Check whether the item is due for review at `now_ms`.
    pub fn is_due(&self, now_ms: i64) -> bool {
        self.stats.next_review <= now_ms
    }

    /// Check whether the item has never been answered correctly.
    pub fn is_unlearned(&self) -> bool {
        self.stats.level == 0
    }
}

/// Count items per mastery level.
pub fn level_distribution(items: &[VocabItem]) -> [u32; LEVEL_BUCKETS] {
    let mut dist = [0u32; LEVEL_BUCKETS];
    for item in items {
        dist[item.stats.level.min(MAX_LEVEL) as usize] += 1;
    }
    dist
}

// ============================================================================
// TESTS
// ============================================================================
