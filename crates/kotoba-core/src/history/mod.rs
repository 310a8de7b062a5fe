//! History module - Daily progress records
//!
//! One [`HistoryEntry`] per calendar day of activity, kept in a capped
//! ring (oldest evicted). Sessions completed on the same day merge into
//! the existing entry instead of creating a second one. A separate
//! [`DailyCounter`] tracks answers per day for streak display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::vocab::LEVEL_BUCKETS;

/// Maximum number of retained history entries.
pub const HISTORY_CAP: usize = 50;

// ============================================================================
// HISTORY ENTRY
// ============================================================================

/// Aggregate record of one calendar day of study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Calendar day of activity
    pub date: NaiveDate,
    /// Questions answered that day
    pub items: u32,
    /// Correct answers that day
    pub correct: u32,
    /// Affinity points gained that day
    pub points_gained: f64,
    /// Corpus-wide level distribution snapshot after the last session
    pub level_distribution: [u32; LEVEL_BUCKETS],
    /// Running affinity total after the last session
    pub total_points: f64,
}

/// Append-only ring of daily history entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Record a completed session.
    ///
    /// Merges into the existing entry when one exists for the same date
    /// (counts summed, snapshots replaced); otherwise appends, evicting
    /// the oldest entry past [`HISTORY_CAP`].
    pub fn record(&mut self, entry: HistoryEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.date == entry.date) {
            existing.items += entry.items;
            existing.correct += entry.correct;
            existing.points_gained += entry.points_gained;
            existing.level_distribution = entry.level_distribution;
            existing.total_points = entry.total_points;
            return;
        }
        self.entries.push(entry);
        while self.entries.len() > HISTORY_CAP {
            self.entries.remove(0);
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no activity has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// DAILY COUNTER
// ============================================================================

/// Answers-per-day counter; the count resets when the stored date rolls
/// over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCounter {
    /// The day the count belongs to
    pub date: NaiveDate,
    /// Answers recorded on that day
    pub count: u32,
}

impl DailyCounter {
    /// Count one answer for `today`, resetting first on date change.
    /// Returns the new count.
    pub fn increment(&mut self, today: NaiveDate) -> u32 {
        if self.date != today {
            self.date = today;
            self.count = 0;
        }
        self.count += 1;
        self.count
    }

    /// Today's count, treating a stale date as zero.
    pub fn today_count(&self, today: NaiveDate) -> u32 {
        if self.date == today {
            self.count
        } else {
            0
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
