//! Affinity module - Decaying engagement points
//!
//! A gamified engagement score, decoupled from scheduling correctness:
//! correct answers add points, inactivity drains them. Architecturally
//! parallel to the scheduler (decay-over-time state machine) but the
//! two never interact.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Point ceiling.
pub const MAX_POINTS: f64 = 100.0;

/// Points drained per whole day of inactivity.
pub const DECAY_PER_DAY: f64 = 20.0;

/// Engagement point accumulator with per-day decay.
///
/// Points are fractional because fast answers earn a half-point bonus;
/// the displayed tier is `floor(points / 10)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AffinityState {
    /// Current points, in `[0, MAX_POINTS]`
    pub points: f64,
    /// Last day any points were added or decay was applied
    pub last_activity: NaiveDate,
}

impl AffinityState {
    /// Create a fresh state anchored to today.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            points: 0.0,
            last_activity: today,
        }
    }

    /// Add points (clamped into range) and mark activity for today.
    pub fn add_points(&mut self, amount: f64, today: NaiveDate) {
        self.points = (self.points + amount).clamp(0.0, MAX_POINTS);
        self.last_activity = today;
    }

    /// Apply inactivity decay: `DECAY_PER_DAY` per whole day since the
    /// last activity, at most once per distinct day transition. Returns
    /// the points removed. Calling again on the same day is a no-op.
    pub fn apply_decay(&mut self, today: NaiveDate) -> f64 {
        if self.last_activity >= today {
            return 0.0;
        }
        let gap_days = (today - self.last_activity).num_days();
        let before = self.points;
        self.points = (self.points - DECAY_PER_DAY * gap_days as f64).max(0.0);
        self.last_activity = today;
        before - self.points
    }

    /// Presentation tier in `[0, 10]`.
    pub fn tier(&self) -> u8 {
        (self.points / 10.0).floor() as u8
    }
}

// ============================================================================
// TESTS
// ============================================================================
