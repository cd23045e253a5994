use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Mode;

/// Layout version of the persisted progress payload.
pub const SCHEMA_VERSION: u32 = 1;

/// Correct answers needed per star on the mode-select screen.
pub const SCORES_PER_STAR: u32 = 5;

/// Stars cap out at five per mode.
pub const MAX_STARS: u32 = 5;

/// Best-score profile persisted across play sessions.
///
/// Per-mode scores follow best-score-ever semantics: they only ever increase.
/// `total_score` and `rewards` are running counters and are likewise
/// monotone. Exactly one logical copy exists; callers hold read-only
/// snapshots and re-fetch after each mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    schema_version: u32,
    counting: u32,
    addition: u32,
    subtraction: u32,
    shapes: u32,
    patterns: u32,
    total_score: u32,
    rewards: u32,
    last_played: DateTime<Utc>,
}

impl ProgressRecord {
    /// The zero-default record a fresh player starts from.
    #[must_use]
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            counting: 0,
            addition: 0,
            subtraction: 0,
            shapes: 0,
            patterns: 0,
            total_score: 0,
            rewards: 0,
            last_played: now,
        }
    }

    /// Best score ever reached in the given mode.
    #[must_use]
    pub fn best(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Counting => self.counting,
            Mode::Addition => self.addition,
            Mode::Subtraction => self.subtraction,
            Mode::Shapes => self.shapes,
            Mode::Patterns => self.patterns,
        }
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn rewards(&self) -> u32 {
        self.rewards
    }

    #[must_use]
    pub fn last_played(&self) -> DateTime<Utc> {
        self.last_played
    }

    #[must_use]
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// True when the payload was written by the current layout.
    #[must_use]
    pub fn is_current_schema(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }

    /// Folds a finished (or in-progress) session score into the record.
    ///
    /// The per-mode best never decreases; the session score is added to the
    /// running total as-is.
    pub fn apply_result(&mut self, mode: Mode, session_score: u32) {
        let best = match mode {
            Mode::Counting => &mut self.counting,
            Mode::Addition => &mut self.addition,
            Mode::Subtraction => &mut self.subtraction,
            Mode::Shapes => &mut self.shapes,
            Mode::Patterns => &mut self.patterns,
        };
        *best = (*best).max(session_score);
        self.total_score = self.total_score.saturating_add(session_score);
    }

    /// Bumps the lifetime reward counter.
    pub fn apply_reward(&mut self) {
        self.rewards = self.rewards.saturating_add(1);
    }

    /// Stamps the record with the time of the latest play.
    pub fn mark_played(&mut self, at: DateTime<Utc>) {
        self.last_played = at;
    }

    /// Stars earned in a mode: one per [`SCORES_PER_STAR`] correct answers,
    /// capped at [`MAX_STARS`].
    #[must_use]
    pub fn stars_for(&self, mode: Mode) -> u32 {
        (self.best(mode) / SCORES_PER_STAR).min(MAX_STARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn empty_record_is_all_zeroes() {
        let record = ProgressRecord::empty(fixed_now());
        for mode in Mode::ALL {
            assert_eq!(record.best(mode), 0);
        }
        assert_eq!(record.total_score(), 0);
        assert_eq!(record.rewards(), 0);
        assert!(record.is_current_schema());
    }

    #[test]
    fn best_score_never_decreases() {
        let mut record = ProgressRecord::empty(fixed_now());
        record.apply_result(Mode::Addition, 3);
        record.apply_result(Mode::Addition, 2);

        assert_eq!(record.best(Mode::Addition), 3);
        assert_eq!(record.total_score(), 5);
    }

    #[test]
    fn apply_result_leaves_other_modes_alone() {
        let mut record = ProgressRecord::empty(fixed_now());
        record.apply_result(Mode::Shapes, 4);

        assert_eq!(record.best(Mode::Shapes), 4);
        assert_eq!(record.best(Mode::Counting), 0);
        assert_eq!(record.best(Mode::Patterns), 0);
    }

    #[test]
    fn rewards_accumulate() {
        let mut record = ProgressRecord::empty(fixed_now());
        record.apply_reward();
        record.apply_reward();
        assert_eq!(record.rewards(), 2);
    }

    #[test]
    fn stars_scale_with_best_score_and_cap() {
        let mut record = ProgressRecord::empty(fixed_now());
        assert_eq!(record.stars_for(Mode::Counting), 0);

        record.apply_result(Mode::Counting, 12);
        assert_eq!(record.stars_for(Mode::Counting), 2);

        record.apply_result(Mode::Counting, 99);
        assert_eq!(record.stars_for(Mode::Counting), MAX_STARS);
    }

    #[test]
    fn record_serializes_with_historical_keys() {
        let record = ProgressRecord::empty(fixed_now());
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("totalScore").is_some());
        assert!(json.get("lastPlayed").is_some());
        assert!(json.get("schemaVersion").is_some());
        assert!(json.get("counting").is_some());
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut record = ProgressRecord::empty(fixed_now());
        record.apply_result(Mode::Patterns, 7);
        record.apply_reward();

        let json = serde_json::to_string(&record).unwrap();
        let parsed: ProgressRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
