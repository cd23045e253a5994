use std::sync::Arc;

use tracing::warn;

use mathblast_core::Clock;
use mathblast_core::model::{Mode, ProgressRecord};
use storage::repository::KeyValueStore;

/// Fixed key the progress record is stored under.
pub const STORAGE_KEY: &str = "mathblast.progress";

/// Loads and mutates the single persisted progress record.
///
/// Persistence is fail-soft: a missing, corrupt, or unwritable backend
/// degrades to the zero-default record. Failures are logged, never
/// surfaced, so the game keeps running with non-persisted progress.
#[derive(Clone)]
pub struct ProgressStore {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, kv }
    }

    /// The persisted record, or the zero-default record if nothing usable
    /// is stored.
    pub async fn load(&self) -> ProgressRecord {
        let stored = match self.kv.get(STORAGE_KEY).await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "progress storage unavailable, using defaults");
                None
            }
        };
        let Some(raw) = stored else {
            return ProgressRecord::empty(self.clock.now());
        };

        match serde_json::from_str::<ProgressRecord>(&raw) {
            Ok(record) if record.is_current_schema() => record,
            Ok(record) => {
                warn!(
                    found = record.schema_version(),
                    "stored progress has an unknown schema version, using defaults"
                );
                ProgressRecord::empty(self.clock.now())
            }
            Err(err) => {
                warn!(error = %err, "stored progress is corrupt, using defaults");
                ProgressRecord::empty(self.clock.now())
            }
        }
    }

    /// Folds a session score into the record (best-score semantics),
    /// persists, and returns the new record.
    pub async fn record_result(&self, mode: Mode, session_score: u32) -> ProgressRecord {
        let mut record = self.load().await;
        record.apply_result(mode, session_score);
        self.persist(&mut record).await;
        record
    }

    /// Bumps the lifetime reward counter, persists, and returns the new
    /// record.
    pub async fn record_reward(&self) -> ProgressRecord {
        let mut record = self.load().await;
        record.apply_reward();
        self.persist(&mut record).await;
        record
    }

    /// Clears all persisted progress; the next [`load`](Self::load) returns
    /// defaults.
    pub async fn reset(&self) {
        if let Err(err) = self.kv.remove(STORAGE_KEY).await {
            warn!(error = %err, "failed to reset progress");
        }
    }

    async fn persist(&self, record: &mut ProgressRecord) {
        record.mark_played(self.clock.now());
        match serde_json::to_string(record) {
            Ok(payload) => {
                if let Err(err) = self.kv.set(STORAGE_KEY, &payload).await {
                    warn!(error = %err, "failed to persist progress");
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to serialize progress");
            }
        }
    }
}
