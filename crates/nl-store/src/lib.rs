//! Persistent progression scores and unlock gating for the notenleer
//! trainer.
//!
//! Scores accumulate per difficulty level across sessions; a level
//! unlocks once the preceding level's total reaches the threshold.
//! Storage failures never surface to the learner: reads fall back to
//! an all-zero record, writes are dropped with a warning, and the
//! in-memory record stays authoritative for the rest of the run.

mod record;
mod storage;

pub use record::ProgressionRecord;
pub use storage::{FileStorage, MemStorage, Storage};

use nl_theory::Difficulty;

/// Cumulative score required on a level before the next one unlocks.
pub const UNLOCK_THRESHOLD: u32 = 50;

/// Key the record is persisted under.
pub const STORAGE_KEY: &str = "notenleer-progress";

/// The progression store: an in-memory record with write-through
/// persistence.
pub struct ProgressionStore<S: Storage> {
    storage: S,
    record: ProgressionRecord,
}

impl<S: Storage> ProgressionStore<S> {
    /// Load the persisted record, merging over all-zero defaults.
    /// Absent or unreadable data degrades to the defaults.
    pub fn load(storage: S) -> Self {
        let record = match storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("corrupt progression record, starting fresh: {}", e);
                    ProgressionRecord::default()
                }
            },
            Ok(None) => ProgressionRecord::default(),
            Err(e) => {
                log::warn!("failed to read progression record: {}", e);
                ProgressionRecord::default()
            }
        };
        Self { storage, record }
    }

    pub fn record(&self) -> &ProgressionRecord {
        &self.record
    }

    /// Cumulative score for a level.
    pub fn score(&self, difficulty: Difficulty) -> u32 {
        self.record.score(difficulty)
    }

    /// Add a session's score to a level's running total and persist.
    ///
    /// Non-positive deltas are no-ops. Returns true iff this call
    /// moved the total from below the unlock threshold to at or above
    /// it. The record is updated before the result is reported, so a
    /// caller can trust an unlock it observes.
    pub fn add_score(&mut self, difficulty: Difficulty, delta: i32) -> bool {
        if delta <= 0 {
            return false;
        }
        let total = self.record.score_mut(difficulty);
        let before = *total;
        *total = total.saturating_add(delta as u32);
        let crossed = before < UNLOCK_THRESHOLD && *total >= UNLOCK_THRESHOLD;
        self.persist();
        crossed
    }

    /// The first level is always available; each later level gates on
    /// the preceding level's cumulative score.
    pub fn is_unlocked(&self, difficulty: Difficulty) -> bool {
        match difficulty.previous() {
            None => true,
            Some(previous) => self.score(previous) >= UNLOCK_THRESHOLD,
        }
    }

    /// Progress toward a level's own unlock contribution, 0-100.
    pub fn progress_percent(&self, difficulty: Difficulty) -> u8 {
        let score = self.score(difficulty) as u64;
        let threshold = UNLOCK_THRESHOLD as u64;
        let percent = (score * 100 + threshold / 2) / threshold;
        percent.min(100) as u8
    }

    /// Zero every level and persist. Explicit user action only.
    pub fn reset(&mut self) {
        self.record = ProgressionRecord::default();
        self.persist();
    }

    /// Write-through; a failed write is dropped with a warning and the
    /// in-memory record remains authoritative.
    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.record) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to encode progression record: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(STORAGE_KEY, &json) {
            log::warn!("failed to persist progression record: {}", e);
        }
    }
}
