//! Stage progression record
//!
//! One integer survives between sessions: the highest stage the player has
//! unlocked. Monotonically non-decreasing, default 1.

use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;

/// Persisted progression marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Highest stage ever reached
    pub best_stage: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self { best_stage: 1 }
    }
}

impl Progress {
    /// Storage key
    const STORAGE_KEY: &'static str = "burger_brawl_progress";

    /// Fresh progression (stage 1 unlocked).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reached stage. Returns true iff it beats the previous best.
    pub fn record_stage(&mut self, stage: u32) -> bool {
        if stage > self.best_stage {
            self.best_stage = stage;
            true
        } else {
            false
        }
    }

    /// Load progression from the store, falling back to a fresh record.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            if let Ok(progress) = serde_json::from_str::<Progress>(&json) {
                log::info!("Loaded progress (best stage {})", progress.best_stage);
                return progress;
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::new()
    }

    /// Save progression to the store.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(Self::STORAGE_KEY, &json);
            log::info!("Progress saved (best stage {})", self.best_stage);
        }
    }
}
