//! Game tuning and balance values
//!
//! Every knob that shapes a round lives here, persisted separately from
//! progression so shells can ship rebalanced presets without code changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::KeyValueStore;

/// Rejected tuning values, reported before any round state is touched.
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    /// Round countdown must be positive.
    #[error("round duration must be positive, got {0}")]
    NonPositiveDuration(f32),
    /// Lanes must receive at least one order.
    #[error("order batch size must be at least 1")]
    EmptyBatch,
    /// Opponent cadence must be positive.
    #[error("opponent base speed must be positive, got {0}")]
    NonPositiveSpeed(f32),
    /// Speed growth below 1 would make later stages easier.
    #[error("opponent speed growth must be >= 1, got {0}")]
    ShrinkingSpeedCurve(f32),
    /// Cap below the base speed makes the curve unsatisfiable.
    #[error("opponent speed cap {cap} is below base speed {base}")]
    SpeedCapBelowBase {
        /// Configured starting speed.
        base: f32,
        /// Configured ceiling.
        cap: f32,
    },
    /// The sabotage draw needs at least one outcome.
    #[error("sabotage odds must be at least 1")]
    ZeroSabotageOdds,
    /// Timed mechanics need positive durations.
    #[error("{name} must be positive, got {value}")]
    NonPositiveTimer {
        /// Which timer was misconfigured.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
}

/// Balance values for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Round countdown length in seconds
    pub round_secs: f32,
    /// Orders loaded into each lane at round start (never replenished mid-round)
    pub batch_size: usize,
    /// Opponent freezes the player can trigger per round
    pub hammer_budget: u32,
    /// Sabotage hides the rival can trigger per round
    pub sabotage_budget: u32,
    /// One sabotage draw succeeds out of this many
    pub sabotage_odds: u32,
    /// Seconds the hammer freezes the opponent
    pub hammer_pause_secs: f32,
    /// Seconds between opponent taunts while it works
    pub taunt_period_secs: f32,
    /// Opponent speed multiplier at stage 1
    pub opponent_base_speed: f32,
    /// Per-stage multiplicative speed growth
    pub opponent_speed_growth: f32,
    /// Ceiling on the opponent speed multiplier
    pub opponent_speed_cap: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_secs: 60.0,
            batch_size: 30,
            hammer_budget: 1,
            sabotage_budget: 1,
            sabotage_odds: 5,
            hammer_pause_secs: 6.0,
            taunt_period_secs: 8.0,
            opponent_base_speed: 2.0,
            opponent_speed_growth: 1.2,
            opponent_speed_cap: 3.0,
        }
    }
}

impl Tuning {
    /// Storage key
    const STORAGE_KEY: &'static str = "burger_brawl_tuning";

    /// Reject degenerate values before they can reach a round.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.round_secs <= 0.0 {
            return Err(TuningError::NonPositiveDuration(self.round_secs));
        }
        if self.batch_size == 0 {
            return Err(TuningError::EmptyBatch);
        }
        if self.opponent_base_speed <= 0.0 {
            return Err(TuningError::NonPositiveSpeed(self.opponent_base_speed));
        }
        if self.opponent_speed_growth < 1.0 {
            return Err(TuningError::ShrinkingSpeedCurve(self.opponent_speed_growth));
        }
        if self.opponent_speed_cap < self.opponent_base_speed {
            return Err(TuningError::SpeedCapBelowBase {
                base: self.opponent_base_speed,
                cap: self.opponent_speed_cap,
            });
        }
        if self.sabotage_odds == 0 {
            return Err(TuningError::ZeroSabotageOdds);
        }
        if self.hammer_pause_secs <= 0.0 {
            return Err(TuningError::NonPositiveTimer {
                name: "hammer pause",
                value: self.hammer_pause_secs,
            });
        }
        if self.taunt_period_secs <= 0.0 {
            return Err(TuningError::NonPositiveTimer {
                name: "taunt period",
                value: self.taunt_period_secs,
            });
        }
        Ok(())
    }

    /// Opponent speed multiplier for a stage: capped geometric growth.
    pub fn opponent_speed(&self, stage: u32) -> f32 {
        let growth = self.opponent_speed_growth.powi(stage.saturating_sub(1) as i32);
        (self.opponent_base_speed * growth).min(self.opponent_speed_cap)
    }

    /// Load tuning from the store, falling back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            if let Ok(tuning) = serde_json::from_str(&json) {
                log::info!("Loaded tuning from store");
                return tuning;
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to the store.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(Self::STORAGE_KEY, &json);
            log::info!("Tuning saved");
        }
    }
}
