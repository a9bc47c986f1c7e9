//! Tunables for the piece generator and the session rules
//!
//! Defaults reproduce the standard game. Every field is `#[serde(default)]`
//! so a settings file only needs to list what it overrides.

use serde::{Deserialize, Serialize};

use crate::types::{COMBO_WARMUP_ROUNDS, FULL_CLEAR_BONUS, UNIQUE_SOLUTION_BONUS};

/// Weights and limits of the smart piece generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Candidate sets sampled per round; the best one is kept.
    pub candidate_count: usize,
    /// Total placement count below which a candidate is rejected.
    pub min_total_placements: u32,
    /// Score assigned to rejected candidates.
    pub reject_score: i32,
    pub placement_weight: i32,
    pub size_penalty: i32,
    pub diversity_weight: i32,
    /// First two slots accept shapes up to `remaining / slots_left + slack` cells.
    pub size_slack: f64,
    /// The last slot is drawn from this many catalog shapes closest to the remaining target.
    pub last_slot_pool: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            candidate_count: 30,
            min_total_placements: 3,
            reject_score: -1000,
            placement_weight: 10,
            size_penalty: 5,
            diversity_weight: 15,
            size_slack: 3.0,
            last_slot_pool: 5,
        }
    }
}

/// Session rules layered on top of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub full_clear_bonus: u32,
    pub unique_solution_bonus: u32,
    /// Combos stay at zero until this many rounds have been completed.
    pub combo_warmup_rounds: u32,
    pub generator: GeneratorConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            full_clear_bonus: FULL_CLEAR_BONUS,
            unique_solution_bonus: UNIQUE_SOLUTION_BONUS,
            combo_warmup_rounds: COMBO_WARMUP_ROUNDS,
            generator: GeneratorConfig::default(),
        }
    }
}
