//! Data-driven run configuration
//!
//! Arena dimensions and spawn odds. Damage values and sizes are fixed in
//! `consts`; only what a host might reasonably vary lives here.

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;
use crate::sim::EnemyKind;

/// How power-up kinds are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PowerUpRoll {
    /// Exact thirds
    #[default]
    Uniform,
    /// Two chained draws at 0.33 then 0.66 (shield 33%, multi-shot ~44%, health ~23%)
    Legacy,
}

impl PowerUpRoll {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpRoll::Uniform => "Uniform",
            PowerUpRoll::Legacy => "Legacy",
        }
    }
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play area width in pixels
    pub arena_width: f32,
    /// Play area height in pixels
    pub arena_height: f32,

    // === Spawning ===
    /// No new enemies spawn while this many are alive
    pub max_enemies: usize,
    /// Per-tick chance of spawning an enemy (below the cap)
    pub enemy_spawn_chance: f64,
    /// Per-tick chance of spawning a power-up
    pub power_up_spawn_chance: f64,
    /// Per-tick, per-enemy chance of attempting to fire
    pub enemy_fire_chance: f64,
    /// Power-up kind selection policy
    pub power_up_roll: PowerUpRoll,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 420.0,
            arena_height: 600.0,

            max_enemies: 5,
            enemy_spawn_chance: 0.02,
            power_up_spawn_chance: 0.003,
            enemy_fire_chance: 0.005,
            power_up_roll: PowerUpRoll::Uniform,
        }
    }
}

impl Tuning {
    /// A world where nothing happens by chance. Tests place entities by hand.
    pub fn scripted() -> Self {
        Self {
            enemy_spawn_chance: 0.0,
            power_up_spawn_chance: 0.0,
            enemy_fire_chance: 0.0,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: arena {}x{}, power-up roll {}",
            tuning.arena_width,
            tuning.arena_height,
            tuning.power_up_roll.as_str()
        );
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<(), SimError> {
        let widest = EnemyKind::ALL
            .iter()
            .map(|k| k.size())
            .fold(PLAYER_SIZE, f32::max);
        if !(self.arena_width > widest) {
            return Err(SimError::InvalidTuning(format!(
                "arena_width {} must exceed the widest ship ({})",
                self.arena_width, widest
            )));
        }
        if !(self.arena_height > PLAYER_START_OFFSET_Y) {
            return Err(SimError::InvalidTuning(format!(
                "arena_height {} must exceed the player start offset ({})",
                self.arena_height, PLAYER_START_OFFSET_Y
            )));
        }
        if self.max_enemies == 0 {
            return Err(SimError::InvalidTuning("max_enemies must be at least 1".into()));
        }
        for (name, p) in [
            ("enemy_spawn_chance", self.enemy_spawn_chance),
            ("power_up_spawn_chance", self.power_up_spawn_chance),
            ("enemy_fire_chance", self.enemy_fire_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidTuning(format!("{name} {p} is not a probability")));
            }
        }
        Ok(())
    }

    /// Where a fresh player ship is placed
    pub fn player_start(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.arena_width / 2.0 - PLAYER_START_OFFSET_X,
            self.arena_height - PLAYER_START_OFFSET_Y,
        )
    }
}
