//! Simulation driver
//!
//! Owns the state, the RNG stream and the leaderboard. This is the only
//! thing that mutates `GameState`; everyone else sees snapshots.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::snapshot::Snapshot;
use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::{HighScores, SimError, Tuning};

pub struct Simulation<R: Rng = Pcg32> {
    state: GameState,
    rng: R,
    high_scores: HighScores,
}

impl Simulation<Pcg32> {
    /// Seeded simulation with the default generator
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, SimError> {
        log::info!("Simulation seeded with {}", seed);
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Use a caller-supplied generator
    pub fn with_rng(tuning: Tuning, rng: R) -> Result<Self, SimError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(tuning),
            rng,
            high_scores: HighScores::new(),
        })
    }

    /// Advance exactly one tick
    pub fn step(&mut self, input: &TickInput) -> Snapshot {
        let mut snapshot = tick(&mut self.state, input, &mut self.rng);

        for event in &snapshot.events {
            if let GameEvent::GameOver { score } = *event {
                if let Some(rank) = self.high_scores.add_score(score, self.state.time_ticks) {
                    log::info!("New high score #{}: {}", rank, score);
                }
            }
        }

        snapshot.best_score = self.high_scores.top_score();
        snapshot
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }
}
