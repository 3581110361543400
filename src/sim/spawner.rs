//! Probabilistic enemy and power-up generation
//!
//! All draws come from the RNG passed in, so a seeded generator replays
//! the exact same waves. Draw order is part of determinism: enemy spawn,
//! power-up spawn, then one fire roll per enemy in collection order.

use glam::Vec2;
use rand::Rng;

use super::entity::{EnemyKind, PowerUpKind};
use super::state::{GameEvent, GameState};
use crate::PowerUpRoll;
use crate::consts::*;

/// Map a uniform roll in [0, 1) onto the 50/30/20 kind weights
pub fn enemy_kind_for_roll(roll: f64) -> EnemyKind {
    if roll < 0.5 {
        EnemyKind::Weak
    } else if roll < 0.8 {
        EnemyKind::Medium
    } else {
        EnemyKind::Strong
    }
}

/// Draw a power-up kind according to the tuning policy
pub fn roll_power_up_kind<R: Rng>(rng: &mut R, policy: PowerUpRoll) -> PowerUpKind {
    match policy {
        PowerUpRoll::Uniform => PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())],
        PowerUpRoll::Legacy => {
            if rng.random::<f64>() < 0.33 {
                PowerUpKind::Shield
            } else if rng.random::<f64>() < 0.66 {
                PowerUpKind::MultiShot
            } else {
                PowerUpKind::Health
            }
        }
    }
}

/// Maybe add one enemy above the visible area
pub fn spawn_enemies<R: Rng>(state: &mut GameState, rng: &mut R) {
    if state.enemies.len() >= state.tuning.max_enemies {
        return;
    }
    if rng.random::<f64>() >= state.tuning.enemy_spawn_chance {
        return;
    }
    let kind = enemy_kind_for_roll(rng.random::<f64>());
    // Keep the whole ship on-screen horizontally
    let x = rng.random::<f32>() * (state.tuning.arena_width - kind.size());
    let enemy_id = state.spawn_enemy(kind, Vec2::new(x, ENEMY_SPAWN_Y));
    state.events.push(GameEvent::EnemySpawned { enemy_id, kind });
    log::debug!("Spawned {} enemy {} at x={:.1}", kind.as_str(), enemy_id, x);
}

/// Maybe add one power-up above the visible area
pub fn spawn_power_ups<R: Rng>(state: &mut GameState, rng: &mut R) {
    if rng.random::<f64>() >= state.tuning.power_up_spawn_chance {
        return;
    }
    let kind = roll_power_up_kind(rng, state.tuning.power_up_roll);
    let x = rng.random::<f32>() * (state.tuning.arena_width - POWER_UP_SIZE);
    let power_up_id = state.spawn_power_up(kind, Vec2::new(x, POWER_UP_SPAWN_Y));
    state.events.push(GameEvent::PowerUpSpawned { power_up_id, kind });
    log::debug!("Spawned {} power-up {} at x={:.1}", kind.as_str(), power_up_id, x);
}

/// Each enemy tries to fire with a small chance (still cooldown-gated)
pub fn enemy_fire<R: Rng>(state: &mut GameState, rng: &mut R) {
    let chance = state.tuning.enemy_fire_chance;
    for enemy in &mut state.enemies {
        if rng.random::<f64>() < chance && enemy.fire() > 0 {
            state.events.push(GameEvent::EnemyFired {
                enemy_id: enemy.id,
                kind: enemy.kind,
            });
        }
    }
}

/// Run the full spawn policy for one Playing tick
pub fn run<R: Rng>(state: &mut GameState, rng: &mut R) {
    spawn_enemies(state, rng);
    spawn_power_ups(state, rng);
    enemy_fire(state, rng);
}
