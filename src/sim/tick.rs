//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Given the same
//! state, input and RNG stream, a tick always produces the same result.

use glam::Vec2;
use rand::Rng;

use super::snapshot::Snapshot;
use super::state::{GameEvent, GamePhase, GameState};
use super::{combat, spawner};

/// Intents sampled from the host once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Abandon the session (or acknowledge game over)
    pub restart: bool,
    /// Leave the menu
    pub start_game: bool,
}

impl TickInput {
    /// Net movement direction, each axis in {-1, 0, 1}
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(
            axis(self.move_left, self.move_right),
            axis(self.move_up, self.move_down),
        )
    }
}

/// Advance the game state by one tick and return what the renderer should show
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) -> Snapshot {
    state.events.clear();

    match state.phase {
        GamePhase::Menu => {
            if input.start_game {
                state.start_session();
            }
        }
        GamePhase::Playing => {
            if input.restart {
                state.return_to_menu();
            } else if input.pause {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
            } else {
                advance(state, input, rng);
            }
        }
        GamePhase::Paused => {
            if input.restart {
                state.return_to_menu();
            } else if input.pause {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
            }
        }
        GamePhase::GameOver => {
            if input.restart || input.start_game {
                state.return_to_menu();
            }
        }
    }

    Snapshot::capture(state)
}

/// One Playing tick, in fixed order
fn advance<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    state.time_ticks += 1;

    move_player(state, input);

    state.player.ship.tick_cooldown();
    if input.fire {
        let shots = state.player.fire();
        if shots > 0 {
            state.events.push(GameEvent::PlayerFired { shots });
        }
    }

    state.player.ship.advance_projectiles();
    for enemy in &mut state.enemies {
        enemy.ship.tick_cooldown();
        enemy.advance();
        enemy.ship.advance_projectiles();
    }
    for power_up in &mut state.power_ups {
        power_up.advance();
    }

    spawner::run(state, rng);
    combat::resolve(state);
    combat::purge_out_of_bounds(state);

    // Checked once, after every rule for this tick has run
    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        let score = state.player.score;
        state.events.push(GameEvent::GameOver { score });
        log::info!(
            "Game over after {} ticks with score {}",
            state.time_ticks,
            score
        );
    }
}

/// Apply movement intents, keeping the ship inside the play area
fn move_player(state: &mut GameState, input: &TickInput) {
    let ship = &mut state.player.ship;
    let delta = input.direction() * ship.velocity;
    ship.move_by(delta.x, delta.y);

    let max = Vec2::new(state.tuning.arena_width, state.tuning.arena_height) - ship.size;
    ship.pos = ship.pos.clamp(Vec2::ZERO, max);
}
