//! Read-only view handed to the renderer each frame

use glam::Vec2;
use serde::Serialize;

use super::entity::{EnemyKind, PowerUp, Projectile};
use super::state::{GameEvent, GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub score: u64,
    pub shield_charges: u8,
    pub projectile_count: u8,
    pub projectiles: Vec<Projectile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub projectiles: Vec<Projectile>,
}

/// Immutable copy of everything drawable after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub power_ups: Vec<PowerUp>,
    pub events: Vec<GameEvent>,
    /// Best leaderboard score, filled in by `Simulation`
    pub best_score: Option<u64>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            player: PlayerView {
                pos: player.ship.pos,
                size: player.ship.size,
                health: player.ship.health,
                max_health: player.max_health,
                score: player.score,
                shield_charges: player.shield_charges,
                projectile_count: player.projectile_count,
                projectiles: player.ship.projectiles.clone(),
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.ship.pos,
                    size: e.ship.size,
                    projectiles: e.ship.projectiles.clone(),
                })
                .collect(),
            power_ups: state.power_ups.clone(),
            events: state.events.clone(),
            best_score: None,
        }
    }

    /// Every projectile in flight, player shots first
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.player
            .projectiles
            .iter()
            .chain(self.enemies.iter().flat_map(|e| e.projectiles.iter()))
    }
}
