//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`. Only `tick`
//! (through `Simulation`) mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, EnemyKind, HitOutcome, Player, PowerUp, PowerUpKind};
use crate::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for a start intent
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-session
    Paused,
    /// Player health reached zero
    GameOver,
}

/// What hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCause {
    Projectile,
    Contact,
    Leak,
}

/// Notable things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    ReturnedToMenu,
    Paused,
    Resumed,
    PlayerFired { shots: usize },
    EnemySpawned { enemy_id: u32, kind: EnemyKind },
    EnemyFired { enemy_id: u32, kind: EnemyKind },
    PowerUpSpawned { power_up_id: u32, kind: PowerUpKind },
    EnemyDestroyed { enemy_id: u32, kind: EnemyKind, points: u64 },
    ShieldAbsorbed { remaining: u8 },
    ShieldShattered { enemy_id: u32 },
    PlayerDamaged { cause: DamageCause, amount: i32 },
    EnemyLeaked { enemy_id: u32, kind: EnemyKind },
    PowerUpCollected { kind: PowerUpKind },
    GameOver { score: u64 },
}

impl GameEvent {
    /// Event for a resolved hit on the player
    pub fn from_hit(outcome: HitOutcome, cause: DamageCause, amount: i32, remaining: u8, enemy_id: u32) -> Self {
        match outcome {
            HitOutcome::Absorbed => GameEvent::ShieldAbsorbed { remaining },
            HitOutcome::Shattered => GameEvent::ShieldShattered { enemy_id },
            HitOutcome::Damaged => GameEvent::PlayerDamaged { cause, amount },
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run configuration
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Player ship
    pub player: Player,
    /// Active enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Active power-ups (spawn order)
    pub power_ups: Vec<PowerUp>,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state sitting in the menu
    pub fn new(tuning: Tuning) -> Self {
        let player = Player::new(tuning.player_start());
        Self {
            tuning,
            phase: GamePhase::Menu,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            power_ups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop everything from the previous session
    fn fresh_session(&mut self) {
        self.player = Player::new(self.tuning.player_start());
        self.enemies.clear();
        self.power_ups.clear();
        self.time_ticks = 0;
        self.next_id = 1;
    }

    /// Menu -> Playing
    pub fn start_session(&mut self) {
        self.fresh_session();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session started");
    }

    /// Any phase -> Menu, discarding the session
    pub fn return_to_menu(&mut self) {
        self.fresh_session();
        self.phase = GamePhase::Menu;
        self.events.push(GameEvent::ReturnedToMenu);
        log::info!("Returned to menu");
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos));
        id
    }

    pub fn spawn_power_up(&mut self, kind: PowerUpKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp::new(id, kind, pos));
        id
    }

    pub fn find_enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }
}
