//! Space Invaders - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, combat, game state)
//! - `platform`: Input/renderer/asset seams and the per-frame driver
//! - `tuning`: Data-driven run configuration
//! - `highscores`: In-memory leaderboard

pub mod error;
pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use highscores::HighScores;
pub use tuning::{PowerUpRoll, Tuning};

/// Game configuration constants
pub mod consts {
    /// Player ship edge length (square sprite)
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player movement per tick along each axis
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player health at session start, also the healing cap
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Horizontal offset from the arena center to the player spawn
    pub const PLAYER_START_OFFSET_X: f32 = 20.0;
    /// Distance from the arena bottom to the player spawn
    pub const PLAYER_START_OFFSET_Y: f32 = 100.0;

    /// Ticks a combatant waits between shots
    pub const COOLDOWN_THRESHOLD: u32 = 30;

    /// Projectile edge length (square sprite)
    pub const PROJECTILE_SIZE: f32 = 20.0;
    /// Player shots travel up the screen
    pub const PLAYER_PROJECTILE_VELOCITY: f32 = -5.0;
    /// Enemy shots travel down the screen
    pub const ENEMY_PROJECTILE_VELOCITY: f32 = 5.0;
    /// Horizontal gap between simultaneous player shots
    pub const MULTI_SHOT_SPREAD: f32 = 20.0;
    /// Upper bound on simultaneous player shots
    pub const MAX_PROJECTILE_COUNT: u8 = 3;

    /// Shield charges granted by a shield pickup
    pub const MAX_SHIELD_CHARGES: u8 = 3;

    /// Damage from an enemy projectile
    pub const PROJECTILE_DAMAGE: i32 = 10;
    /// Damage from ramming an enemy
    pub const CONTACT_DAMAGE: i32 = 25;
    /// Damage from an enemy slipping past the bottom edge
    pub const LEAK_DAMAGE: i32 = 20;
    /// Health restored by a health pickup
    pub const HEALTH_PICKUP: i32 = 30;

    /// Power-up edge length (square sprite)
    pub const POWER_UP_SIZE: f32 = 20.0;
    /// Power-up fall speed per tick
    pub const POWER_UP_VELOCITY: f32 = 2.0;

    /// Spawn heights (above the visible area)
    pub const ENEMY_SPAWN_Y: f32 = -50.0;
    pub const POWER_UP_SPAWN_Y: f32 = -20.0;
}
