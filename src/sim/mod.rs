//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick at a time, fully applied before the next
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod combat;
pub mod entity;
pub mod geometry;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::Simulation;
pub use entity::{
    Combatant, Enemy, EnemyKind, HitOutcome, Origin, Player, PowerUp, PowerUpKind, Projectile,
    Side,
};
pub use geometry::{Aabb, intersects};
pub use snapshot::{EnemyView, PlayerView, Snapshot};
pub use state::{DamageCause, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
