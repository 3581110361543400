//! Entity model: projectiles, combatants, power-ups
//!
//! Player and Enemy share a single `Combatant` record (position, health,
//! cooldown, owned projectiles) and add their own rules around it.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::SimError;
use crate::consts::*;

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Enemy ship classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Small and fast
    Weak,
    Medium,
    /// Large and slow, worth the most
    Strong,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Weak, EnemyKind::Medium, EnemyKind::Strong];

    /// Downward speed per tick
    pub fn velocity(&self) -> f32 {
        match self {
            EnemyKind::Weak => 2.0,
            EnemyKind::Medium => 1.0,
            EnemyKind::Strong => 0.5,
        }
    }

    /// Edge length of the (square) ship
    pub fn size(&self) -> f32 {
        match self {
            EnemyKind::Weak => 40.0,
            EnemyKind::Medium => 50.0,
            EnemyKind::Strong => 60.0,
        }
    }

    /// Points awarded when shot down
    pub fn score_value(&self) -> u64 {
        match self {
            EnemyKind::Weak => 10,
            EnemyKind::Medium => 20,
            EnemyKind::Strong => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Weak => "weak",
            EnemyKind::Medium => "medium",
            EnemyKind::Strong => "strong",
        }
    }
}

impl FromStr for EnemyKind {
    type Err = SimError;

    /// Accepts kind names and the sprite colors they map to
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weak" | "red" => Ok(EnemyKind::Weak),
            "medium" | "blue" => Ok(EnemyKind::Medium),
            "strong" | "green" => Ok(EnemyKind::Strong),
            _ => Err(SimError::UnknownEnemyKind(s.to_string())),
        }
    }
}

impl TryFrom<u8> for EnemyKind {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        EnemyKind::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| SimError::UnknownEnemyKind(value.to_string()))
    }
}

/// Visual/ownership tag carried by ships and their shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Player,
    Enemy(EnemyKind),
}

impl Origin {
    pub fn side(&self) -> Side {
        match self {
            Origin::Player => Side::Player,
            Origin::Enemy(_) => Side::Enemy,
        }
    }

    /// Vertical speed of shots fired by this origin
    pub fn projectile_velocity(&self) -> f32 {
        match self.side() {
            Side::Player => PLAYER_PROJECTILE_VELOCITY,
            Side::Enemy => ENEMY_PROJECTILE_VELOCITY,
        }
    }
}

/// A laser bolt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed vertical velocity (negative = up)
    pub vel: f32,
    pub origin: Origin,
}

impl Projectile {
    pub fn new(pos: Vec2, origin: Origin) -> Self {
        Self {
            pos,
            size: Vec2::splat(PROJECTILE_SIZE),
            vel: origin.projectile_velocity(),
            origin,
        }
    }

    pub fn side(&self) -> Side {
        self.origin.side()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn advance(&mut self, velocity: f32) {
        self.pos.y += velocity;
    }

    /// Advance by the projectile's own velocity
    pub fn step(&mut self) {
        self.advance(self.vel);
    }

    pub fn is_out_of_bounds(&self, height: f32) -> bool {
        self.pos.y < 0.0 || self.pos.y > height
    }
}

/// Shared ship state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub origin: Origin,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    /// Movement per tick
    pub velocity: f32,
    /// 0 = ready, otherwise counts 1..=COOLDOWN_THRESHOLD
    pub cooldown: u32,
    /// Shots in flight, owned by this ship
    pub projectiles: Vec<Projectile>,
}

impl Combatant {
    pub fn new(origin: Origin, pos: Vec2, size: f32, health: i32, velocity: f32) -> Self {
        Self {
            origin,
            pos,
            size: Vec2::splat(size),
            health,
            velocity,
            cooldown: 0,
            projectiles: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Translate without clamping (callers bound the result)
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.pos += Vec2::new(dx, dy);
    }

    pub fn tick_cooldown(&mut self) {
        if self.cooldown >= COOLDOWN_THRESHOLD {
            self.cooldown = 0;
        } else if self.cooldown > 0 {
            self.cooldown += 1;
        }
        debug_assert!(self.cooldown <= COOLDOWN_THRESHOLD);
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown == 0
    }

    /// Emit `count` shots spaced evenly around the ship's horizontal center.
    /// Returns how many were fired (0 while cooling down).
    pub fn fire(&mut self, count: u8) -> usize {
        if !self.can_fire() {
            return 0;
        }
        let count = count.max(1);
        let base_x = self.bounds().center_x() - PROJECTILE_SIZE / 2.0;
        let mid = (count - 1) as f32 / 2.0;
        for i in 0..count {
            let x = base_x + MULTI_SHOT_SPREAD * (i as f32 - mid);
            self.projectiles
                .push(Projectile::new(Vec2::new(x, self.pos.y), self.origin));
        }
        self.cooldown = 1;
        count as usize
    }

    pub fn advance_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.step();
        }
    }
}

/// How a hit on the player resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// A shield charge soaked the hit
    Absorbed,
    /// The whole shield was lost, health untouched
    Shattered,
    /// Health was reduced
    Damaged,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    MultiShot,
    Health,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::MultiShot, PowerUpKind::Health];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::MultiShot => "multi_shot",
            PowerUpKind::Health => "health",
        }
    }
}

impl FromStr for PowerUpKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shield" => Ok(PowerUpKind::Shield),
            "multi_shot" | "multishot" => Ok(PowerUpKind::MultiShot),
            "health" => Ok(PowerUpKind::Health),
            _ => Err(SimError::UnknownPowerUpKind(s.to_string())),
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub ship: Combatant,
    pub score: u64,
    pub max_health: i32,
    /// 0..=MAX_SHIELD_CHARGES
    pub shield_charges: u8,
    /// 1..=MAX_PROJECTILE_COUNT
    pub projectile_count: u8,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            ship: Combatant::new(
                Origin::Player,
                pos,
                PLAYER_SIZE,
                PLAYER_MAX_HEALTH,
                PLAYER_SPEED,
            ),
            score: 0,
            max_health: PLAYER_MAX_HEALTH,
            shield_charges: 0,
            projectile_count: 1,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.ship.bounds()
    }

    pub fn health(&self) -> i32 {
        self.ship.health
    }

    pub fn is_dead(&self) -> bool {
        self.ship.health <= 0
    }

    pub fn fire(&mut self) -> usize {
        self.ship.fire(self.projectile_count)
    }

    /// Unshielded damage: lose health and drop back to a single shot
    pub fn take_damage(&mut self, amount: i32) {
        self.ship.health -= amount;
        self.projectile_count = 1;
    }

    /// Enemy projectile: a shield charge blocks it
    pub fn hit_by_projectile(&mut self, damage: i32) -> HitOutcome {
        let outcome = if self.shield_charges > 0 {
            self.shield_charges -= 1;
            HitOutcome::Absorbed
        } else {
            self.take_damage(damage);
            HitOutcome::Damaged
        };
        self.debug_check();
        outcome
    }

    /// Ramming an enemy: the shield blocks it but breaks entirely
    pub fn rammed(&mut self, damage: i32) -> HitOutcome {
        let outcome = if self.shield_charges > 0 {
            self.shield_charges = 0;
            HitOutcome::Shattered
        } else {
            self.take_damage(damage);
            HitOutcome::Damaged
        };
        self.debug_check();
        outcome
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Health => {
                self.ship.health = (self.ship.health + HEALTH_PICKUP).min(self.max_health);
            }
            PowerUpKind::Shield => self.shield_charges = MAX_SHIELD_CHARGES,
            PowerUpKind::MultiShot => {
                self.projectile_count = (self.projectile_count + 1).min(MAX_PROJECTILE_COUNT);
            }
        }
        self.debug_check();
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    fn debug_check(&self) {
        debug_assert!(self.shield_charges <= MAX_SHIELD_CHARGES);
        debug_assert!((1..=MAX_PROJECTILE_COUNT).contains(&self.projectile_count));
        debug_assert!(self.ship.cooldown <= COOLDOWN_THRESHOLD);
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub ship: Combatant,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            ship: Combatant::new(
                Origin::Enemy(kind),
                pos,
                kind.size(),
                PLAYER_MAX_HEALTH,
                kind.velocity(),
            ),
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.ship.bounds()
    }

    /// Drift down the screen
    pub fn advance(&mut self) {
        let vel = self.ship.velocity;
        self.ship.move_by(0.0, vel);
    }

    pub fn fire(&mut self) -> usize {
        self.ship.fire(1)
    }

    /// Bottom edge has passed the bottom of the play area
    pub fn has_leaked(&self, height: f32) -> bool {
        self.bounds().bottom() > height
    }
}

/// A falling pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: POWER_UP_VELOCITY,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(POWER_UP_SIZE))
    }

    pub fn advance(&mut self) {
        self.pos.y += self.vel;
    }

    pub fn is_out_of_bounds(&self, height: f32) -> bool {
        self.pos.y > height
    }
}
