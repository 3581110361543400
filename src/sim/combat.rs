//! Collision resolution, damage and scoring
//!
//! Resolution is two-phase: every check reads the tick's positions and
//! records what to remove, then all removals are applied at once. An entity
//! marked for removal is skipped by later checks, so nothing is killed,
//! collected or counted twice.

use super::entity::HitOutcome;
use super::geometry::intersects;
use super::state::{DamageCause, GameEvent, GameState};
use crate::consts::*;

/// Removal marks for one resolver pass
#[derive(Debug, Default)]
struct Removals {
    player_shots: Vec<bool>,
    enemies: Vec<bool>,
    /// Per enemy, per projectile
    enemy_shots: Vec<Vec<bool>>,
    power_ups: Vec<bool>,
}

impl Removals {
    fn for_state(state: &GameState) -> Self {
        Self {
            player_shots: vec![false; state.player.ship.projectiles.len()],
            enemies: vec![false; state.enemies.len()],
            enemy_shots: state
                .enemies
                .iter()
                .map(|e| vec![false; e.ship.projectiles.len()])
                .collect(),
            power_ups: vec![false; state.power_ups.len()],
        }
    }
}

/// Keep only the items whose mark is false
fn retain_unmarked<T>(items: &mut Vec<T>, marks: &[bool]) {
    debug_assert_eq!(items.len(), marks.len());
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marks[idx];
        idx += 1;
        keep
    });
}

/// Player shots vs enemies. Each shot kills at most the first enemy it overlaps.
fn resolve_player_shots(state: &mut GameState, marks: &mut Removals) {
    let height = state.tuning.arena_height;
    for (shot_idx, shot) in state.player.ship.projectiles.iter().enumerate() {
        if shot.is_out_of_bounds(height) {
            continue;
        }
        let target = state
            .enemies
            .iter()
            .enumerate()
            .find(|(i, e)| !marks.enemies[*i] && intersects(shot.bounds(), e.bounds()));
        if let Some((enemy_idx, enemy)) = target {
            marks.player_shots[shot_idx] = true;
            marks.enemies[enemy_idx] = true;
            let points = enemy.kind.score_value();
            state.player.score += points;
            state.events.push(GameEvent::EnemyDestroyed {
                enemy_id: enemy.id,
                kind: enemy.kind,
                points,
            });
            log::debug!("Enemy {} destroyed (+{})", enemy.id, points);
        }
    }
}

/// Enemy shots vs player. Shots of enemies destroyed this tick vanish with them.
fn resolve_enemy_shots(state: &mut GameState, marks: &mut Removals) {
    let height = state.tuning.arena_height;
    let player_box = state.player.bounds();
    for (enemy_idx, enemy) in state.enemies.iter().enumerate() {
        if marks.enemies[enemy_idx] {
            continue;
        }
        for (shot_idx, shot) in enemy.ship.projectiles.iter().enumerate() {
            if shot.is_out_of_bounds(height) || !intersects(shot.bounds(), player_box) {
                continue;
            }
            marks.enemy_shots[enemy_idx][shot_idx] = true;
            let outcome = state.player.hit_by_projectile(PROJECTILE_DAMAGE);
            state.events.push(GameEvent::from_hit(
                outcome,
                DamageCause::Projectile,
                PROJECTILE_DAMAGE,
                state.player.shield_charges,
                enemy.id,
            ));
        }
    }
}

/// Ramming: every surviving enemy touching the player is removed
fn resolve_contacts(state: &mut GameState, marks: &mut Removals) {
    let player_box = state.player.bounds();
    for (enemy_idx, enemy) in state.enemies.iter().enumerate() {
        if marks.enemies[enemy_idx] || !intersects(enemy.bounds(), player_box) {
            continue;
        }
        marks.enemies[enemy_idx] = true;
        let outcome = state.player.rammed(CONTACT_DAMAGE);
        state.events.push(GameEvent::from_hit(
            outcome,
            DamageCause::Contact,
            CONTACT_DAMAGE,
            state.player.shield_charges,
            enemy.id,
        ));
        if outcome == HitOutcome::Shattered {
            log::debug!("Shield shattered by enemy {}", enemy.id);
        }
    }
}

/// Enemies past the bottom edge cost health; the shield does not help
fn resolve_leaks(state: &mut GameState, marks: &mut Removals) {
    let height = state.tuning.arena_height;
    for (enemy_idx, enemy) in state.enemies.iter().enumerate() {
        if marks.enemies[enemy_idx] || !enemy.has_leaked(height) {
            continue;
        }
        marks.enemies[enemy_idx] = true;
        state.player.take_damage(LEAK_DAMAGE);
        state.events.push(GameEvent::EnemyLeaked {
            enemy_id: enemy.id,
            kind: enemy.kind,
        });
        state.events.push(GameEvent::PlayerDamaged {
            cause: DamageCause::Leak,
            amount: LEAK_DAMAGE,
        });
    }
}

fn resolve_pickups(state: &mut GameState, marks: &mut Removals) {
    let player_box = state.player.bounds();
    for (idx, power_up) in state.power_ups.iter().enumerate() {
        if !intersects(power_up.bounds(), player_box) {
            continue;
        }
        marks.power_ups[idx] = true;
        state.player.apply_power_up(power_up.kind);
        state.events.push(GameEvent::PowerUpCollected {
            kind: power_up.kind,
        });
        log::debug!("Collected {} power-up", power_up.kind.as_str());
    }
}

fn apply_removals(state: &mut GameState, marks: Removals) {
    retain_unmarked(&mut state.player.ship.projectiles, &marks.player_shots);
    for (enemy, shot_marks) in state.enemies.iter_mut().zip(&marks.enemy_shots) {
        retain_unmarked(&mut enemy.ship.projectiles, shot_marks);
    }
    retain_unmarked(&mut state.enemies, &marks.enemies);
    retain_unmarked(&mut state.power_ups, &marks.power_ups);
}

/// Run every collision rule once, in order, then apply removals
pub fn resolve(state: &mut GameState) {
    let mut marks = Removals::for_state(state);
    resolve_player_shots(state, &mut marks);
    resolve_enemy_shots(state, &mut marks);
    resolve_contacts(state, &mut marks);
    resolve_leaks(state, &mut marks);
    resolve_pickups(state, &mut marks);
    apply_removals(state, marks);
}

/// Drop projectiles and power-ups that left the vertical play bounds
pub fn purge_out_of_bounds(state: &mut GameState) {
    let height = state.tuning.arena_height;
    state
        .player
        .ship
        .projectiles
        .retain(|p| !p.is_out_of_bounds(height));
    for enemy in &mut state.enemies {
        enemy.ship.projectiles.retain(|p| !p.is_out_of_bounds(height));
    }
    state.power_ups.retain(|p| !p.is_out_of_bounds(height));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::entity::{EnemyKind, Origin, PowerUpKind, Projectile};
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Tuning::scripted());
        state.start_session();
        state.events.clear();
        state
    }

    fn enemy_shot_at_player(state: &mut GameState, enemy_idx: usize) {
        let pos = state.player.ship.pos + Vec2::new(10.0, 10.0);
        state.enemies[enemy_idx]
            .ship
            .projectiles
            .push(Projectile::new(pos, Origin::Enemy(EnemyKind::Weak)));
    }

    #[test]
    fn test_player_shot_kills_and_scores() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Medium, Vec2::new(100.0, 100.0));
        state
            .player
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(110.0, 120.0), Origin::Player));

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert!(state.player.ship.projectiles.is_empty());
        assert_eq!(state.player.score, 20);
        assert!(matches!(
            state.events[0],
            GameEvent::EnemyDestroyed { points: 20, .. }
        ));
    }

    #[test]
    fn test_shot_hits_only_first_enemy() {
        let mut state = playing_state();
        // Two overlapping enemies, one shot
        state.spawn_enemy(EnemyKind::Weak, Vec2::new(100.0, 100.0));
        let second = state.spawn_enemy(EnemyKind::Strong, Vec2::new(105.0, 95.0));
        state
            .player
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(110.0, 110.0), Origin::Player));

        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, second);
        assert_eq!(state.player.score, 10);
    }

    #[test]
    fn test_two_shots_one_enemy_scores_once() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Strong, Vec2::new(100.0, 100.0));
        for x in [105.0, 130.0] {
            state
                .player
                .ship
                .projectiles
                .push(Projectile::new(Vec2::new(x, 120.0), Origin::Player));
        }

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.score, 30);
        // Second shot found nothing left to hit and keeps flying
        assert_eq!(state.player.ship.projectiles.len(), 1);
        assert_eq!(state.player.ship.projectiles[0].pos.x, 130.0);
    }

    #[test]
    fn test_out_of_bounds_shot_cannot_hit() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Weak, Vec2::new(100.0, -50.0));
        state
            .player
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(110.0, -20.0), Origin::Player));

        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.player.score, 0);
        purge_out_of_bounds(&mut state);
        assert!(state.player.ship.projectiles.is_empty());
    }

    #[test]
    fn test_enemy_shot_damages_and_resets_multishot() {
        let mut state = playing_state();
        state.player.projectile_count = 3;
        state.spawn_enemy(EnemyKind::Weak, Vec2::new(0.0, 0.0));
        enemy_shot_at_player(&mut state, 0);

        resolve(&mut state);
        assert_eq!(state.player.health(), 90);
        assert_eq!(state.player.projectile_count, 1);
        assert!(state.enemies[0].ship.projectiles.is_empty());
        assert_eq!(
            state.events,
            vec![GameEvent::PlayerDamaged {
                cause: DamageCause::Projectile,
                amount: 10
            }]
        );
    }

    #[test]
    fn test_shield_soaks_three_then_breaks() {
        let mut state = playing_state();
        state.player.shield_charges = 3;
        state.spawn_enemy(EnemyKind::Weak, Vec2::new(0.0, 0.0));

        for expected in [2u8, 1, 0] {
            enemy_shot_at_player(&mut state, 0);
            resolve(&mut state);
            assert_eq!(state.player.shield_charges, expected);
            assert_eq!(state.player.health(), 100);
        }
        enemy_shot_at_player(&mut state, 0);
        resolve(&mut state);
        assert_eq!(state.player.health(), 90);
    }

    #[test]
    fn test_dead_enemy_shots_vanish() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Weak, Vec2::new(0.0, 0.0));
        enemy_shot_at_player(&mut state, 0);
        state
            .player
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(5.0, 5.0), Origin::Player));

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health(), 100);
    }

    #[test]
    fn test_contact_with_shield_zeroes_it() {
        let mut state = playing_state();
        state.player.shield_charges = 3;
        let pos = state.player.ship.pos;
        let id = state.spawn_enemy(EnemyKind::Weak, pos);

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.shield_charges, 0);
        assert_eq!(state.player.health(), 100);
        assert_eq!(state.events, vec![GameEvent::ShieldShattered { enemy_id: id }]);
    }

    #[test]
    fn test_contact_without_shield() {
        let mut state = playing_state();
        state.player.projectile_count = 2;
        let pos = state.player.ship.pos;
        state.spawn_enemy(EnemyKind::Medium, pos - Vec2::new(10.0, 10.0));

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health(), 75);
        assert_eq!(state.player.projectile_count, 1);
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_double_contact_shield_covers_only_first() {
        let mut state = playing_state();
        state.player.shield_charges = 1;
        let pos = state.player.ship.pos;
        state.spawn_enemy(EnemyKind::Weak, pos);
        state.spawn_enemy(EnemyKind::Weak, pos + Vec2::new(5.0, 0.0));

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.shield_charges, 0);
        assert_eq!(state.player.health(), 75);
    }

    #[test]
    fn test_leak_ignores_shield() {
        let mut state = playing_state();
        state.player.shield_charges = 3;
        state.player.projectile_count = 3;
        state.spawn_enemy(EnemyKind::Weak, Vec2::new(0.0, 570.0));

        assert!(state.enemies[0].has_leaked(600.0));
        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health(), 80);
        assert_eq!(state.player.shield_charges, 3);
        assert_eq!(state.player.projectile_count, 1);
        assert!(matches!(state.events[0], GameEvent::EnemyLeaked { .. }));
    }

    #[test]
    fn test_shot_enemy_does_not_leak() {
        let mut state = playing_state();
        state.spawn_enemy(EnemyKind::Weak, Vec2::new(0.0, 570.0));
        state
            .player
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(5.0, 580.0), Origin::Player));

        resolve(&mut state);
        assert_eq!(state.player.health(), 100);
        assert_eq!(state.player.score, 10);
    }

    #[test]
    fn test_pickups() {
        let mut state = playing_state();
        state.player.ship.health = 90;
        let pos = state.player.ship.pos;
        state.spawn_power_up(PowerUpKind::Health, pos);
        state.spawn_power_up(PowerUpKind::Shield, pos + Vec2::new(10.0, 0.0));
        state.spawn_power_up(PowerUpKind::MultiShot, pos + Vec2::new(0.0, 10.0));
        // Out of reach
        state.spawn_power_up(PowerUpKind::MultiShot, Vec2::new(0.0, 0.0));

        resolve(&mut state);
        assert_eq!(state.player.health(), 100);
        assert_eq!(state.player.shield_charges, 3);
        assert_eq!(state.player.projectile_count, 2);
        assert_eq!(state.power_ups.len(), 1);
    }

    #[test]
    fn test_purge() {
        let mut state = playing_state();
        state
            .player
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(0.0, -1.0), Origin::Player));
        state
            .player
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(0.0, 300.0), Origin::Player));
        state.spawn_enemy(EnemyKind::Weak, Vec2::new(0.0, 0.0));
        state.enemies[0]
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(0.0, 601.0), Origin::Enemy(EnemyKind::Weak)));
        state.spawn_power_up(PowerUpKind::Health, Vec2::new(0.0, 600.5));
        state.spawn_power_up(PowerUpKind::Health, Vec2::new(0.0, 590.0));

        purge_out_of_bounds(&mut state);
        assert_eq!(state.player.ship.projectiles.len(), 1);
        assert!(state.enemies[0].ship.projectiles.is_empty());
        assert_eq!(state.power_ups.len(), 1);
        assert!(state.events.is_empty());
    }

    fn damage_from_events(events: &[GameEvent]) -> i32 {
        events
            .iter()
            .map(|e| match e {
                GameEvent::PlayerDamaged { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    proptest! {
        #[test]
        fn prop_health_accounts_for_every_event(
            enemies in proptest::collection::vec((0u8..3, 0.0f32..380.0, 380.0f32..600.0), 0..6),
            shots in proptest::collection::vec((0.0f32..400.0, 300.0f32..600.0), 0..6),
            shield in 0u8..=3,
        ) {
            let mut state = playing_state();
            state.player.shield_charges = shield;
            for (i, (kind, x, y)) in enemies.iter().enumerate() {
                let kind = EnemyKind::try_from(*kind).unwrap();
                state.spawn_enemy(kind, Vec2::new(*x, *y));
                if let Some((sx, sy)) = shots.get(i) {
                    state.enemies[i]
                        .ship
                        .projectiles
                        .push(Projectile::new(Vec2::new(*sx, *sy), Origin::Enemy(kind)));
                }
            }
            let before = state.player.health();
            let enemy_count = state.enemies.len();
            resolve(&mut state);

            let lost = before - state.player.health();
            prop_assert_eq!(lost, damage_from_events(&state.events));
            // No enemy can hurt more than once per tick (contact or leak, plus one shot)
            prop_assert!(lost <= enemy_count as i32 * (CONTACT_DAMAGE + PROJECTILE_DAMAGE));
            prop_assert!(state.player.shield_charges <= shield);
        }

        #[test]
        fn prop_score_only_from_kills(
            enemies in proptest::collection::vec((0u8..3, 0.0f32..380.0, 0.0f32..300.0), 0..6),
            shots in proptest::collection::vec((0.0f32..400.0, 0.0f32..300.0), 0..8),
        ) {
            let mut state = playing_state();
            for (kind, x, y) in &enemies {
                state.spawn_enemy(EnemyKind::try_from(*kind).unwrap(), Vec2::new(*x, *y));
            }
            for (x, y) in &shots {
                state.player.ship.projectiles.push(Projectile::new(Vec2::new(*x, *y), Origin::Player));
            }
            resolve(&mut state);

            let expected: u64 = state
                .events
                .iter()
                .map(|e| match e {
                    GameEvent::EnemyDestroyed { kind, points, .. } => {
                        assert_eq!(*points, kind.score_value());
                        *points
                    }
                    _ => 0,
                })
                .sum();
            prop_assert_eq!(state.player.score, expected);
            let kills = state.events.iter().filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. })).count();
            prop_assert!(kills <= shots.len().min(enemies.len()));
        }
    }
}
