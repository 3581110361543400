//! Space Invaders headless entry point
//!
//! Runs a seeded session with a simple autopilot and logs what happens.
//! Usage: space-invaders [seed] [tuning.json]

use serde::Serialize;

use space_invaders::platform::{FrameLoop, InputSource, NoAssets, Renderer};
use space_invaders::sim::{GameEvent, GamePhase, Simulation, Snapshot, TickInput};
use space_invaders::{HighScores, Tuning};

/// Hard stop for runaway sessions (about 30 minutes at 60 fps)
const MAX_FRAMES: u64 = 60 * 60 * 30;

/// Chases the nearest enemy horizontally and holds fire
#[derive(Default)]
struct Autopilot {
    last: Option<Snapshot>,
}

impl Autopilot {
    fn observe(&mut self, snapshot: Snapshot) {
        self.last = Some(snapshot);
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> TickInput {
        let Some(snap) = &self.last else {
            return TickInput {
                start_game: true,
                ..Default::default()
            };
        };
        match snap.phase {
            GamePhase::Menu => TickInput {
                start_game: true,
                ..Default::default()
            },
            GamePhase::Playing => {
                let ship_x = snap.player.pos.x + snap.player.size.x / 2.0;
                let target = snap
                    .enemies
                    .iter()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|e| e.pos.x + e.size.x / 2.0);
                let mut input = TickInput {
                    fire: true,
                    ..Default::default()
                };
                if let Some(target) = target {
                    input.move_left = target < ship_x - 4.0;
                    input.move_right = target > ship_x + 4.0;
                }
                input
            }
            GamePhase::Paused | GamePhase::GameOver => TickInput::default(),
        }
    }
}

/// Logs events and a periodic status line
struct LogRenderer {
    every: u64,
}

impl Renderer for LogRenderer {
    fn present(&mut self, snapshot: &Snapshot) {
        for event in &snapshot.events {
            match event {
                GameEvent::EnemyDestroyed { kind, points, .. } => {
                    log::debug!("Destroyed {} (+{})", kind.as_str(), points)
                }
                GameEvent::PlayerDamaged { cause, amount } => {
                    log::debug!("Took {} damage ({:?})", amount, cause)
                }
                GameEvent::PowerUpCollected { kind } => log::debug!("Picked up {}", kind.as_str()),
                _ => {}
            }
        }
        if snapshot.tick > 0 && snapshot.tick.is_multiple_of(self.every) {
            log::info!(
                "tick {}: health {} score {} shield {} shots {} enemies {}",
                snapshot.tick,
                snapshot.player.health,
                snapshot.player.score,
                snapshot.player.shield_charges,
                snapshot.player.projectile_count,
                snapshot.enemies.len()
            );
        }
    }
}

#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u64,
    ticks: u64,
    score: u64,
    finished: bool,
    high_scores: &'a HighScores,
}

fn load_tuning(path: Option<String>) -> Result<Tuning, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Tuning::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(Tuning::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Space Invaders (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 12345,
    };
    let tuning = load_tuning(args.next())?;

    let sim = Simulation::new(tuning, seed)?;
    let mut frame_loop = FrameLoop::new(sim, &mut NoAssets)?;
    let mut pilot = Autopilot::default();
    let mut renderer = LogRenderer { every: 600 };

    let mut finished = false;
    let mut last = None;
    while frame_loop.frames() < MAX_FRAMES {
        let snapshot = frame_loop.frame(&mut pilot, &mut renderer);
        if snapshot.phase == GamePhase::GameOver {
            finished = true;
            last = Some(snapshot);
            break;
        }
        last = Some(snapshot.clone());
        pilot.observe(snapshot);
    }

    let (ticks, score) = last
        .map(|s| (s.tick, s.player.score))
        .unwrap_or_default();
    let summary = RunSummary {
        seed,
        ticks,
        score,
        finished,
        high_scores: frame_loop.simulation().high_scores(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
