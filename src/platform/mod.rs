//! Platform abstraction layer
//!
//! The simulation never touches devices. Hosts plug in:
//! - `InputSource`: intents sampled once per frame
//! - `Renderer`: consumes the read-only snapshot
//! - `AssetProvider`: a blocking "ready" step run once before the first tick

use rand::Rng;
use rand_pcg::Pcg32;

use crate::SimError;
use crate::sim::{GamePhase, Simulation, Snapshot, TickInput};

/// Per-frame intent source
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

impl<F: FnMut() -> TickInput> InputSource for F {
    fn poll(&mut self) -> TickInput {
        self()
    }
}

/// Per-frame snapshot consumer
pub trait Renderer {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Records every frame (handy for tests and replays)
impl Renderer for Vec<Snapshot> {
    fn present(&mut self, snapshot: &Snapshot) {
        self.push(snapshot.clone());
    }
}

/// Loads whatever the renderer needs. Blocks until done.
pub trait AssetProvider {
    fn load(&mut self) -> Result<(), SimError>;
}

/// For headless hosts
#[derive(Debug, Default)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn load(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

/// Replays a fixed input sequence, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.inputs.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// Drives a simulation one host frame at a time
pub struct FrameLoop<R: Rng = Pcg32> {
    sim: Simulation<R>,
    frames: u64,
}

impl<R: Rng> FrameLoop<R> {
    /// Waits on the asset precondition once; the loop never starts without it
    pub fn new(sim: Simulation<R>, assets: &mut impl AssetProvider) -> Result<Self, SimError> {
        assets.load()?;
        log::info!("Assets ready");
        Ok(Self { sim, frames: 0 })
    }

    /// Poll, tick, present. Returns the snapshot that was presented.
    pub fn frame(
        &mut self,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
    ) -> Snapshot {
        let intents = input.poll();
        let snapshot = self.sim.step(&intents);
        renderer.present(&snapshot);
        self.frames += 1;
        snapshot
    }

    /// Run frames until the session ends or `max_frames` is hit
    pub fn run_until_game_over(
        &mut self,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
        max_frames: u64,
    ) -> Option<Snapshot> {
        for _ in 0..max_frames {
            let snapshot = self.frame(input, renderer);
            if snapshot.phase == GamePhase::GameOver {
                return Some(snapshot);
            }
        }
        None
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    struct MissingAssets;

    impl AssetProvider for MissingAssets {
        fn load(&mut self) -> Result<(), SimError> {
            Err(SimError::AssetsUnavailable("ship sprites".into()))
        }
    }

    #[test]
    fn test_refuses_to_start_without_assets() {
        let sim = Simulation::new(Tuning::default(), 1).unwrap();
        assert!(matches!(
            FrameLoop::new(sim, &mut MissingAssets),
            Err(SimError::AssetsUnavailable(_))
        ));
    }

    #[test]
    fn test_frame_presents_once_per_tick() {
        let sim = Simulation::new(Tuning::scripted(), 1).unwrap();
        let mut frame_loop = FrameLoop::new(sim, &mut NoAssets).unwrap();
        let mut input = ScriptedInput::new(vec![
            TickInput {
                start_game: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
        ]);
        let mut frames: Vec<Snapshot> = Vec::new();
        for _ in 0..3 {
            frame_loop.frame(&mut input, &mut frames);
        }
        assert!(input.is_finished());
        assert_eq!(frame_loop.frames(), 3);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].phase, GamePhase::Playing);
        assert_eq!(frames[1].player.projectiles.len(), 1);
        // Scripted input idles after running out; the shot keeps climbing
        assert_eq!(frames[2].player.projectiles[0].pos.y, 490.0);
    }

    #[test]
    fn test_closure_input_runs_to_game_over() {
        let sim = Simulation::new(Tuning::default(), 11).unwrap();
        let mut frame_loop = FrameLoop::new(sim, &mut NoAssets).unwrap();
        // Start, then sit still and let enemies leak through
        let mut started = false;
        let mut input = move || {
            let first = !started;
            started = true;
            TickInput {
                start_game: first,
                ..Default::default()
            }
        };
        let mut frames: Vec<Snapshot> = Vec::new();
        let last = frame_loop
            .run_until_game_over(&mut input, &mut frames, 200_000)
            .expect("an idle player eventually loses");
        assert!(last.player.health <= 0);
        assert_eq!(last.best_score, frame_loop.simulation().high_scores().top_score());
    }
}
