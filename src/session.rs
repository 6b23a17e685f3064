/// Session state machine: title screen → playing → game over → title.
///
/// The title screen is a sub-state of the main loop, not a nested blocking
/// wait: every loop iteration calls [`Session::step`] once, whatever the
/// phase, so the clock keeps ticking and quit stays responsive.

use rand::Rng;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{TickContext, World};
use crate::events::GameEvent;
use crate::input::InputSnapshot;
use crate::seed::SessionSeed;
use crate::spawner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    TitleScreen,
    Playing,
    GameOver,
}

/// What the main loop should do after this step's frame is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<R: Rng> {
    config: GameConfig,
    seed: SessionSeed,
    rng: R,
    phase: Phase,
    world: World,
    events: Vec<GameEvent>,
    music_started: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, seed: SessionSeed, rng: R) -> Self {
        let world = World::new(&config, 0);
        Self {
            config,
            seed,
            rng,
            phase: Phase::TitleScreen,
            world,
            events: Vec::new(),
            music_started: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> &SessionSeed {
        &self.seed
    }

    /// Sound events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True exactly once: the first time it is asked.  The background loop
    /// runs for the life of the process, across restarts.
    pub fn take_music_start(&mut self) -> bool {
        !std::mem::replace(&mut self.music_started, true)
    }

    /// Run one loop iteration for the current phase.
    pub fn step(&mut self, input: &InputSnapshot, now_ms: u64) -> Flow {
        match self.phase {
            Phase::TitleScreen => {
                if input.quit_requested {
                    return Flow::Quit;
                }
                if input.any_key_up {
                    self.start(now_ms);
                }
                Flow::Continue
            }
            Phase::Playing => {
                let ctx = TickContext {
                    config: &self.config,
                    seed: &self.seed,
                    now_ms,
                };
                let events = compute::tick(&mut self.world, &ctx, input, &mut self.rng);
                self.events.extend(events);

                if compute::is_game_over(&self.world) {
                    log::info!("game over, final score {}", self.world.score);
                    self.phase = Phase::GameOver;
                }
                // Finish this frame; the loop exits after drawing it
                if input.quit_requested {
                    Flow::Quit
                } else {
                    Flow::Continue
                }
            }
            Phase::GameOver => {
                self.phase = Phase::TitleScreen;
                if input.quit_requested {
                    Flow::Quit
                } else {
                    Flow::Continue
                }
            }
        }
    }

    /// Fresh world, fresh player, a full set of obstacles, score zero.
    fn start(&mut self, now_ms: u64) {
        self.world = World::new(&self.config, now_ms);
        let ctx = TickContext {
            config: &self.config,
            seed: &self.seed,
            now_ms,
        };
        spawner::populate(&mut self.world, &ctx, &mut self.rng);
        self.phase = Phase::Playing;
        log::info!(
            "session started with {} obstacles (device: {})",
            self.world.obstacles.len(),
            self.seed.cosmetic_id
        );
    }
}
