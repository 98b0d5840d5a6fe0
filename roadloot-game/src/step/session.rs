//! High-level session wrapper binding tuning, RNG streams, and state to
//! the per-frame step pipeline.

use crate::rng::RngBundle;
use crate::state::SimState;
use crate::step::phase::{
    EvictPhase, InteractionPhase, LootPhase, PhysicsPhase, PromptPhase, SpawnPhase, TimerPhase,
};
use crate::step::{Frame, SimConfig, StepOutcome};
use crate::weather;

/// One running simulation. Construct it, then feed it one [`Frame`] per
/// presentation tick; everything else is internal.
#[derive(Debug)]
pub struct SimSession {
    cfg: SimConfig,
    state: SimState,
    rngs: RngBundle,
}

impl SimSession {
    /// Start a session from a user seed and tuning. The first weather
    /// activation is queued immediately so the cycle runs unattended.
    #[must_use]
    pub fn new(seed: u64, cfg: SimConfig) -> Self {
        let mut state = SimState::new(seed, &cfg.geom);
        let rngs = RngBundle::from_user_seed(seed);
        weather::schedule_first_activation(&mut state, &cfg.weather, &rngs);
        Self { cfg, state, rngs }
    }

    /// Advance the simulation by one step.
    ///
    /// Order within the step is fixed: clock/camera commit, due timers,
    /// interaction transitions, car physics, chunk spawning, eviction,
    /// Driving-only treasure collection, prompt computation.
    pub fn step(&mut self, frame: &Frame) -> StepOutcome {
        self.state.clock_ms += frame.dt_ms;
        self.state.camera_x = frame.camera_x;

        TimerPhase::new(&mut self.state).run(&self.cfg, &self.rngs);
        InteractionPhase::new(&mut self.state).run(frame.input);
        PhysicsPhase::new(&mut self.state).run(frame.input, frame.dt_ms);
        let spawned = SpawnPhase::new(&mut self.state).run(&self.cfg);
        let evicted = EvictPhase::new(&mut self.state).run(&self.cfg);
        let collected = LootPhase::new(&mut self.state).run();
        let prompt = PromptPhase::new(&mut self.state).run();

        StepOutcome {
            spawned,
            directives: self.state.drain_fx(),
            prompt,
            collected,
            evicted,
        }
    }

    /// Borrow the underlying immutable state.
    #[must_use]
    pub const fn state(&self) -> &SimState {
        &self.state
    }

    /// Borrow the underlying mutable state.
    pub const fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    /// The session's tuning.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// Consume the session, returning the final state.
    #[must_use]
    pub fn into_state(self) -> SimState {
        self.state
    }

    /// Restart the session deterministically on a new seed, keeping the
    /// tuning.
    pub fn reseed(&mut self, seed: u64) {
        self.state = SimState::new(seed, &self.cfg.geom);
        self.rngs = RngBundle::from_user_seed(seed);
        weather::schedule_first_activation(&mut self.state, &self.cfg.weather, &self.rngs);
    }
}
