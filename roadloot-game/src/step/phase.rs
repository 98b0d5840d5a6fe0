//! Phase-scoped wrappers for the step pipeline.
//!
//! Each phase owns `&mut SimState` for its slice of the step. The
//! pipeline order is load-bearing: due timers fire first, interaction
//! transitions are checked before any new chunk spawns, generation runs
//! before eviction, and the Driving-only treasure sweep comes after the
//! state machine so an enter consumed this step cannot also collect.

use smallvec::SmallVec;

use crate::constants::LOG_TREASURE_COLLECTED;
use crate::fx::{BurstSpec, Directive, ParticleKind, Prompt, SpriteId};
use crate::input::{Button, InputSnapshot};
use crate::interaction;
use crate::rng::RngBundle;
use crate::schedule::TimerPayload;
use crate::state::SimState;
use crate::step::SimConfig;
use crate::weather;
use crate::world::SpawnEvent;

pub(super) struct TimerPhase<'a> {
    state: &'a mut SimState,
}

impl<'a> TimerPhase<'a> {
    pub(super) const fn new(state: &'a mut SimState) -> Self {
        Self { state }
    }

    pub(super) fn run(&mut self, cfg: &SimConfig, rngs: &RngBundle) {
        let due = self.state.schedule.drain_due(self.state.clock_ms);
        for payload in due {
            match payload {
                TimerPayload::FinishEnter { house } => {
                    interaction::finish_enter(self.state, house);
                }
                TimerPayload::FinishExit { house } => {
                    interaction::finish_exit(self.state, house);
                }
                TimerPayload::WeatherStart => {
                    weather::start_weather(self.state, &cfg.weather, rngs);
                }
                TimerPayload::WeatherStop => {
                    weather::stop_weather(self.state, &cfg.weather, rngs);
                }
                TimerPayload::ReleaseEmitter { emitter } => {
                    weather::release_emitter(self.state, emitter);
                }
            }
        }
    }
}

pub(super) struct InteractionPhase<'a> {
    state: &'a mut SimState,
}

impl<'a> InteractionPhase<'a> {
    pub(super) const fn new(state: &'a mut SimState) -> Self {
        Self { state }
    }

    pub(super) fn run(&mut self, input: InputSnapshot) {
        interaction::handle_door_input(self.state, input);
    }
}

pub(super) struct PhysicsPhase<'a> {
    state: &'a mut SimState,
}

impl<'a> PhysicsPhase<'a> {
    pub(super) const fn new(state: &'a mut SimState) -> Self {
        Self { state }
    }

    pub(super) fn run(&mut self, input: InputSnapshot, dt_ms: u64) {
        let dt_s = dt_ms as f32 / 1_000.0;
        self.state
            .car
            .integrate(input.is_held(Button::Throttle), dt_s);
    }
}

pub(super) struct SpawnPhase<'a> {
    state: &'a mut SimState,
}

impl<'a> SpawnPhase<'a> {
    pub(super) const fn new(state: &'a mut SimState) -> Self {
        Self { state }
    }

    pub(super) fn run(&mut self, cfg: &SimConfig) -> SmallVec<[SpawnEvent; 4]> {
        let camera_x = self.state.camera_x;
        let (world, fx) = self.state.world_and_fx();
        world.visit_chunks(camera_x, &cfg.geom, &cfg.generation, fx)
    }
}

pub(super) struct EvictPhase<'a> {
    state: &'a mut SimState,
}

impl<'a> EvictPhase<'a> {
    pub(super) const fn new(state: &'a mut SimState) -> Self {
        Self { state }
    }

    pub(super) fn run(&mut self, cfg: &SimConfig) -> usize {
        let camera_x = self.state.camera_x;
        let exempt = self.state.car.mode.active_house();
        let (world, fx) = self.state.world_and_fx();
        world.evict(camera_x, &cfg.generation, exempt, fx)
    }
}

pub(super) struct LootPhase<'a> {
    state: &'a mut SimState,
}

impl<'a> LootPhase<'a> {
    pub(super) const fn new(state: &'a mut SimState) -> Self {
        Self { state }
    }

    /// Collect every chest the car overlaps, Driving only.
    pub(super) fn run(&mut self) -> u32 {
        if !self.state.car.mode.is_driving() {
            return 0;
        }
        let overlapping = self.state.world.treasures_overlapping(self.state.car.x);
        let mut collected = 0;
        for id in overlapping {
            let Some(chest) = self.state.world.collect(id) else {
                continue;
            };
            collected += 1;
            self.state.push_fx(Directive::DespawnSprite {
                id: SpriteId::Treasure(chest.id),
            });
            self.state.push_fx(Directive::Burst {
                kind: ParticleKind::Sparkle,
                x: chest.x,
                y: chest.y,
                spec: BurstSpec::sparkle(),
            });
            let total = self.state.world.treasures_collected;
            self.state.push_fx(Directive::HudPulse { treasures: total });
            self.state.push_log(LOG_TREASURE_COLLECTED);
        }
        collected
    }
}

pub(super) struct PromptPhase<'a> {
    state: &'a mut SimState,
}

impl<'a> PromptPhase<'a> {
    pub(super) const fn new(state: &'a mut SimState) -> Self {
        Self { state }
    }

    pub(super) fn run(&mut self) -> Option<Prompt> {
        interaction::current_prompt(self.state)
    }
}
