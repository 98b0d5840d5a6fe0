//! Roadloot Simulation Core
//!
//! Platform-agnostic logic for the Roadloot side-scrolling driving game:
//! deterministic chunk generation, the car/house door state machine, the
//! ambient weather cycle, and the fixed-order step pipeline. This crate
//! has no rendering, audio, or input-device dependencies; the
//! presentation side consumes per-step directives through
//! [`ScenePresenter`].

pub mod car;
pub mod chunkgen;
pub mod constants;
pub mod fx;
pub mod input;
pub mod interaction;
pub mod numbers;
pub mod rng;
pub mod schedule;
pub mod state;
pub mod step;
pub mod weather;
pub mod world;

// Re-export commonly used types
pub use car::{Car, CarMode, SavedPose};
pub use chunkgen::{
    Channel, ChunkPlan, GenConfig, GenConfigError, HousePlan, TreasurePlan, channel_unit,
    plan_chunk, world_to_chunk,
};
pub use constants::{HOUSE_PALETTE, ROOF_PALETTE};
pub use fx::{
    BurstSpec, Directive, Easing, EmitterId, ParticleKind, Prompt, PromptKind, SpriteId,
    SpriteKind, TweenSpec,
};
pub use input::{Button, InputSnapshot};
pub use rng::RngBundle;
pub use schedule::{TimerPayload, TimerQueue};
pub use state::SimState;
pub use step::{CameraFollow, Frame, SimConfig, SimConfigError, SimSession, StepOutcome};
pub use weather::{WeatherConfig, WeatherConfigError, WeatherKind, WeatherPhase, WeatherState};
pub use world::{
    House, HouseId, SceneGeom, SpawnEvent, Treasure, TreasureId, WorldState,
};

/// Trait for the presentation/engine collaborator.
///
/// The simulation addresses visuals by its own stable identifiers; an
/// implementation owns the mapping to real engine resources (sprites,
/// tweens, particle emitters) and is free to run wherever the renderer
/// lives. Platform-specific implementations should provide this.
pub trait ScenePresenter {
    /// Materialize a visual for a simulation object.
    fn spawn_sprite(&mut self, id: SpriteId, kind: SpriteKind, x: f32, y: f32);

    /// Release the visual for a simulation object.
    fn despawn_sprite(&mut self, id: SpriteId);

    /// Schedule a time-bounded property transition. Fire-and-forget: the
    /// simulation tracks completion through its own timer schedule.
    fn animate(&mut self, id: SpriteId, tween: &TweenSpec);

    /// Apply or clear a tint overlay.
    fn set_tint(&mut self, id: SpriteId, tint: Option<u32>);

    /// Show or hide a sprite without destroying it.
    fn set_visible(&mut self, id: SpriteId, visible: bool);

    /// Begin a persistent ambient particle effect.
    fn start_emitter(&mut self, id: EmitterId, kind: ParticleKind);

    /// Stop emission, letting in-flight particles finish.
    fn stop_emitter(&mut self, id: EmitterId);

    /// Release a drained emitter's resources.
    fn destroy_emitter(&mut self, id: EmitterId);

    /// One-shot particle burst at a world position.
    fn burst(&mut self, kind: ParticleKind, x: f32, y: f32, spec: &BurstSpec);

    /// Pulse the treasure counter HUD with its new value.
    fn hud_pulse(&mut self, treasures: u32);
}

/// Replay a step's directives into a presenter, in emission order.
pub fn present<P: ScenePresenter>(presenter: &mut P, outcome: &StepOutcome) {
    for directive in &outcome.directives {
        match *directive {
            Directive::SpawnSprite { id, kind, x, y } => presenter.spawn_sprite(id, kind, x, y),
            Directive::DespawnSprite { id } => presenter.despawn_sprite(id),
            Directive::Animate { id, ref tween } => presenter.animate(id, tween),
            Directive::SetTint { id, tint } => presenter.set_tint(id, tint),
            Directive::SetVisible { id, visible } => presenter.set_visible(id, visible),
            Directive::StartEmitter { id, kind } => presenter.start_emitter(id, kind),
            Directive::StopEmitter { id } => presenter.stop_emitter(id),
            Directive::DestroyEmitter { id } => presenter.destroy_emitter(id),
            Directive::Burst {
                kind,
                x,
                y,
                ref spec,
            } => presenter.burst(kind, x, y, spec),
            Directive::HudPulse { treasures } => presenter.hud_pulse(treasures),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Presenter fake that records which sprites currently exist.
    #[derive(Default)]
    struct RecordingPresenter {
        live_sprites: Vec<SpriteId>,
        emitters_started: u32,
        pulses: Vec<u32>,
    }

    impl ScenePresenter for RecordingPresenter {
        fn spawn_sprite(&mut self, id: SpriteId, _kind: SpriteKind, _x: f32, _y: f32) {
            self.live_sprites.push(id);
        }

        fn despawn_sprite(&mut self, id: SpriteId) {
            self.live_sprites.retain(|live| *live != id);
        }

        fn animate(&mut self, _id: SpriteId, _tween: &TweenSpec) {}
        fn set_tint(&mut self, _id: SpriteId, _tint: Option<u32>) {}
        fn set_visible(&mut self, _id: SpriteId, _visible: bool) {}

        fn start_emitter(&mut self, _id: EmitterId, _kind: ParticleKind) {
            self.emitters_started += 1;
        }

        fn stop_emitter(&mut self, _id: EmitterId) {}
        fn destroy_emitter(&mut self, _id: EmitterId) {}
        fn burst(&mut self, _kind: ParticleKind, _x: f32, _y: f32, _spec: &BurstSpec) {}

        fn hud_pulse(&mut self, treasures: u32) {
            self.pulses.push(treasures);
        }
    }

    #[test]
    fn presenter_sees_spawns_in_step_order() {
        let mut session = SimSession::new(9, SimConfig::default_config());
        let mut presenter = RecordingPresenter::default();
        let outcome = session.step(&Frame::idle(16, 0.0));
        present(&mut presenter, &outcome);
        assert!(presenter.live_sprites.contains(&SpriteId::Car));
        // Car plus every spawn event from the first visitation.
        assert_eq!(presenter.live_sprites.len(), 1 + outcome.spawned.len());
    }

    #[test]
    fn presenter_release_follows_eviction() {
        let mut session = SimSession::new(9, SimConfig::default_config());
        let mut presenter = RecordingPresenter::default();
        let first = session.step(&Frame::idle(16, 0.0));
        present(&mut presenter, &first);
        let live_before = presenter.live_sprites.len();

        // Teleport the camera far ahead; the sweep must release stale objects.
        let far = session.step(&Frame::idle(16, 100_000.0));
        present(&mut presenter, &far);
        assert!(far.evicted > 0);
        assert!(presenter.live_sprites.len() >= 1);
        assert!(
            presenter.live_sprites.len()
                <= live_before + far.spawned.len() - far.evicted
        );
    }
}
