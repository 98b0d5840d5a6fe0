//! Central simulation state owned by a session and mutated by the step
//! pipeline. Presentation reads only what a step committed: the directive
//! buffer drained into each step's outcome and the log ledger of stable
//! keys (translation happens in the outer layer).

use crate::car::Car;
use crate::fx::{Directive, SpriteId, SpriteKind};
use crate::schedule::TimerQueue;
use crate::weather::WeatherState;
use crate::world::{SceneGeom, WorldState};

/// The single owner of all mutable simulation data.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub seed: u64,
    /// Accumulated simulation time in milliseconds.
    pub clock_ms: u64,
    /// World-space left edge of the viewport, advanced by the caller.
    pub camera_x: f32,
    pub car: Car,
    pub world: WorldState,
    pub weather: WeatherState,
    pub schedule: TimerQueue,
    /// Session log ledger of stable string keys.
    pub logs: Vec<String>,
    fx: Vec<Directive>,
}

impl SimState {
    /// Fresh state with the car at its road start; queues the car's own
    /// spawn directive so the first step materializes it.
    #[must_use]
    pub fn new(seed: u64, geom: &SceneGeom) -> Self {
        let car = Car::at(geom.car_start_x(), geom.car_y());
        let fx = vec![Directive::SpawnSprite {
            id: SpriteId::Car,
            kind: SpriteKind::Car,
            x: car.x,
            y: car.y,
        }];
        Self {
            seed,
            clock_ms: 0,
            camera_x: 0.0,
            car,
            world: WorldState::new(),
            weather: WeatherState::default(),
            schedule: TimerQueue::new(),
            logs: Vec::new(),
            fx,
        }
    }

    /// Append a log key to the session ledger.
    pub fn push_log(&mut self, key: &str) {
        self.logs.push(String::from(key));
    }

    /// Queue a presentation directive for this step's outcome.
    pub fn push_fx(&mut self, directive: Directive) {
        self.fx.push(directive);
    }

    /// Borrow the directive buffer for bulk emission.
    pub fn fx_mut(&mut self) -> &mut Vec<Directive> {
        &mut self.fx
    }

    /// Split borrow for passes that stream directives while mutating the
    /// world collections.
    pub(crate) fn world_and_fx(&mut self) -> (&mut WorldState, &mut Vec<Directive>) {
        (&mut self.world, &mut self.fx)
    }

    /// Take everything queued since the last drain.
    pub fn drain_fx(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.fx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::CarMode;

    #[test]
    fn new_state_queues_car_spawn() {
        let mut state = SimState::new(1, &SceneGeom::default());
        assert_eq!(state.car.mode, CarMode::Driving);
        let fx = state.drain_fx();
        assert!(matches!(
            fx.as_slice(),
            [Directive::SpawnSprite {
                id: SpriteId::Car,
                ..
            }]
        ));
        assert!(state.drain_fx().is_empty());
    }
}
