//! Scripted input policies for headless runs.
//!
//! A policy turns the current simulation state into one input snapshot
//! per step, with correct edge semantics: a door press is emitted for a
//! single step, never held across frames.

use roadloot_game::{Button, CarMode, HouseId, InputSnapshot, Prompt, PromptKind, SimState};

/// Play styles available to scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivePolicy {
    /// Hold the throttle, ignore every house.
    Cruise,
    /// Hold the throttle, but enter each newly prompted house, dwell
    /// inside for a fixed simulated time, then leave.
    DoorHopper { dwell_ms: u64 },
    /// Pulse the throttle so the car repeatedly coasts to a stop.
    Pulse { on_steps: u32, off_steps: u32 },
}

/// Stateful driver applying a [`DrivePolicy`] step by step.
#[derive(Debug)]
pub struct PolicyDriver {
    policy: DrivePolicy,
    step_index: u32,
    inside_since: Option<u64>,
    last_visited: Option<HouseId>,
}

impl PolicyDriver {
    #[must_use]
    pub fn new(policy: DrivePolicy) -> Self {
        Self {
            policy,
            step_index: 0,
            inside_since: None,
            last_visited: None,
        }
    }

    /// Input for the upcoming step, given the state and the previous
    /// step's prompt.
    pub fn next_input(&mut self, state: &SimState, prompt: Option<&Prompt>) -> InputSnapshot {
        self.step_index += 1;
        match self.policy {
            DrivePolicy::Cruise => InputSnapshot::idle().with_held(Button::Throttle),
            DrivePolicy::Pulse {
                on_steps,
                off_steps,
            } => {
                let cycle = on_steps + off_steps;
                if self.step_index % cycle.max(1) < on_steps {
                    InputSnapshot::idle().with_held(Button::Throttle)
                } else {
                    InputSnapshot::idle()
                }
            }
            DrivePolicy::DoorHopper { dwell_ms } => self.door_hopper_input(state, prompt, dwell_ms),
        }
    }

    fn door_hopper_input(
        &mut self,
        state: &SimState,
        prompt: Option<&Prompt>,
        dwell_ms: u64,
    ) -> InputSnapshot {
        match state.car.mode {
            CarMode::Driving => {
                self.inside_since = None;
                if let Some(prompt) = prompt
                    && prompt.kind == PromptKind::Enter
                    && self.last_visited != Some(prompt.house)
                {
                    self.last_visited = Some(prompt.house);
                    return InputSnapshot::idle().with_pressed(Button::Door);
                }
                InputSnapshot::idle().with_held(Button::Throttle)
            }
            CarMode::Inside { .. } => {
                let since = *self.inside_since.get_or_insert(state.clock_ms);
                if state.clock_ms.saturating_sub(since) >= dwell_ms {
                    InputSnapshot::idle().with_pressed(Button::Door)
                } else {
                    InputSnapshot::idle()
                }
            }
            CarMode::Entering { .. } | CarMode::Exiting { .. } => InputSnapshot::idle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadloot_game::SceneGeom;

    #[test]
    fn cruise_always_holds_throttle() {
        let state = SimState::new(1, &SceneGeom::default());
        let mut driver = PolicyDriver::new(DrivePolicy::Cruise);
        let input = driver.next_input(&state, None);
        assert!(input.is_held(Button::Throttle));
        assert!(!input.just_pressed(Button::Door));
    }

    #[test]
    fn pulse_alternates_throttle() {
        let state = SimState::new(1, &SceneGeom::default());
        let mut driver = PolicyDriver::new(DrivePolicy::Pulse {
            on_steps: 2,
            off_steps: 2,
        });
        let pattern: Vec<bool> = (0..8)
            .map(|_| driver.next_input(&state, None).is_held(Button::Throttle))
            .collect();
        assert!(pattern.contains(&true));
        assert!(pattern.contains(&false));
    }

    #[test]
    fn door_hopper_presses_once_per_house() {
        let mut state = SimState::new(1, &SceneGeom::default());
        let mut driver = PolicyDriver::new(DrivePolicy::DoorHopper { dwell_ms: 500 });
        let prompt = Prompt {
            kind: PromptKind::Enter,
            house: HouseId(3),
            x: 0.0,
            y: 0.0,
        };
        assert!(
            driver
                .next_input(&state, Some(&prompt))
                .just_pressed(Button::Door)
        );
        // Same house prompted again after the visit: no re-entry.
        assert!(
            !driver
                .next_input(&state, Some(&prompt))
                .just_pressed(Button::Door)
        );

        // Inside: waits out the dwell, then exits.
        state.car.mode = CarMode::Inside { house: HouseId(3) };
        state.clock_ms = 10_000;
        assert!(!driver.next_input(&state, None).just_pressed(Button::Door));
        state.clock_ms = 10_600;
        assert!(driver.next_input(&state, None).just_pressed(Button::Door));
    }
}
