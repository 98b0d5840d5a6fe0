//! Door state machine: Driving -> Entering -> Inside -> Exiting -> Driving.
//!
//! Transitions are gated by the car's current mode, never by separate
//! guard flags; input observed mid-transition is simply ignored. The two
//! timed legs are fixed-duration timer entries paired with fire-and-forget
//! tween directives, so nothing here is cancellable once started.

use crate::car::{CarMode, SavedPose};
use crate::constants::{
    DOOR_TWEEN_MS, LOG_HOUSE_ENTER, LOG_HOUSE_EXIT, LOG_HOUSE_INSIDE, LOG_HOUSE_RESUME,
    OCCUPIED_TINT, PROMPT_RISE,
};
use crate::fx::{Directive, Prompt, PromptKind, SpriteId, TweenSpec};
use crate::input::{Button, InputSnapshot};
use crate::schedule::TimerPayload;
use crate::state::SimState;
use crate::world::HouseId;

/// React to this step's door input. While Driving, an edge with an
/// overlapping house begins entry; while Inside, an edge begins exit;
/// mid-transition everything is ignored.
pub fn handle_door_input(state: &mut SimState, input: InputSnapshot) {
    if !input.just_pressed(Button::Door) {
        return;
    }
    match state.car.mode {
        CarMode::Driving => {
            if let Some(house) = state.world.nearest_overlapping_house(state.car.x) {
                begin_enter(state, house);
            }
        }
        CarMode::Inside { house } => begin_exit(state, house),
        CarMode::Entering { .. } | CarMode::Exiting { .. } => {}
    }
}

/// Freeze the car, remember its pose, and start the shrink transition
/// toward the house anchor.
fn begin_enter(state: &mut SimState, house: HouseId) {
    let Some(anchor) = state.world.house(house).map(|h| (h.x, h.y)) else {
        return;
    };
    state.car.halt();
    state.car.saved = Some(SavedPose {
        x: state.car.x,
        y: state.car.y,
    });
    state.car.mode = CarMode::Entering { house };
    state.push_fx(Directive::Animate {
        id: SpriteId::Car,
        tween: TweenSpec::shrink_into(anchor.0, anchor.1, DOOR_TWEEN_MS),
    });
    state
        .schedule
        .schedule(state.clock_ms + DOOR_TWEEN_MS, TimerPayload::FinishEnter { house });
    state.push_log(LOG_HOUSE_ENTER);
}

/// The shrink transition finished: the car is now inside the house.
pub fn finish_enter(state: &mut SimState, house: HouseId) {
    if state.car.mode != (CarMode::Entering { house }) {
        return;
    }
    let Some(entry) = state.world.house_mut(house) else {
        // House vanished mid-transition; fall back to driving in place.
        state.car.mode = CarMode::Driving;
        state.car.saved = None;
        return;
    };
    entry.occupied = true;
    state.car.mode = CarMode::Inside { house };
    state.push_fx(Directive::SetVisible {
        id: SpriteId::Car,
        visible: false,
    });
    state.push_fx(Directive::SetTint {
        id: SpriteId::House(house),
        tint: Some(OCCUPIED_TINT),
    });
    state.push_log(LOG_HOUSE_INSIDE);
}

/// Pop the car back out at the house anchor and start the grow transition
/// toward the remembered pose.
fn begin_exit(state: &mut SimState, house: HouseId) {
    let Some(anchor) = state.world.house(house).map(|h| (h.x, h.y)) else {
        return;
    };
    let target = state.car.saved.unwrap_or(SavedPose {
        x: state.car.x,
        y: state.car.y,
    });
    state.car.x = anchor.0;
    state.car.y = anchor.1;
    state.car.mode = CarMode::Exiting { house };
    state.push_fx(Directive::SetTint {
        id: SpriteId::House(house),
        tint: None,
    });
    state.push_fx(Directive::SetVisible {
        id: SpriteId::Car,
        visible: true,
    });
    state.push_fx(Directive::Animate {
        id: SpriteId::Car,
        tween: TweenSpec::grow_to(target.x, target.y, DOOR_TWEEN_MS),
    });
    state
        .schedule
        .schedule(state.clock_ms + DOOR_TWEEN_MS, TimerPayload::FinishExit { house });
    state.push_log(LOG_HOUSE_EXIT);
}

/// The grow transition finished: restore the pre-entry pose and hand
/// control back to physics.
pub fn finish_exit(state: &mut SimState, house: HouseId) {
    if state.car.mode != (CarMode::Exiting { house }) {
        return;
    }
    if let Some(pose) = state.car.saved.take() {
        state.car.x = pose.x;
        state.car.y = pose.y;
    }
    if let Some(entry) = state.world.house_mut(house) {
        entry.occupied = false;
    }
    state.car.mode = CarMode::Driving;
    state.push_log(LOG_HOUSE_RESUME);
}

/// The affordance prompt for this step, if any: "enter" while driving
/// beside a house, "exit" while inside one.
#[must_use]
pub fn current_prompt(state: &SimState) -> Option<Prompt> {
    match state.car.mode {
        CarMode::Driving => {
            let house = state.world.nearest_overlapping_house(state.car.x)?;
            prompt_for(state, PromptKind::Enter, house)
        }
        CarMode::Inside { house } => prompt_for(state, PromptKind::Exit, house),
        CarMode::Entering { .. } | CarMode::Exiting { .. } => None,
    }
}

fn prompt_for(state: &SimState, kind: PromptKind, house: HouseId) -> Option<Prompt> {
    let entry = state.world.house(house)?;
    Some(Prompt {
        kind,
        house,
        x: entry.x,
        y: entry.y - PROMPT_RISE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunkgen::GenConfig;
    use crate::world::SceneGeom;

    fn state_with_house() -> (SimState, HouseId) {
        let geom = SceneGeom::default();
        let mut state = SimState::new(1, &geom);
        let cfg = GenConfig::default_config();
        let mut fx = Vec::new();
        state.world.visit_chunks(0.0, &geom, &cfg, &mut fx);
        let house = state.world.houses[0].id;
        // Park the car on the house footprint.
        state.car.x = state.world.house(house).unwrap().x;
        (state, house)
    }

    fn door_edge() -> InputSnapshot {
        InputSnapshot::idle().with_pressed(Button::Door)
    }

    #[test]
    fn enter_edge_without_overlap_is_inert() {
        let geom = SceneGeom::default();
        let mut state = SimState::new(1, &geom);
        handle_door_input(&mut state, door_edge());
        assert_eq!(state.car.mode, CarMode::Driving);
        assert!(state.schedule.is_empty());
    }

    #[test]
    fn enter_edge_with_overlap_transitions_once() {
        let (mut state, house) = state_with_house();
        state.car.vx = 140.0;
        handle_door_input(&mut state, door_edge());
        assert_eq!(state.car.mode, CarMode::Entering { house });
        assert!((state.car.vx - 0.0).abs() < f32::EPSILON);
        assert!(state.car.saved.is_some());
        let timers = state.schedule.len();

        // A second edge mid-transition must not stack another entry.
        handle_door_input(&mut state, door_edge());
        assert_eq!(state.car.mode, CarMode::Entering { house });
        assert_eq!(state.schedule.len(), timers);
    }

    #[test]
    fn full_cycle_restores_pose_and_flags() {
        let (mut state, house) = state_with_house();
        let start = (state.car.x, state.car.y);

        handle_door_input(&mut state, door_edge());
        state.clock_ms += DOOR_TWEEN_MS;
        finish_enter(&mut state, house);
        assert_eq!(state.car.mode, CarMode::Inside { house });
        assert!(state.world.house(house).unwrap().occupied);
        assert_eq!(
            current_prompt(&state).map(|p| p.kind),
            Some(PromptKind::Exit)
        );

        handle_door_input(&mut state, door_edge());
        assert_eq!(state.car.mode, CarMode::Exiting { house });
        assert!(state.world.house(house).unwrap().occupied);
        assert!(current_prompt(&state).is_none());

        state.clock_ms += DOOR_TWEEN_MS;
        finish_exit(&mut state, house);
        assert_eq!(state.car.mode, CarMode::Driving);
        assert!(!state.world.house(house).unwrap().occupied);
        assert!((state.car.x - start.0).abs() < 1e-3);
        assert!((state.car.y - start.1).abs() < 1e-3);
        assert!(state.car.saved.is_none());
    }

    #[test]
    fn stale_finish_events_are_noops() {
        let (mut state, house) = state_with_house();
        finish_enter(&mut state, house);
        assert_eq!(state.car.mode, CarMode::Driving);
        finish_exit(&mut state, house);
        assert_eq!(state.car.mode, CarMode::Driving);
    }
}
