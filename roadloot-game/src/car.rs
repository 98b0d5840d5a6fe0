//! The player car: arcade physics and the door-interaction mode tag.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{CAR_ACCEL, CAR_DRAG, CAR_MAX_SPEED, CAR_WIDTH};
use crate::world::HouseId;

/// Interaction state the car is currently in. Transitions are driven by
/// [`crate::interaction`]; physics only integrates while `Driving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CarMode {
    #[default]
    Driving,
    Entering {
        house: HouseId,
    },
    Inside {
        house: HouseId,
    },
    Exiting {
        house: HouseId,
    },
}

impl CarMode {
    #[must_use]
    pub const fn is_driving(self) -> bool {
        matches!(self, Self::Driving)
    }

    /// The house a non-driving mode refers to, if any.
    #[must_use]
    pub const fn active_house(self) -> Option<HouseId> {
        match self {
            Self::Driving => None,
            Self::Entering { house } | Self::Inside { house } | Self::Exiting { house } => {
                Some(house)
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Entering { .. } => "entering",
            Self::Inside { .. } => "inside",
            Self::Exiting { .. } => "exiting",
        }
    }
}

impl fmt::Display for CarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pose remembered when the car enters a house, restored on exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedPose {
    pub x: f32,
    pub y: f32,
}

/// The single player-controlled entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub x: f32,
    pub y: f32,
    /// Horizontal velocity, clamped to [0, max]; the car never reverses.
    pub vx: f32,
    pub ax: f32,
    pub mode: CarMode,
    /// Present from door entry until the exit transition completes.
    pub saved: Option<SavedPose>,
}

impl Car {
    /// Place a fresh car at a world position, driving, at rest.
    #[must_use]
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            ax: 0.0,
            mode: CarMode::Driving,
            saved: None,
        }
    }

    /// Advance arcade physics by one step. Throttle applies forward
    /// acceleration; otherwise drag bleeds speed off. Velocity is clamped
    /// so the car can brake to a stop but never roll backwards.
    pub fn integrate(&mut self, throttle: bool, dt_s: f32) {
        if !self.mode.is_driving() {
            return;
        }
        self.ax = if throttle { CAR_ACCEL } else { 0.0 };
        if throttle {
            self.vx += self.ax * dt_s;
        } else {
            self.vx -= CAR_DRAG * dt_s;
        }
        self.vx = self.vx.clamp(0.0, CAR_MAX_SPEED);
        self.x += self.vx * dt_s;
    }

    /// Zero out motion; used when a door transition freezes physics.
    pub const fn halt(&mut self) {
        self.vx = 0.0;
        self.ax = 0.0;
    }

    /// Horizontal footprint as (left, right) edges.
    #[must_use]
    pub fn footprint(&self) -> (f32, f32) {
        (self.x - CAR_WIDTH / 2.0, self.x + CAR_WIDTH / 2.0)
    }
}
