//! Per-step control snapshot separating level from edge semantics.
//!
//! The door state machine depends on edge-triggered presses; holding the
//! door key must not re-trigger a transition on every frame.

use serde::{Deserialize, Serialize};

/// Logical controls the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Forward throttle; level-triggered.
    Throttle,
    /// Enter/exit the nearby house; edge-triggered.
    Door,
}

impl Button {
    const fn bit(self) -> u8 {
        match self {
            Self::Throttle => 0b01,
            Self::Door => 0b10,
        }
    }
}

/// Immutable snapshot of control state for one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: u8,
    pressed: u8,
}

impl InputSnapshot {
    /// Snapshot with nothing held and nothing pressed.
    #[must_use]
    pub const fn idle() -> Self {
        Self { held: 0, pressed: 0 }
    }

    /// Mark a button as held this step.
    #[must_use]
    pub const fn with_held(mut self, button: Button) -> Self {
        self.held |= button.bit();
        self
    }

    /// Mark a button as freshly pressed this step. A pressed button is also held.
    #[must_use]
    pub const fn with_pressed(mut self, button: Button) -> Self {
        self.pressed |= button.bit();
        self.held |= button.bit();
        self
    }

    /// Level check: the button is down this step.
    #[must_use]
    pub const fn is_held(self, button: Button) -> bool {
        self.held & button.bit() != 0
    }

    /// Edge check: the button went down this step.
    #[must_use]
    pub const fn just_pressed(self, button: Button) -> bool {
        self.pressed & button.bit() != 0
    }
}
