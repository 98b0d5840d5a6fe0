//! Step-loop primitives: per-frame inputs, outcomes, session tuning, and
//! the optional camera-follow helper for headless drivers.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::chunkgen::{GenConfig, GenConfigError};
use crate::fx::{Directive, Prompt};
use crate::input::InputSnapshot;
use crate::weather::{WeatherConfig, WeatherConfigError};
use crate::world::{SceneGeom, SpawnEvent};

pub mod phase;
pub mod session;
pub use session::SimSession;

/// Everything the outside world feeds into one simulation step. The
/// camera is advanced by the caller's follow policy; the simulation only
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub dt_ms: u64,
    pub input: InputSnapshot,
    pub camera_x: f32,
}

impl Frame {
    /// A coasting frame with no input, useful for tests and warmups.
    #[must_use]
    pub const fn idle(dt_ms: u64, camera_x: f32) -> Self {
        Self {
            dt_ms,
            input: InputSnapshot::idle(),
            camera_x,
        }
    }
}

/// What one step committed: directives for the presentation, plus the
/// summary counters scenario harnesses assert on.
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// World objects materialized this step.
    pub spawned: SmallVec<[SpawnEvent; 4]>,
    /// Presentation instructions, in emission order.
    pub directives: Vec<Directive>,
    /// Affordance prompt to show, if any.
    pub prompt: Option<Prompt>,
    /// Treasures collected this step.
    pub collected: u32,
    /// World objects released by the eviction sweep this step.
    pub evicted: usize,
}

/// Aggregate tuning for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub geom: SceneGeom,
    #[serde(default)]
    pub generation: GenConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// Validation failures for [`SimConfig`].
#[derive(Debug, Error)]
pub enum SimConfigError {
    #[error("generation: {0}")]
    Generation(#[from] GenConfigError),
    #[error("weather: {0}")]
    Weather(#[from] WeatherConfigError),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SimConfig {
    /// Built-in tuning matching the shipped game.
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Load session tuning from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self, SimConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Check all nested tuning blocks.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.generation.validate()?;
        self.weather.validate()?;
        Ok(())
    }
}

/// The original scene's camera policy: keep the car a third of the way in
/// from the left, never scrolling backwards past the road start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    offset: f32,
    last: f32,
}

impl CameraFollow {
    #[must_use]
    pub fn new(geom: &SceneGeom) -> Self {
        Self {
            offset: geom.view_w / 3.0,
            last: 0.0,
        }
    }

    /// Camera left edge for the current car position.
    pub fn track(&mut self, car_x: f32) -> f32 {
        self.last = (car_x - self.offset).max(0.0);
        self.last
    }

    /// Most recently computed camera position.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.last
    }
}
