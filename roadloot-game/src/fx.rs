//! Presentation directives emitted by the simulation.
//!
//! The core never talks to a renderer directly. Each step produces a list
//! of tagged directive records keyed by simulation identifiers; whatever
//! owns the actual sprites, tweens, and particle emitters replays them
//! (see [`crate::ScenePresenter`]). Specs are plain data validated at
//! construction, never engine callback objects.

use serde::{Deserialize, Serialize};

use crate::constants::DOOR_CAR_SCALE;
use crate::world::{HouseId, TreasureId};

/// Identifier for a particle emitter resource owned by the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmitterId(pub u32);

/// Simulation-side identity of a drawable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Car,
    House(HouseId),
    Treasure(TreasureId),
}

/// What a sprite should look like when first materialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    Car,
    House { color: usize },
    Treasure { bob_phase: f32 },
}

/// Particle effect families the presentation knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Rain,
    Snow,
    Sparkle,
}

/// Easing curves for property tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    SineInOut,
}

/// Time-bounded property transition. Fire-and-forget: completion logic
/// lives in the simulation's timer schedule, not in a callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenSpec {
    pub to_x: f32,
    pub to_y: f32,
    pub scale: f32,
    pub alpha: f32,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl TweenSpec {
    /// Build a tween, clamping scale/alpha into sane ranges and enforcing
    /// a non-zero duration.
    #[must_use]
    pub fn new(
        to_x: f32,
        to_y: f32,
        scale: f32,
        alpha: f32,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            to_x,
            to_y,
            scale: scale.clamp(0.0, 10.0),
            alpha: alpha.clamp(0.0, 1.0),
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// Shrink-and-fade toward a house anchor (door entry).
    #[must_use]
    pub fn shrink_into(x: f32, y: f32, duration_ms: u64) -> Self {
        Self::new(x, y, DOOR_CAR_SCALE, 0.0, duration_ms, Easing::QuadIn)
    }

    /// Grow-and-fade back to a remembered pose (door exit).
    #[must_use]
    pub fn grow_to(x: f32, y: f32, duration_ms: u64) -> Self {
        Self::new(x, y, 1.0, 1.0, duration_ms, Easing::QuadOut)
    }
}

/// Parameters for a one-shot particle burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstSpec {
    pub count: u32,
    pub speed: f32,
    pub lifetime_ms: u64,
}

impl BurstSpec {
    /// Build a burst, enforcing at least one particle and a non-zero lifetime.
    #[must_use]
    pub fn new(count: u32, speed: f32, lifetime_ms: u64) -> Self {
        Self {
            count: count.max(1),
            speed: speed.max(0.0),
            lifetime_ms: lifetime_ms.max(1),
        }
    }

    /// Celebratory burst used when a treasure is collected.
    #[must_use]
    pub fn sparkle() -> Self {
        Self::new(24, 140.0, 600)
    }
}

/// One presentation instruction, keyed by simulation identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    SpawnSprite {
        id: SpriteId,
        kind: SpriteKind,
        x: f32,
        y: f32,
    },
    DespawnSprite {
        id: SpriteId,
    },
    Animate {
        id: SpriteId,
        tween: TweenSpec,
    },
    SetTint {
        id: SpriteId,
        tint: Option<u32>,
    },
    SetVisible {
        id: SpriteId,
        visible: bool,
    },
    StartEmitter {
        id: EmitterId,
        kind: ParticleKind,
    },
    StopEmitter {
        id: EmitterId,
    },
    DestroyEmitter {
        id: EmitterId,
    },
    Burst {
        kind: ParticleKind,
        x: f32,
        y: f32,
        spec: BurstSpec,
    },
    HudPulse {
        treasures: u32,
    },
}

/// Affordance prompt shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Enter,
    Exit,
}

/// Prompt anchored to a house, recomputed every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub kind: PromptKind,
    pub house: HouseId,
    pub x: f32,
    pub y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_construction_clamps_ranges() {
        let tween = TweenSpec::new(0.0, 0.0, -2.0, 4.0, 0, Easing::Linear);
        assert!((tween.scale - 0.0).abs() < f32::EPSILON);
        assert!((tween.alpha - 1.0).abs() < f32::EPSILON);
        assert_eq!(tween.duration_ms, 1);
    }

    #[test]
    fn burst_construction_enforces_minimums() {
        let burst = BurstSpec::new(0, -5.0, 0);
        assert_eq!(burst.count, 1);
        assert!((burst.speed - 0.0).abs() < f32::EPSILON);
        assert_eq!(burst.lifetime_ms, 1);
    }
}
