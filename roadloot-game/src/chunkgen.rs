//! Deterministic per-chunk decision function and its tuning knobs.
//!
//! World space is divided into fixed-width chunks indexed by
//! `floor(x / chunk_width)`. Whether a chunk holds a house or a treasure,
//! and every per-object attribute, is a pure function of the chunk index:
//! the same index yields the same answers on every visit, across runs,
//! with no stored state. Each decision draws from its own channel so that
//! presence, color, and jitter stay uncorrelated despite sharing an index.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::HOUSE_PALETTE;
use crate::numbers::{clamp_f64_to_f32, floor_f64_to_i64};

/// Independent randomness channels derived from one chunk index.
///
/// Each channel owns a distinct affine transform `index * mul + add`; the
/// transformed key is avalanched before mapping to [0,1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    HousePresence,
    HouseX,
    HouseColor,
    HouseY,
    TreasurePresence,
    TreasureX,
    TreasureBob,
}

impl Channel {
    const fn affine(self) -> (i64, i64) {
        match self {
            Self::HousePresence => (7, 1),
            Self::HouseX => (11, 5),
            Self::HouseColor => (17, 7),
            Self::HouseY => (19, 9),
            Self::TreasurePresence => (13, 3),
            Self::TreasureBob => (23, 11),
            Self::TreasureX => (29, 13),
        }
    }
}

/// SplitMix64 finalizer. Not cryptographic; its only job is to decorrelate
/// neighboring affine keys.
const fn avalanche(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Sample one channel for a chunk, in [0,1).
#[must_use]
pub fn channel_unit(chunk: i64, channel: Channel) -> f64 {
    let (mul, add) = channel.affine();
    let key = chunk.wrapping_mul(mul).wrapping_add(add) as u64;
    let bits = avalanche(key) >> 11;
    bits as f64 / (1u64 << 53) as f64
}

/// Chunk index containing a world-space x coordinate.
#[must_use]
pub fn world_to_chunk(x: f32, chunk_width: f32) -> i64 {
    floor_f64_to_i64(f64::from(x) / f64::from(chunk_width))
}

/// Tuning knobs for procedural generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Width of one chunk in world units.
    pub chunk_width: f32,
    /// Probability a chunk spawns a house.
    pub house_chance: f64,
    /// Probability a chunk spawns a treasure chest.
    pub treasure_chance: f64,
    /// Chunks materialized past the right edge of the viewport.
    pub lookahead_chunks: i64,
    /// Distance behind the camera's left edge at which objects are swept.
    pub evict_behind: f32,
    /// Margin kept clear at both chunk edges when jittering object x.
    pub edge_margin: f32,
    /// Gap between the road top and the lowest possible house anchor.
    pub house_y_gap: f32,
    /// Extra vertical jitter applied above the gap.
    pub house_y_jitter: f32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Validation failures for [`GenConfig`].
#[derive(Debug, Error)]
pub enum GenConfigError {
    #[error("chunk width must be positive, got {0}")]
    NonPositiveChunkWidth(f32),
    #[error("{name} must lie in [0,1], got {value}")]
    ChanceOutOfRange { name: &'static str, value: f64 },
    #[error("edge margins ({margin}) leave no room inside a chunk of width {width}")]
    MarginTooWide { margin: f32, width: f32 },
    #[error("lookahead must be non-negative, got {0}")]
    NegativeLookahead(i64),
    #[error("eviction distance must be non-negative, got {0}")]
    NegativeEviction(f32),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GenConfig {
    /// Built-in tuning matching the shipped game.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            chunk_width: 350.0,
            house_chance: 0.6,
            treasure_chance: 0.12,
            lookahead_chunks: 2,
            evict_behind: 400.0,
            edge_margin: 50.0,
            house_y_gap: 24.0,
            house_y_jitter: 30.0,
        }
    }

    /// Load generation tuning from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self, GenConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the tuning for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), GenConfigError> {
        if self.chunk_width <= 0.0 {
            return Err(GenConfigError::NonPositiveChunkWidth(self.chunk_width));
        }
        for (name, value) in [
            ("house_chance", self.house_chance),
            ("treasure_chance", self.treasure_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenConfigError::ChanceOutOfRange { name, value });
            }
        }
        if self.edge_margin * 2.0 >= self.chunk_width {
            return Err(GenConfigError::MarginTooWide {
                margin: self.edge_margin,
                width: self.chunk_width,
            });
        }
        if self.lookahead_chunks < 0 {
            return Err(GenConfigError::NegativeLookahead(self.lookahead_chunks));
        }
        if self.evict_behind < 0.0 {
            return Err(GenConfigError::NegativeEviction(self.evict_behind));
        }
        Ok(())
    }

    /// Jittered x position inside a chunk for the given channel.
    fn jittered_x(&self, chunk: i64, channel: Channel) -> f32 {
        let span = f64::from(self.chunk_width - 2.0 * self.edge_margin);
        let base = chunk as f64 * f64::from(self.chunk_width) + f64::from(self.edge_margin);
        clamp_f64_to_f32(base + channel_unit(chunk, channel) * span)
    }
}

/// Deterministic house attributes for one chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HousePlan {
    /// World-space x of the house anchor.
    pub x: f32,
    /// How far above the road top the anchor sits.
    pub y_drop: f32,
    /// Index into the fixed wall/roof palette.
    pub color: usize,
}

/// Deterministic treasure attributes for one chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreasurePlan {
    /// World-space x of the chest.
    pub x: f32,
    /// Idle bob animation phase offset in [0,1).
    pub bob_phase: f32,
}

/// Everything a chunk deterministically contains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkPlan {
    pub index: i64,
    pub house: Option<HousePlan>,
    pub treasure: Option<TreasurePlan>,
}

/// Decide the contents of a chunk. Pure: no state, no session seed.
#[must_use]
pub fn plan_chunk(index: i64, cfg: &GenConfig) -> ChunkPlan {
    let house = (channel_unit(index, Channel::HousePresence) < cfg.house_chance).then(|| {
        let palette_span = HOUSE_PALETTE.len() as f64;
        let color = floor_f64_to_i64(channel_unit(index, Channel::HouseColor) * palette_span);
        HousePlan {
            x: cfg.jittered_x(index, Channel::HouseX),
            y_drop: clamp_f64_to_f32(
                f64::from(cfg.house_y_gap)
                    + channel_unit(index, Channel::HouseY) * f64::from(cfg.house_y_jitter),
            ),
            color: color.clamp(0, HOUSE_PALETTE.len() as i64 - 1) as usize,
        }
    });
    let treasure = (channel_unit(index, Channel::TreasurePresence) < cfg.treasure_chance).then(|| {
        TreasurePlan {
            x: cfg.jittered_x(index, Channel::TreasureX),
            bob_phase: clamp_f64_to_f32(channel_unit(index, Channel::TreasureBob)),
        }
    });
    ChunkPlan {
        index,
        house,
        treasure,
    }
}
