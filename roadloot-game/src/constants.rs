//! Centralized tuning constants for the Roadloot simulation core.
//!
//! These values define the deterministic math for the step loop. Keeping
//! them together ensures that gameplay can only be adjusted via code
//! changes reviewed in version control.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_HOUSE_ENTER: &str = "log.house.enter";
pub(crate) const LOG_HOUSE_INSIDE: &str = "log.house.inside";
pub(crate) const LOG_HOUSE_EXIT: &str = "log.house.exit";
pub(crate) const LOG_HOUSE_RESUME: &str = "log.house.resume";
pub(crate) const LOG_TREASURE_COLLECTED: &str = "log.treasure.collected";
pub(crate) const LOG_WEATHER_RAIN_START: &str = "log.weather.rain.start";
pub(crate) const LOG_WEATHER_SNOW_START: &str = "log.weather.snow.start";
pub(crate) const LOG_WEATHER_STOP: &str = "log.weather.stop";

// Car tuning ---------------------------------------------------------------
pub const CAR_ACCEL: f32 = 500.0;
pub const CAR_DRAG: f32 = 400.0;
pub const CAR_MAX_SPEED: f32 = 300.0;
pub const CAR_WIDTH: f32 = 60.0;
pub const CAR_HEIGHT: f32 = 30.0;

// World object footprints --------------------------------------------------
pub const HOUSE_WIDTH: f32 = 70.0;
pub const TREASURE_WIDTH: f32 = 24.0;

// Door transitions ---------------------------------------------------------
pub(crate) const DOOR_TWEEN_MS: u64 = 700;
pub(crate) const DOOR_CAR_SCALE: f32 = 0.15;
pub(crate) const PROMPT_RISE: f32 = 18.0;

// House occupancy tint applied while the car is inside.
pub(crate) const OCCUPIED_TINT: u32 = 0x00FF_E9A8;

/// Wall colors for the fixed house palette.
pub const HOUSE_PALETTE: [u32; 6] = [
    0x00C0_392B,
    0x0029_80B9,
    0x0027_AE60,
    0x008E_44AD,
    0x00D3_5400,
    0x0016_A085,
];

/// Roof colors, index-paired with [`HOUSE_PALETTE`].
pub const ROOF_PALETTE: [u32; 6] = [
    0x007F_1D12,
    0x001A_5276,
    0x001E_8449,
    0x006C_3483,
    0x00A0_4000,
    0x000E_6655,
];
