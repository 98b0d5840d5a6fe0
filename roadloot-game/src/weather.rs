//! Ambient weather cycle: one effect at a time, alternating kind.
//!
//! The cycle is timer-driven and independent of everything else in the
//! step loop. An activation runs for a randomized window, then the
//! effect winds down (in-flight particles get a fixed drain grace before
//! the emitter resource is released) and the next activation of the
//! opposite kind is scheduled after a randomized idle window.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{LOG_WEATHER_RAIN_START, LOG_WEATHER_SNOW_START, LOG_WEATHER_STOP};
use crate::fx::{Directive, EmitterId, ParticleKind};
use crate::rng::RngBundle;
use crate::schedule::TimerPayload;
use crate::state::SimState;

/// The two ambient effects, strictly alternating across activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    #[default]
    Rain,
    Snow,
}

impl WeatherKind {
    /// The kind the next activation will use.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Rain => Self::Snow,
            Self::Snow => Self::Rain,
        }
    }

    #[must_use]
    pub const fn particle(self) -> ParticleKind {
        match self {
            Self::Rain => ParticleKind::Rain,
            Self::Snow => ParticleKind::Snow,
        }
    }

    const fn start_log_key(self) -> &'static str {
        match self {
            Self::Rain => LOG_WEATHER_RAIN_START,
            Self::Snow => LOG_WEATHER_SNOW_START,
        }
    }
}

/// Window bounds for the weather lifecycle, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub active_min_ms: u64,
    pub active_max_ms: u64,
    pub idle_min_ms: u64,
    pub idle_max_ms: u64,
    /// How long stopped emitters keep draining before release.
    pub drain_grace_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Validation failures for [`WeatherConfig`].
#[derive(Debug, Error)]
pub enum WeatherConfigError {
    #[error("{name} window is inverted: {min}..{max}")]
    InvertedWindow {
        name: &'static str,
        min: u64,
        max: u64,
    },
    #[error("{name} window must be non-zero")]
    ZeroWindow { name: &'static str },
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WeatherConfig {
    /// Built-in windows matching the shipped game.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            active_min_ms: 20_000,
            active_max_ms: 30_000,
            idle_min_ms: 10_000,
            idle_max_ms: 40_000,
            drain_grace_ms: 2_000,
        }
    }

    /// Load weather tuning from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self, WeatherConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the windows for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), WeatherConfigError> {
        for (name, min, max) in [
            ("active", self.active_min_ms, self.active_max_ms),
            ("idle", self.idle_min_ms, self.idle_max_ms),
        ] {
            if min > max {
                return Err(WeatherConfigError::InvertedWindow { name, min, max });
            }
            if max == 0 {
                return Err(WeatherConfigError::ZeroWindow { name });
            }
        }
        Ok(())
    }
}

/// Whether an ambient effect is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherPhase {
    #[default]
    Idle,
    Active {
        kind: WeatherKind,
        emitter: EmitterId,
    },
}

/// Weather bookkeeping for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeatherState {
    pub phase: WeatherPhase,
    /// Kind the next activation will use; alternates every cycle.
    pub next_kind: WeatherKind,
    /// Completed activate/deactivate cycles.
    pub cycles_completed: u32,
    emitter_seq: u32,
}

impl WeatherState {
    fn next_emitter(&mut self) -> EmitterId {
        let id = EmitterId(self.emitter_seq);
        self.emitter_seq += 1;
        id
    }
}

/// Queue the session's first activation one idle window out, so a run
/// never starts mid-storm and alternation holds from the first cycle.
pub fn schedule_first_activation(state: &mut SimState, cfg: &WeatherConfig, rngs: &RngBundle) {
    let delay = draw_window(&mut rngs.weather(), cfg.idle_min_ms, cfg.idle_max_ms);
    state
        .schedule
        .schedule(state.clock_ms + delay, TimerPayload::WeatherStart);
}

/// Activate the next effect. A start while another effect is active is
/// ignored; the cycle is strictly serialized through the schedule.
pub fn start_weather(state: &mut SimState, cfg: &WeatherConfig, rngs: &RngBundle) {
    if matches!(state.weather.phase, WeatherPhase::Active { .. }) {
        return;
    }
    let kind = state.weather.next_kind;
    let emitter = state.weather.next_emitter();
    state.weather.phase = WeatherPhase::Active { kind, emitter };
    state.weather.next_kind = kind.other();
    state.push_fx(Directive::StartEmitter {
        id: emitter,
        kind: kind.particle(),
    });
    state.push_log(kind.start_log_key());
    let active_for = draw_window(&mut rngs.weather(), cfg.active_min_ms, cfg.active_max_ms);
    state
        .schedule
        .schedule(state.clock_ms + active_for, TimerPayload::WeatherStop);
}

/// Wind down the active effect: stop emission now, release the emitter
/// after the drain grace, and queue the next activation after an idle
/// window. A stop with nothing active is a no-op.
pub fn stop_weather(state: &mut SimState, cfg: &WeatherConfig, rngs: &RngBundle) {
    let WeatherPhase::Active { emitter, .. } = state.weather.phase else {
        return;
    };
    state.weather.phase = WeatherPhase::Idle;
    state.weather.cycles_completed += 1;
    state.push_fx(Directive::StopEmitter { id: emitter });
    state.push_log(LOG_WEATHER_STOP);
    state.schedule.schedule(
        state.clock_ms + cfg.drain_grace_ms,
        TimerPayload::ReleaseEmitter { emitter },
    );
    let idle_for = draw_window(&mut rngs.weather(), cfg.idle_min_ms, cfg.idle_max_ms);
    state
        .schedule
        .schedule(state.clock_ms + idle_for, TimerPayload::WeatherStart);
}

/// Release a drained emitter resource.
pub fn release_emitter(state: &mut SimState, emitter: EmitterId) {
    state.push_fx(Directive::DestroyEmitter { id: emitter });
}

fn draw_window(rng: &mut ChaCha20Rng, min_ms: u64, max_ms: u64) -> u64 {
    if min_ms >= max_ms {
        return min_ms;
    }
    rng.gen_range(min_ms..=max_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::SceneGeom;

    fn fresh() -> (SimState, WeatherConfig, RngBundle) {
        (
            SimState::new(11, &SceneGeom::default()),
            WeatherConfig::default_config(),
            RngBundle::from_user_seed(11),
        )
    }

    #[test]
    fn activations_alternate_kind() {
        let (mut state, cfg, rngs) = fresh();
        start_weather(&mut state, &cfg, &rngs);
        let WeatherPhase::Active { kind: first, .. } = state.weather.phase else {
            panic!("expected active weather");
        };
        assert_eq!(first, WeatherKind::Rain);
        stop_weather(&mut state, &cfg, &rngs);
        start_weather(&mut state, &cfg, &rngs);
        let WeatherPhase::Active { kind: second, .. } = state.weather.phase else {
            panic!("expected active weather");
        };
        assert_eq!(second, WeatherKind::Snow);
        assert_eq!(state.weather.cycles_completed, 1);
    }

    #[test]
    fn double_start_and_stop_are_noops() {
        let (mut state, cfg, rngs) = fresh();
        start_weather(&mut state, &cfg, &rngs);
        let phase = state.weather.phase;
        start_weather(&mut state, &cfg, &rngs);
        assert_eq!(state.weather.phase, phase);

        stop_weather(&mut state, &cfg, &rngs);
        let pending = state.schedule.len();
        stop_weather(&mut state, &cfg, &rngs);
        assert_eq!(state.schedule.len(), pending);
    }

    #[test]
    fn stop_schedules_release_and_restart() {
        let (mut state, cfg, rngs) = fresh();
        state.clock_ms = 5_000;
        start_weather(&mut state, &cfg, &rngs);
        state.clock_ms = 30_000;
        stop_weather(&mut state, &cfg, &rngs);
        // Release fires exactly one grace period after the stop.
        let release_at = state.clock_ms + cfg.drain_grace_ms;
        assert!(state.schedule.next_deadline().unwrap_or(u64::MAX) <= release_at);
    }

    #[test]
    fn windows_respect_config_bounds() {
        let cfg = WeatherConfig::default_config();
        let rngs = RngBundle::from_user_seed(3);
        for _ in 0..64 {
            let v = draw_window(&mut rngs.weather(), cfg.active_min_ms, cfg.active_max_ms);
            assert!((cfg.active_min_ms..=cfg.active_max_ms).contains(&v));
        }
    }

    #[test]
    fn inverted_window_rejected() {
        let mut cfg = WeatherConfig::default_config();
        cfg.idle_min_ms = 50_000;
        assert!(matches!(
            cfg.validate(),
            Err(WeatherConfigError::InvertedWindow { name: "idle", .. })
        ));
    }
}
