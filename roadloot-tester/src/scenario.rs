//! Scenario catalog: each scenario drives a full session headlessly and
//! checks the core's invariants at scale.

use log::debug;
use roadloot_game::constants::CAR_MAX_SPEED;
use roadloot_game::{
    CameraFollow, CarMode, Directive, Frame, ParticleKind, Prompt, SimConfig, SimSession,
};

use crate::driver::{DrivePolicy, PolicyDriver};
use crate::report::ScenarioReport;

/// Shared inputs for one scenario run.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioCtx {
    pub seed: u64,
    pub steps: u32,
    pub dt_ms: u64,
}

/// A named, self-checking scenario.
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn(&ScenarioCtx) -> ScenarioReport,
}

static CATALOG: [Scenario; 5] = [
    Scenario {
        name: "smoke",
        description: "Cruise forward and check per-step invariants",
        run: run_smoke,
    },
    Scenario {
        name: "doors",
        description: "Enter and exit houses, verifying pose restoration",
        run: run_doors,
    },
    Scenario {
        name: "determinism",
        description: "Replay the same seed twice and compare everything",
        run: run_determinism,
    },
    Scenario {
        name: "weather",
        description: "Observe the ambient cycle: alternation and window bounds",
        run: run_weather,
    },
    Scenario {
        name: "endurance",
        description: "Long cruise; live object counts must stay bounded",
        run: run_endurance,
    },
];

#[must_use]
pub fn catalog() -> &'static [Scenario] {
    &CATALOG
}

#[must_use]
pub fn get_scenario(name: &str) -> Option<&'static Scenario> {
    CATALOG.iter().find(|scenario| scenario.name == name)
}

fn run_smoke(ctx: &ScenarioCtx) -> ScenarioReport {
    let mut report = ScenarioReport::new("smoke", ctx.seed, ctx.steps);
    let mut session = SimSession::new(ctx.seed, SimConfig::default_config());
    let mut camera = CameraFollow::new(&session.config().geom);
    // Pulsing the throttle also exercises drag and the no-reverse clamp.
    let mut driver = PolicyDriver::new(DrivePolicy::Pulse {
        on_steps: 240,
        off_steps: 60,
    });
    let mut prompt: Option<Prompt> = None;
    let mut last_visited = (0, 0);
    let mut collected_total = 0u32;

    for step in 0..ctx.steps {
        let input = driver.next_input(session.state(), prompt.as_ref());
        let frame = Frame {
            dt_ms: ctx.dt_ms,
            input,
            camera_x: camera.track(session.state().car.x),
        };
        let outcome = session.step(&frame);
        collected_total += outcome.collected;
        prompt = outcome.prompt;

        let state = session.state();
        if !(0.0..=CAR_MAX_SPEED + f32::EPSILON).contains(&state.car.vx) {
            report.fail(format!("step {step}: velocity {} out of range", state.car.vx));
        }
        let occupied = state.world.houses.iter().filter(|h| h.occupied).count();
        if occupied > 1 {
            report.fail(format!("step {step}: {occupied} occupied houses"));
        }
        let visited = state.world.visited_counts();
        if visited.0 < last_visited.0 || visited.1 < last_visited.1 {
            report.fail(format!("step {step}: visited ledger shrank"));
        }
        last_visited = visited;
        let cutoff = state.camera_x - session.config().generation.evict_behind - 1.0;
        if state
            .world
            .houses
            .iter()
            .any(|h| !h.occupied && h.x < cutoff)
        {
            report.fail(format!("step {step}: stale house escaped the sweep"));
        }
        if state.world.treasures_collected != collected_total {
            report.fail(format!("step {step}: treasure counter drifted"));
        }
    }

    let state = session.state();
    report.stat("final_x", state.car.x);
    report.stat("treasures", state.world.treasures_collected);
    report.stat("live_houses", state.world.houses.len());
    report.stat("weather_cycles", state.weather.cycles_completed);
    report
}

fn run_doors(ctx: &ScenarioCtx) -> ScenarioReport {
    let mut report = ScenarioReport::new("doors", ctx.seed, ctx.steps);
    let mut session = SimSession::new(ctx.seed, SimConfig::default_config());
    let mut camera = CameraFollow::new(&session.config().geom);
    let mut driver = PolicyDriver::new(DrivePolicy::DoorHopper { dwell_ms: 1_200 });
    let mut prompt: Option<Prompt> = None;
    let mut previous_mode = CarMode::Driving;
    let mut entry_pose: Option<(f32, f32)> = None;
    let mut cycles = 0u32;

    for step in 0..ctx.steps {
        let input = driver.next_input(session.state(), prompt.as_ref());
        let frame = Frame {
            dt_ms: ctx.dt_ms,
            input,
            camera_x: camera.track(session.state().car.x),
        };
        prompt = session.step(&frame).prompt;

        let state = session.state();
        match (previous_mode, state.car.mode) {
            (CarMode::Driving, CarMode::Entering { .. }) => {
                entry_pose = Some((state.car.x, state.car.y));
            }
            (CarMode::Exiting { .. }, CarMode::Driving) => {
                cycles += 1;
                if let Some((x, y)) = entry_pose.take() {
                    if (state.car.x - x).abs() > 1e-2 || (state.car.y - y).abs() > 1e-2 {
                        report.fail(format!(
                            "step {step}: pose ({}, {}) drifted from ({x}, {y})",
                            state.car.x, state.car.y
                        ));
                    }
                } else {
                    report.fail(format!("step {step}: exit without recorded entry"));
                }
            }
            _ => {}
        }
        previous_mode = state.car.mode;
    }

    if cycles == 0 {
        report.fail("no full door cycle observed");
    }
    debug!("doors: {cycles} cycles over {} steps", ctx.steps);
    report.stat("cycles", cycles);
    report.stat("final_mode", session.state().car.mode.as_str());
    report
}

fn run_determinism(ctx: &ScenarioCtx) -> ScenarioReport {
    let mut report = ScenarioReport::new("determinism", ctx.seed, ctx.steps);

    let run_once = |seed: u64| {
        let mut session = SimSession::new(seed, SimConfig::default_config());
        let mut camera = CameraFollow::new(&session.config().geom);
        let mut driver = PolicyDriver::new(DrivePolicy::DoorHopper { dwell_ms: 900 });
        let mut prompt: Option<Prompt> = None;
        let mut directives = 0usize;
        for _ in 0..ctx.steps {
            let input = driver.next_input(session.state(), prompt.as_ref());
            let frame = Frame {
                dt_ms: ctx.dt_ms,
                input,
                camera_x: camera.track(session.state().car.x),
            };
            let outcome = session.step(&frame);
            directives += outcome.directives.len();
            prompt = outcome.prompt;
        }
        (session.into_state(), directives)
    };

    let (first, first_directives) = run_once(ctx.seed);
    let (second, second_directives) = run_once(ctx.seed);

    if first.logs != second.logs {
        report.fail("log ledgers diverged between identical runs");
    }
    if (first.car.x - second.car.x).abs() > f32::EPSILON {
        report.fail(format!(
            "car position diverged: {} vs {}",
            first.car.x, second.car.x
        ));
    }
    if first.world.treasures_collected != second.world.treasures_collected {
        report.fail("treasure counters diverged");
    }
    if first.world.houses != second.world.houses {
        report.fail("house tables diverged");
    }
    if first_directives != second_directives {
        report.fail("directive streams diverged");
    }

    report.stat("directives", first_directives);
    report.stat("treasures", first.world.treasures_collected);
    report
}

fn run_weather(ctx: &ScenarioCtx) -> ScenarioReport {
    // A full cycle can take up to 110 simulated seconds; stretch short
    // runs so the scenario always observes at least one.
    let min_steps = (150_000 / ctx.dt_ms.max(1)) as u32;
    let steps = ctx.steps.max(min_steps);
    let mut report = ScenarioReport::new("weather", ctx.seed, steps);
    let mut session = SimSession::new(ctx.seed, SimConfig::default_config());
    let weather_cfg = session.config().weather;

    let mut starts: Vec<(u64, ParticleKind)> = Vec::new();
    let mut last_start: Option<u64> = None;
    let mut last_stop: Option<u64> = None;
    for _ in 0..steps {
        let outcome = session.step(&Frame::idle(ctx.dt_ms, 0.0));
        let now = session.state().clock_ms;
        for directive in &outcome.directives {
            match directive {
                Directive::StartEmitter { kind, .. } => {
                    if let Some(stop) = last_stop {
                        let idle = now - stop;
                        if idle < weather_cfg.idle_min_ms || idle > weather_cfg.idle_max_ms + ctx.dt_ms
                        {
                            report.fail(format!("idle window {idle}ms out of bounds"));
                        }
                    }
                    starts.push((now, *kind));
                    last_start = Some(now);
                }
                Directive::StopEmitter { .. } => {
                    if let Some(start) = last_start {
                        let active = now - start;
                        if active < weather_cfg.active_min_ms
                            || active > weather_cfg.active_max_ms + ctx.dt_ms
                        {
                            report.fail(format!("active window {active}ms out of bounds"));
                        }
                    }
                    last_stop = Some(now);
                }
                _ => {}
            }
        }
    }

    for (cycle, (_, kind)) in starts.iter().enumerate() {
        let expected = if cycle % 2 == 0 {
            ParticleKind::Rain
        } else {
            ParticleKind::Snow
        };
        if *kind != expected {
            report.fail(format!("cycle {cycle} ran {kind:?}, expected {expected:?}"));
        }
    }
    if session.state().weather.cycles_completed == 0 {
        report.fail("no weather cycle completed; extend the run");
    }
    report.stat("activations", starts.len());
    report.stat("cycles", session.state().weather.cycles_completed);
    report
}

fn run_endurance(ctx: &ScenarioCtx) -> ScenarioReport {
    let mut report = ScenarioReport::new("endurance", ctx.seed, ctx.steps);
    let mut session = SimSession::new(ctx.seed, SimConfig::default_config());
    let cfg = session.config().generation.clone();
    let geom = session.config().geom;
    let mut camera = CameraFollow::new(&geom);
    let mut driver = PolicyDriver::new(DrivePolicy::Cruise);
    let mut prompt: Option<Prompt> = None;

    // Everything live must fit the window the sweep leaves alive.
    let window = cfg.evict_behind
        + geom.view_w
        + (cfg.lookahead_chunks as f32 + 1.0) * cfg.chunk_width;
    let max_live = (window / cfg.chunk_width).ceil() as usize + 2;
    let mut peak_houses = 0usize;

    for step in 0..ctx.steps {
        let input = driver.next_input(session.state(), prompt.as_ref());
        let frame = Frame {
            dt_ms: ctx.dt_ms,
            input,
            camera_x: camera.track(session.state().car.x),
        };
        prompt = session.step(&frame).prompt;

        let state = session.state();
        peak_houses = peak_houses.max(state.world.houses.len());
        if state.world.houses.len() > max_live {
            report.fail(format!(
                "step {step}: {} live houses exceeds bound {max_live}",
                state.world.houses.len()
            ));
        }
        if state.world.treasures.len() > max_live {
            report.fail(format!("step {step}: treasure table unbounded"));
        }
        if state.schedule.len() > 16 {
            report.fail(format!("step {step}: timer queue leaking"));
        }
    }

    report.stat("peak_houses", peak_houses);
    report.stat("final_x", session.state().car.x);
    report.stat("treasures", session.state().world.treasures_collected);
    report
}
