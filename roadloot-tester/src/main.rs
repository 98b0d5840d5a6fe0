mod driver;
mod report;
mod scenario;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use log::info;

use report::{ScenarioReport, render_console, render_json, render_markdown};
use scenario::{ScenarioCtx, catalog, get_scenario};

#[derive(Debug, Parser)]
#[command(name = "roadloot-tester", version)]
#[command(about = "Headless QA harness for the Roadloot simulation core")]
struct Args {
    /// Scenarios to run (comma-separated)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Steps per scenario run
    #[arg(long, default_value_t = 3_600)]
    steps: u32,

    /// Simulated milliseconds per step
    #[arg(long, default_value_t = 16)]
    dt_ms: u64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        for scenario in catalog() {
            println!("{:<12} {}", scenario.name.cyan(), scenario.description);
        }
        return Ok(());
    }

    let seeds: Vec<u64> = split_csv(&args.seeds)
        .iter()
        .map(|seed| {
            seed.parse::<u64>()
                .with_context(|| format!("invalid seed '{seed}'"))
        })
        .collect::<Result<_>>()?;
    if seeds.is_empty() {
        bail!("no seeds given");
    }

    let names = split_csv(&args.scenarios);
    if names.is_empty() {
        bail!("no scenarios given");
    }

    let mut reports: Vec<ScenarioReport> = Vec::new();
    for name in &names {
        let scenario =
            get_scenario(name).with_context(|| format!("unknown scenario '{name}'"))?;
        for &seed in &seeds {
            info!("running {name} with seed {seed}");
            let ctx = ScenarioCtx {
                seed,
                steps: args.steps,
                dt_ms: args.dt_ms,
            };
            reports.push((scenario.run)(&ctx));
        }
    }

    let all_passed = match args.report.as_str() {
        "json" => {
            println!("{}", render_json(&reports)?);
            reports.iter().all(|r| r.passed)
        }
        "markdown" => {
            println!("{}", render_markdown(&reports));
            reports.iter().all(|r| r.passed)
        }
        _ => render_console(&reports),
    };

    if !all_passed {
        bail!("{} runs failed", reports.iter().filter(|r| !r.passed).count());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_splitting_trims_and_drops_empties() {
        assert_eq!(split_csv("smoke, doors ,,"), ["smoke", "doors"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn every_cataloged_scenario_passes_a_short_run() {
        for scenario in catalog() {
            let ctx = ScenarioCtx {
                seed: 1_337,
                steps: 1_200,
                dt_ms: 16,
            };
            let report = (scenario.run)(&ctx);
            assert!(
                report.passed,
                "{} failed: {:?}",
                scenario.name, report.failures
            );
        }
    }
}
