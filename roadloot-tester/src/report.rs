//! Structured per-run results and report rendering.

use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one scenario run against one seed.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub seed: u64,
    pub steps: u32,
    pub passed: bool,
    pub failures: Vec<String>,
    pub stats: BTreeMap<String, serde_json::Value>,
}

impl ScenarioReport {
    #[must_use]
    pub fn new(scenario: &str, seed: u64, steps: u32) -> Self {
        Self {
            scenario: scenario.to_string(),
            seed,
            steps,
            passed: true,
            failures: Vec::new(),
            stats: BTreeMap::new(),
        }
    }

    /// Record an invariant violation; the run is marked failed.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.passed = false;
        self.failures.push(message.into());
    }

    /// Attach a named statistic to the report.
    pub fn stat(&mut self, key: &str, value: impl Serialize) {
        let encoded = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        self.stats.insert(key.to_string(), encoded);
    }
}

/// Print a colored console summary. Returns true when every run passed.
pub fn render_console(reports: &[ScenarioReport]) -> bool {
    let mut all_passed = true;
    for report in reports {
        let verdict = if report.passed {
            "PASS".green().bold()
        } else {
            all_passed = false;
            "FAIL".red().bold()
        };
        println!(
            "{verdict} {} (seed {}, {} steps)",
            report.scenario.cyan(),
            report.seed,
            report.steps
        );
        for (key, value) in &report.stats {
            println!("    {}: {value}", key.dimmed());
        }
        for failure in &report.failures {
            println!("    {} {failure}", "!".red());
        }
    }
    let total = reports.len();
    let failed = reports.iter().filter(|r| !r.passed).count();
    if failed == 0 {
        println!("{}", format!("{total}/{total} runs passed").green());
    } else {
        println!("{}", format!("{failed}/{total} runs failed").red());
    }
    all_passed
}

/// Render all reports as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(reports: &[ScenarioReport]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Render a compact markdown table.
#[must_use]
pub fn render_markdown(reports: &[ScenarioReport]) -> String {
    let mut out = String::from("| scenario | seed | steps | result | notes |\n");
    out.push_str("|---|---|---|---|---|\n");
    for report in reports {
        let result = if report.passed { "pass" } else { "fail" };
        let notes = if report.failures.is_empty() {
            String::new()
        } else {
            report.failures.join("; ")
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            report.scenario, report.seed, report.steps, result, notes
        ));
    }
    out
}
