#![deny(warnings)]

//! Headless CLI: load a scenario (or a generated payload), validate it and
//! print its projection.

mod report;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Utc};
use plan_core::{
    timeline::month_start, validate_scenario, CreateScenarioPayload, EngineConfig, Granularity,
    Scenario, ScenarioId,
};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  planner report   --scenario <file.json> [--config <engine.yaml>] [--anchor YYYY-MM-DD] [--quarterly] [--json]
  planner generate --payload <file.json> --anchor YYYY-MM-DD [--timeline N] [--config <engine.yaml>] [--quarterly] [--json]
  planner version";

#[derive(Debug, Default, PartialEq)]
struct Options {
    scenario: Option<PathBuf>,
    payload: Option<PathBuf>,
    config: Option<PathBuf>,
    anchor: Option<NaiveDate>,
    timeline: Option<u32>,
    quarterly: bool,
    json: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Report(Options),
    Generate(Options),
    Version,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command> {
    let mut it = args.into_iter();
    let sub = it.next().ok_or_else(|| anyhow!("missing command\n{USAGE}"))?;
    if sub == "version" || sub == "--version" {
        return Ok(Command::Version);
    }
    let mut opts = Options::default();
    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().ok_or_else(|| anyhow!("{name} needs a value"));
        match arg.as_str() {
            "--scenario" => opts.scenario = Some(value("--scenario")?.into()),
            "--payload" => opts.payload = Some(value("--payload")?.into()),
            "--config" => opts.config = Some(value("--config")?.into()),
            "--anchor" => {
                let text = value("--anchor")?;
                let date = NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                    .with_context(|| format!("invalid --anchor {text:?}"))?;
                opts.anchor = Some(date);
            }
            "--timeline" => {
                let text = value("--timeline")?;
                let n = text
                    .parse()
                    .with_context(|| format!("invalid --timeline {text:?}"))?;
                opts.timeline = Some(n);
            }
            "--quarterly" => opts.quarterly = true,
            "--json" => opts.json = true,
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    match sub.as_str() {
        "report" if opts.scenario.is_some() => Ok(Command::Report(opts)),
        "report" => bail!("report needs --scenario\n{USAGE}"),
        "generate" if opts.payload.is_some() && opts.anchor.is_some() => {
            Ok(Command::Generate(opts))
        }
        "generate" => bail!("generate needs --payload and --anchor\n{USAGE}"),
        other => bail!("unknown command {other:?}\n{USAGE}"),
    }
}

fn load_config(opts: &Options) -> Result<EngineConfig> {
    match &opts.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn load_scenario(opts: &Options, config: &EngineConfig) -> Result<(Scenario, NaiveDate)> {
    if let Some(path) = &opts.scenario {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        let anchor = opts
            .anchor
            .unwrap_or_else(|| month_start(scenario.created_at.date_naive()));
        return Ok((scenario, anchor));
    }
    let path = opts
        .payload
        .as_ref()
        .ok_or_else(|| anyhow!("no scenario or payload given"))?;
    let anchor = opts
        .anchor
        .ok_or_else(|| anyhow!("generate needs --anchor"))?;
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut payload = CreateScenarioPayload::from_json_str(&text)
        .with_context(|| format!("parsing payload {}", path.display()))?;
    if opts.timeline.is_some() {
        payload.timeline_length = opts.timeline;
    }
    let scenario = payload.into_scenario(
        ScenarioId("draft".to_string()),
        "local",
        anchor,
        config.default_timeline_length,
        Utc::now(),
    )?;
    Ok((scenario, anchor))
}

fn run(opts: &Options) -> Result<()> {
    let config = load_config(opts)?;
    let (scenario, anchor) = load_scenario(opts, &config)?;
    validate_scenario(&scenario).context("scenario failed validation")?;
    info!(
        scenario = %scenario.id.0,
        items = scenario.financial_items.len(),
        timeline = scenario.timeline_length,
        %anchor,
        "projecting scenario"
    );

    let granularity = if opts.quarterly {
        Granularity::Quarterly
    } else {
        Granularity::Monthly
    };
    let report = report::build_report(&scenario, &config, anchor, granularity);
    if let Some(msg) = report.viability.message() {
        warn!(%msg, "scenario is not viable in its first month");
    }
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!(
            "{}",
            report::TextReport {
                report: &report,
                config: &config,
            }
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match parse_args(std::env::args().skip(1))? {
        Command::Version => {
            println!("planner {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Report(opts) | Command::Generate(opts) => run(&opts),
    }
}
