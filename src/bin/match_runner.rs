//! Headless Match Runner
//!
//! Loads a TOML scenario, runs independent seeded matches in parallel and
//! prints a summary per match.

use std::path::PathBuf;

use auto_arena::core::{MatchId, Millis, Result, SimulationConfig, Team};
use auto_arena::effects::{EffectSet, Weather};
use auto_arena::simulation::{MatchResult, MatchSetup, Simulation, Winner};
use auto_arena::unit::BattleUnit;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Headless Match Runner - resolve auto-battler matches without a client
#[derive(Parser, Debug)]
#[command(name = "match_runner")]
#[command(about = "Run seeded auto-battler matches from a TOML scenario")]
struct Args {
    /// Scenario file (see demos/duel.toml)
    scenario: PathBuf,

    /// Number of independent matches to run
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// Base seed; match `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks per match before it is stopped
    #[arg(long, default_value_t = 6000)]
    max_ticks: u64,

    /// Milliseconds per tick
    #[arg(long, default_value_t = 50.0)]
    tick_ms: Millis,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// Scenario file layout
#[derive(Debug, Clone, Deserialize)]
struct Scenario {
    /// Derive weather from both sides' synergies instead of `setup.weather`
    #[serde(default)]
    auto_weather: bool,
    #[serde(default)]
    config: SimulationConfig,
    setup: MatchSetup,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct MatchSummary {
    match_id: MatchId,
    seed: u64,
    weather: Weather,
    winner: Option<Winner>,
    blue_result: MatchResult,
    ticks: u64,
    elapsed_ms: Millis,
    timed_out: bool,
    blue_remaining: usize,
    red_remaining: usize,
    /// Damage the side's units credited to themselves. `BattleUnit` never
    /// credits any, so this stays 0 until a unit with real attacks plugs in.
    blue_damage: f32,
    red_damage: f32,
    lightning_strikes: usize,
    blue_effects: EffectSet,
    red_effects: EffectSet,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("auto_arena=info,match_runner=info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!("match_runner failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let content = std::fs::read_to_string(&args.scenario)?;
    let scenario: Scenario = toml::from_str(&content)?;
    scenario.config.validate()?;
    scenario.setup.validate(&scenario.config)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(
        "Running {} match(es) from {} with seed {}",
        args.matches,
        args.scenario.display(),
        seed
    );

    let summaries = (0..args.matches)
        .into_par_iter()
        .map(|i| run_match(&scenario, seed.wrapping_add(i as u64), args))
        .collect::<Result<Vec<_>>>()?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summaries)?),
        "text" => print_text(&summaries),
        _ => {
            tracing::warn!("Unknown format '{}', defaulting to json", args.format);
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }
    Ok(())
}

fn run_match(scenario: &Scenario, seed: u64, args: &Args) -> Result<MatchSummary> {
    let mut setup = scenario.setup.clone();
    setup.id = MatchId::new();
    if scenario.auto_weather {
        setup.weather = setup.derived_weather();
    }

    let mut sim: Simulation<BattleUnit, ChaCha8Rng> =
        Simulation::new(scenario.config.clone(), setup, ChaCha8Rng::seed_from_u64(seed))?;

    let mut ticks = 0;
    let mut lightning_strikes = 0;
    while !sim.is_finished() && ticks < args.max_ticks {
        let events = sim.advance(args.tick_ms);
        lightning_strikes += events.board_events().count();
        ticks += 1;
    }

    let summary = MatchSummary {
        match_id: sim.id(),
        seed,
        weather: sim.weather(),
        winner: sim.winner(),
        blue_result: sim.result_for(Team::Blue),
        ticks,
        elapsed_ms: sim.elapsed(),
        timed_out: !sim.is_finished(),
        blue_remaining: sim.roster(Team::Blue).len(),
        red_remaining: sim.roster(Team::Red).len(),
        blue_damage: sim.telemetry(Team::Blue).total_damage(),
        red_damage: sim.telemetry(Team::Red).total_damage(),
        lightning_strikes,
        blue_effects: sim.effects(Team::Blue).clone(),
        red_effects: sim.effects(Team::Red).clone(),
    };

    if summary.timed_out {
        sim.stop();
    }
    Ok(summary)
}

fn print_text(summaries: &[MatchSummary]) {
    for summary in summaries {
        println!("Match {} (seed {})", summary.match_id, summary.seed);
        println!("=============");
        println!("Weather: {:?}", summary.weather);
        match summary.winner {
            Some(winner) => println!("Winner: {:?}", winner),
            None => println!("Winner: none (stopped after {} ticks)", summary.ticks),
        }
        println!("Blue result: {:?}", summary.blue_result);
        println!(
            "Remaining: {} blue / {} red",
            summary.blue_remaining, summary.red_remaining
        );
        println!("Lightning strikes: {}", summary.lightning_strikes);
        println!("Elapsed: {:.1}s", summary.elapsed_ms / 1000.0);
        println!();
    }
}
