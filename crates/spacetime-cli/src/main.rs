mod export;
mod runner;
mod scenario;


use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use spacetime::presets::Preset;

use crate::export::write_csv;
use crate::runner::run;
use crate::scenario::ScenarioConfig;

/// Run the gravity simulation headless and report conserved quantities
#[derive(Parser, Debug)]
#[command(name = "spacetime", version)]
struct Args {
    /// Scenario file (YAML)
    #[arg(short, long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Built-in scene: solar-system, binary-star or planetary-ring
    #[arg(short, long)]
    preset: Option<String>,

    /// Number of ticks to run, overrides the scenario
    #[arg(short, long)]
    frames: Option<u32>,

    /// Seed for randomised presets, overrides the scenario
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final bodies as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log a progress line every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u32,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut config = match (&args.scenario, &args.preset) {
        (Some(path), _) => ScenarioConfig::load(path)?,
        (None, Some(name)) => match Preset::from_name(name) {
            Some(preset) => ScenarioConfig::from_preset(preset, 0),
            None => bail!("unknown preset '{}'", name),
        },
        (None, None) => ScenarioConfig::from_preset(Preset::SolarSystem, 0),
    };

    if let Some(frames) = args.frames {
        config.frames = frames;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_scenario(&args)?;
    let mut state = config.build();

    let initial = state.analytics();
    info!(
        bodies = initial.body_count,
        frames = config.frames,
        energy = initial.energy.total,
        angular_momentum = initial.angular_momentum,
        "starting simulation"
    );

    let merges = run(&mut state, config.frames, args.report_every);

    let last = state.analytics();
    let drift = if initial.energy.total != 0.0 {
        (last.energy.total - initial.energy.total) / initial.energy.total.abs()
    } else {
        0.0
    };
    info!(
        time = last.simulation_time,
        bodies = last.body_count,
        merges,
        energy = last.energy.total,
        energy_drift = drift,
        angular_momentum = last.angular_momentum,
        "finished"
    );

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_csv(state.bodies(), BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote bodies");
    }

    Ok(())
}
