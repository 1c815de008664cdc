use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use wingman_app::runner::{self, RunOptions};
use wingman_app::script::CommandScript;
use wingman_app::AppError;
use wingman_sim::{ScenarioConfig, SimulationEngine};

#[derive(Parser)]
#[command(name = "wingman", about = "Headless WINGMAN flight simulation")]
struct Cli {
    /// Scenario JSON file (built-in patrol exercise when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Timed command script: JSON array of { "at": seconds, "command": {...} }
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Length of the run in seconds
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    frame_rate: u32,

    /// Override every enemy's difficulty, [0, 1]
    #[arg(long)]
    difficulty: Option<f64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Pace the run to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Print every Nth snapshot as a JSON line on stdout (0 prints none)
    #[arg(long, default_value_t = 60)]
    snapshot_every: u64,
}

fn main() -> ExitCode {
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut scenario = match &cli.scenario {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    if let Some(difficulty) = cli.difficulty {
        scenario.set_difficulty(difficulty);
    }

    let mut script = match &cli.commands {
        Some(path) => CommandScript::load(path)?,
        None => CommandScript::default(),
    };

    let options = RunOptions {
        duration_secs: cli.seconds,
        frame_rate: cli.frame_rate,
        realtime: cli.realtime,
    };

    let mut engine = SimulationEngine::from_scenario(&scenario)?;
    tracing::info!(
        scenario = %scenario.name,
        seed = scenario.seed,
        seconds = options.duration_secs,
        scripted_commands = script.len(),
        "starting run"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let last_frame = options.frame_count().saturating_sub(1);
    let mut frame = 0u64;

    let summary = runner::run(&mut engine, &mut script, &options, |snapshot| {
        let emit = cli.snapshot_every > 0
            && (frame % cli.snapshot_every == 0 || frame == last_frame);
        frame += 1;
        if emit {
            serde_json::to_writer(&mut out, snapshot).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
        Ok(())
    })?;
    out.flush()?;

    tracing::info!(
        frames = summary.frames,
        physics_ticks = summary.physics_ticks,
        sim_secs = summary.sim_secs,
        events = summary.events,
        aircraft_destroyed = summary.aircraft_destroyed,
        wrecks_exploded = summary.wrecks_exploded,
        ground_units_destroyed = summary.ground_units_destroyed,
        "run complete"
    );
    Ok(())
}
