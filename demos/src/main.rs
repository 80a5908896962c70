use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stepgrid_demos::{Frames, Scenario, run};
use stepgrid_paths::{Algorithm, Outcome};
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENARIO: &str = include_str!("../scenarios/maze.toml");

#[derive(Parser, Debug)]
#[command(name = "stepgrid-demo")]
#[command(about = "Step a grid search one frame at a time and print the board")]
struct Args {
    /// Scenario file (TOML). Uses a bundled maze when omitted.
    scenario: Option<PathBuf>,

    /// Override the engine: bfs or astar.
    #[arg(long, short)]
    algorithm: Option<Algorithm>,

    /// Override the pause between steps, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Override the step cap.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Print only the final board.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::from_toml(DEFAULT_SCENARIO)?,
    };
    if let Some(algorithm) = args.algorithm {
        scenario.run.algorithm = algorithm;
    }
    if let Some(delay_ms) = args.delay_ms {
        scenario.run.delay_ms = delay_ms;
    }
    if let Some(max_steps) = args.max_steps {
        scenario.run.max_steps = max_steps;
    }

    let frames = if args.quiet { Frames::Last } else { Frames::All };
    let report = run(&scenario, frames, &mut io::stdout().lock())?;
    println!(
        "{}: {} steps, {} cells expanded, {} cells visited",
        report.outcome.map_or_else(|| "stopped".to_string(), |o| o.to_string()),
        report.steps,
        report.expanded,
        report.visited
    );

    Ok(match report.outcome {
        Some(Outcome::Found) => ExitCode::SUCCESS,
        Some(Outcome::Exhausted) => ExitCode::from(1),
        None => ExitCode::from(2),
    })
}
