use orbitsim::{load_scenario, run, Recorder, Scenario, ScenarioConfig};
use orbitsim::{bench_gravity, bench_verlet};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;

use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(version, about = "2D n-body simulation of the solar system")]
struct Args {
    /// Scenario YAML; without it the built-in catalog and defaults are used
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Directory for relative output paths
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Time the force engine and integrator instead of running a simulation
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_config(args: &Args) -> Result<ScenarioConfig> {
    match &args.file {
        Some(path) => load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display())),
        None => Ok(ScenarioConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.bench {
        bench_gravity(&[40, 200, 800, 3200]);
        bench_verlet(&[40, 200, 800], 10);
        return Ok(());
    }

    let scenario_cfg = load_scenario_config(&args)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    if let Some(dir) = &args.out_dir {
        scenario.output = scenario.output.in_dir(dir);
    }
    let scale = scenario.scale;

    // every stream must open before the first step
    let mut recorder = Recorder::create(&scenario.output)?;

    let start = Local::now();
    let clock = Instant::now();
    info!("simulation started at {}", start.format("%Y-%m-%d %H:%M:%S"));

    let summary = run(scenario, &mut recorder)?;
    recorder.finish()?;

    info!("simulation finished at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("{} steps in {:.3} s", summary.steps, clock.elapsed().as_secs_f64());

    for (name, period) in &summary.periods {
        if *period == 0.0 {
            info!("{name}: period not detected");
        } else {
            info!("{name}: {:.2} years", scale.sim_to_years(*period));
        }
    }

    Ok(())
}
