use spheresim::{ScenarioConfig, Simulation, TickOutcome};
use spheresim::run_3d;
use spheresim::{bench_broad_phase, bench_step};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in `scenarios/` unless it is an existing path
    #[arg(short, default_value = "many_spheres.yaml")]
    file_name: String,

    /// Run without a window for this many simulated seconds
    #[arg(long)]
    headless: Option<f64>,

    /// Run the broad-phase benchmarks and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

/// Drive the simulation with a steady 60 Hz frame clock
fn run_headless(mut sim: Simulation, seconds: f64) {
    let frame_ms = 1000.0 / 60.0;
    let frames = (seconds * 60.0).ceil() as u64;
    let mut resets = 0;
    let mut contacts = 0;

    for frame in 0..=frames {
        match sim.tick(frame as f64 * frame_ms) {
            TickOutcome::Reset(stats) => {
                resets += 1;
                contacts += stats.contacts;
            }
            TickOutcome::Stepped(stats) => contacts += stats.contacts,
            TickOutcome::Started | TickOutcome::Skipped(_) => {}
        }
    }

    info!(
        "headless run: {} frames, {} resets, {} contacts, broad phase {}, kinetic energy {:.6}",
        sim.stats.total_frames,
        resets,
        contacts,
        sim.broad_phase_name(),
        sim.system.kinetic_energy()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        env_logger::init();
        bench_broad_phase();
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    match args.headless {
        Some(seconds) => {
            // Bevy installs its own logger, so only init env_logger without a window
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
            let sim = Simulation::new(scenario_cfg)?;
            run_headless(sim, seconds);
        }
        None => {
            let sim = Simulation::new(scenario_cfg)?;
            run_3d(sim);
        }
    }

    Ok(())
}
