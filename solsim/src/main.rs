use solsim::{Scenario, ScenarioConfig, History};
use solsim::run_viewer;
use solsim::{bench_force, bench_engine};
use solsim::simulation::params::consts::{AU, DAY};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "solar_system.yaml")]
    file_name: String,

    /// Use the built-in solar system instead of a file
    #[arg(long)]
    preset: bool,

    /// Run and print the energy summary without opening the viewer
    #[arg(long)]
    headless: bool,

    /// Run the benchmarks and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn summarize(scenario: &Scenario, history: &History) {
    let last = history.len() - 1;
    let (e0, e1) = (history.energy(0), history.energy(last));
    info!("t = {:.1} days over {} steps", history.time(last) / DAY, last);
    info!("initial: kin = {:e} J, pot = {:e} J, total = {:e} J", e0.kinetic, e0.potential, e0.total());
    info!("final:   kin = {:e} J, pot = {:e} J, total = {:e} J", e1.kinetic, e1.potential, e1.total());
    info!("max relative energy drift = {:.3e}", history.max_relative_energy_drift());

    for (name, x) in scenario.names.iter().zip(history.positions(last)) {
        info!("{:>10}: r = {:.4} AU", name, x.norm() / AU);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_force();
        bench_engine();
        return Ok(());
    }

    let scenario = if args.preset {
        Scenario::solar_system()?
    } else {
        Scenario::build_scenario(load_scenario_from_yaml(&args.file_name)?)?
    };

    let history = scenario.run()?;
    if let Err(e) = history.validate() {
        error!("history failed validation: {}", e);
        return Err(e.into());
    }

    summarize(&scenario, &history);

    if !args.headless {
        run_viewer(scenario, history);
    }

    Ok(())
}
