use planetsim::{BoundaryConfig, RunLoop, ScenarioConfig, Surface};
use planetsim::run_2d;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BoundaryArg {
    Unbounded,
    Reflective,
}

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "three_body.yaml")]
    file_name: String,

    /// Override the scenario's boundary policy
    #[arg(long, value_enum)]
    boundary: Option<BoundaryArg>,

    /// Initial window width
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Initial window height
    #[arg(long, default_value_t = 560.0)]
    height: f64,
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name);
    let mut scenario_cfg = ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    match args.boundary {
        Some(BoundaryArg::Unbounded) => scenario_cfg.engine.boundary = BoundaryConfig::Unbounded,
        Some(BoundaryArg::Reflective) => {
            if !matches!(scenario_cfg.engine.boundary, BoundaryConfig::Reflective { .. }) {
                scenario_cfg.engine.boundary = BoundaryConfig::Reflective {
                    restitution: None,
                    half_extents: None,
                };
            }
        }
        None => {}
    }

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let scenario_cfg = load_scenario_from_yaml(&args)?;

    let run_loop = RunLoop::from_config(&scenario_cfg, Surface::new(args.width, args.height))
        .context("invalid scenario")?;
    run_2d(run_loop);

    Ok(())
}
