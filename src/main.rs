use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flockwise_core::{init_logging, FlockConfig, RunSeed};
use flockwise_lib::{write_sweep_csv, HeadlessRun, SweepPlan};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one flock headless and export per-step statistics
    Run {
        /// TOML config file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, default_value_t = 1000)]
        steps: u64,

        #[arg(short, long, default_value = "stats.csv")]
        out: PathBuf,

        /// Overrides `world.seed`
        #[arg(long)]
        seed: Option<u64>,

        /// Write config and starting layout as JSON
        #[arg(long)]
        save_seed: Option<PathBuf>,

        /// Replay a saved run seed instead of spawning
        #[arg(long, conflicts_with_all = ["config", "seed"])]
        load_seed: Option<PathBuf>,
    },
    /// Sweep neighbor counts and social weights in parallel
    Sweep {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, default_value_t = 50)]
        steps: u64,

        /// Comma-separated neighbor counts
        #[arg(long, value_delimiter = ',', default_values_t = [2, 4, 6, 8])]
        k: Vec<usize>,

        /// Comma-separated weight values; every (a, c, s) triple is tried
        #[arg(long, value_delimiter = ',', default_values_t = [0.5, 1.5, 2.5])]
        weights: Vec<f64>,

        #[arg(short, long, default_value = "sweep.csv")]
        out: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<FlockConfig> {
    match path {
        Some(path) => FlockConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(FlockConfig::default()),
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    match args.command {
        Command::Run {
            config,
            steps,
            out,
            seed,
            save_seed,
            load_seed,
        } => {
            let run = match load_seed {
                Some(path) => {
                    let seed = flockwise_io::load_run_seed(&path)
                        .with_context(|| format!("loading run seed {}", path.display()))?;
                    HeadlessRun::from_seed(&seed)?
                }
                None => {
                    let mut config = load_config(config.as_ref())?;
                    if let Some(seed) = seed {
                        config.world.seed = seed;
                    }
                    HeadlessRun::new(config)?
                }
            };
            if let Some(path) = save_seed {
                flockwise_io::save_run_seed(&path, &RunSeed::capture(run.flock()))?;
            }
            let (_, summary) = run.with_csv(&out)?.run(steps)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Sweep {
            config,
            steps,
            k,
            weights,
            out,
        } => {
            let plan = SweepPlan::new(load_config(config.as_ref())?, steps)
                .with_k_values(k)
                .with_weight_grid(SweepPlan::weight_cube(&weights));
            let results = plan.run()?;
            write_sweep_csv(&out, &results)?;
            println!("{} runs written to {}", results.len(), out.display());
        }
        Command::Config { config } => {
            let config = load_config(config.as_ref())?;
            config.validate()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
