use std::path::PathBuf;

use clap::Parser;
use portsim::{Overrides, RunSettings, init_logging, load_pool, run_projection};

#[derive(Parser, Debug)]
#[command(name = "portsim")]
#[command(about = "Bootstrap Monte Carlo projection of a portfolio's future value")]
struct Args {
    /// Return pool or price history file (YAML or JSON)
    input: PathBuf,

    /// Settings file with simulation parameters and seed (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial portfolio value
    #[arg(short, long)]
    amount: Option<f64>,

    /// Number of simulated paths
    #[arg(short, long)]
    paths: Option<usize>,

    /// Horizon in years of monthly periods
    #[arg(short, long, conflicts_with = "months")]
    years: Option<usize>,

    /// Horizon in months
    #[arg(short, long)]
    months: Option<usize>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Currency symbol used in the text report
    #[arg(long, default_value = "$")]
    currency: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = init_logging(&args.log_level, args.log_file.as_deref())?;

    let settings = match &args.config {
        Some(path) => RunSettings::load(path)?,
        None => RunSettings::default(),
    };
    let overrides = Overrides {
        initial_amount: args.amount,
        path_count: args.paths,
        horizon_months: args.months,
        horizon_years: args.years,
        seed: args.seed,
    };
    let (config, seed) = settings.resolve(overrides)?;

    let pool = load_pool(&args.input)?;
    let report = run_projection(&pool, &config, seed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text(&args.currency));
    }

    Ok(())
}
