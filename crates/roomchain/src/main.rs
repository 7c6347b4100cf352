//! Room chain driver
//!
//! Grows a linear chain of rooms on a timer and reports each step.

mod console;
mod driver;

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rc_core::{ChainConfig, GameRng};

use crate::driver::Driver;

/// Generate a chain of connected rooms
#[derive(Parser, Debug)]
#[command(name = "roomchain")]
#[command(author, version, about = "Grow a chain of rooms, one door at a time", long_about = None)]
struct Args {
    /// Number of rooms to add after the first one
    #[arg(short = 'n', long = "rooms")]
    rooms: Option<u32>,

    /// RNG seed (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Milliseconds between advances
    #[arg(short = 'i', long = "interval-ms")]
    interval_ms: Option<u64>,

    /// JSON config file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Advance immediately instead of waiting between rooms
    #[arg(long = "no-wait")]
    no_wait: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!(seed = rng.seed(), "seeded");

    let mut driver = Driver::new(config, rng, !args.no_wait)?;
    info!(interval = ?driver.interval(), "driver ready");
    let summary = driver.run()?;

    println!("rooms generated: {}", summary.rooms_generated);
    println!("final position:  {}", summary.final_position);
    println!("door rejections: {}", summary.total_rejections);
    println!("rooms disposed:  {}", driver.presenter().disposed());
    println!("peak pending:    {}", summary.peak_pending_removals);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(args: &Args) -> Result<ChainConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ChainConfig::from_json(&fs::read_to_string(path)?)?,
        None => ChainConfig::default(),
    };
    if let Some(rooms) = args.rooms {
        config.room_count = rooms;
    }
    if let Some(ms) = args.interval_ms {
        config.advance_interval_secs = ms as f32 / 1000.0;
    }
    config.validate()?;
    Ok(config)
}
