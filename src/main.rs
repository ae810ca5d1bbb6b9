//! Pass Checker CLI
//!
//! Replays a SmarTrip card usage export against WMATA fares and reports
//! whether a pass paid for itself.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- usage.csv 64.00
//! cargo run -- usage.csv 72.00 --limit 2.25
//! cargo run -- usage.csv 64.00 --refresh
//! ```
//!
//! # Environment Variables
//!
//! - `WMATA_API_KEY`: API key used when the caches are missing or `--refresh` is given
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use log::info;
use pass_checker::cli::{self, CliArgs};
use pass_checker::wmata::{self, WmataClient};
use pass_checker::{BreakEvenCalculator, FareTable, PassEngine, Result, StationDirectory};
use std::fs::File;
use std::io::BufReader;
use std::process;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = cli::parse_args();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let (directory, fares) = load_tables(args)?;
    let engine = PassEngine::with_settings(directory, fares, args.settings());

    let file = File::open(&args.input_file)?;
    let rides = engine.rides(BufReader::new(file))?;

    let verdict = BreakEvenCalculator::new(args.pass_cost, args.limit).evaluate(&rides);

    if args.show_rides {
        for ride in &rides {
            println!("{}", ride);
        }
        println!(
            "Regular fares: ${}  Spent: ${}",
            verdict.total_regular, verdict.total_spent
        );
    }
    println!("{}", verdict);

    Ok(())
}

/// Loads the lookup tables from cache, fetching from WMATA when asked to or
/// when a cache file does not exist yet.
fn load_tables(args: &CliArgs) -> Result<(StationDirectory, FareTable)> {
    if !args.refresh && args.stations.exists() && args.fares.exists() {
        let directory = wmata::load_stations(&args.stations)?;
        let fares = wmata::load_fares(&args.fares)?;
        return Ok((directory, fares));
    }

    let client = WmataClient::from_env()?;
    let directory = client.fetch_stations()?;
    let fares = client.fetch_fares()?;

    wmata::save_stations(&args.stations, &directory)?;
    wmata::save_fares(&args.fares, &fares)?;
    info!(
        "Cached fare data to {} and {}",
        args.stations.display(),
        args.fares.display()
    );

    Ok((directory, fares))
}
