//! Command-line arguments.

use crate::config::{PairingFallback, Settings};
use crate::fare::DEFAULT_BUS_FARE;
use crate::money::Money;
use crate::station::DEFAULT_MATCH_THRESHOLD;
use clap::Parser;
use std::path::PathBuf;

/// Check whether a WMATA pass broke even against pay-per-ride fares
#[derive(Parser, Debug)]
#[command(name = "pass-checker")]
#[command(about = "Check whether a WMATA pass broke even against pay-per-ride fares", long_about = None)]
pub struct CliArgs {
    /// SmarTrip card usage CSV export
    #[arg(value_name = "CSV")]
    pub input_file: PathBuf,

    /// Price paid for the pass
    #[arg(value_name = "COST")]
    pub pass_cost: Money,

    /// Simulate a pass covering each ride up to this fare instead
    #[arg(long, value_name = "AMOUNT")]
    pub limit: Option<Money>,

    /// Station directory cache
    #[arg(long, value_name = "PATH", default_value = "station_codes.json")]
    pub stations: PathBuf,

    /// Station-pair fare cache
    #[arg(long, value_name = "PATH", default_value = "rail_fares.json")]
    pub fares: PathBuf,

    /// Re-fetch both tables from the WMATA API and rewrite the caches
    #[arg(long)]
    pub refresh: bool,

    /// Flat Metrobus fare
    #[arg(long, value_name = "AMOUNT", default_value_t = DEFAULT_BUS_FARE)]
    pub bus_fare: Money,

    /// Similarity score (0-100) a station name match must exceed
    #[arg(long, value_name = "SCORE", default_value_t = DEFAULT_MATCH_THRESHOLD)]
    pub threshold: f64,

    /// Only pair an exit with the previous row if it is an entry at the same station
    #[arg(long)]
    pub strict_pairing: bool,

    /// Print every reconstructed ride before the verdict
    #[arg(long)]
    pub show_rides: bool,
}

impl CliArgs {
    /// Settings for the engine derived from the flags.
    pub fn settings(&self) -> Settings {
        Settings {
            bus_fare: self.bus_fare,
            match_threshold: self.threshold,
            fallback: if self.strict_pairing {
                PairingFallback::Either
            } else {
                PairingFallback::Compound
            },
        }
    }
}

/// Parse command-line arguments, exiting with usage on error.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
