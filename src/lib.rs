//! # Pass Checker
//!
//! Rebuilds rides from a WMATA SmarTrip card usage export and checks whether a
//! prepaid pass broke even against what those rides would have cost at
//! regular fares.
//!
//! ## Pipeline
//!
//! - **Reconstruction**: the newest-first export is reversed, filtered to rail
//!   and bus taps, and rail exits are paired with the tap before them
//! - **Resolution**: free-text station names are fuzzy-matched to station codes
//! - **Pricing**: bus rides cost a flat fare; rail rides are looked up by
//!   station pair and peak band (weekdays before 21:30)
//! - **Verdict**: regular fares are compared against the pass price plus row
//!   adjustments, or against a simulated per-ride limit
//!
//! ## Example
//!
//! ```no_run
//! use pass_checker::{Fare, FareTable, Money, PassEngine, StationDirectory};
//! use std::io::Cursor;
//! use std::str::FromStr;
//!
//! let directory: StationDirectory =
//!     [("Metro Center", "A01"), ("Shady Grove", "A15")].into_iter().collect();
//! let fares: FareTable = [(
//!     "A01",
//!     "A15",
//!     Fare::new(Money::from_str("6.00").unwrap(), Money::from_str("3.85").unwrap()),
//! )]
//! .into_iter()
//! .collect();
//!
//! let csv = "Time,Description,Operator,Entry Location/ Bus Route,Exit Location,Change (+/-)\n\
//!            03/14/25 09:40 AM,Exit,Metrorail,Metro Center,Shady Grove,$0.00\n\
//!            03/14/25 09:00 AM,Entry,Metrorail,Metro Center,,$0.00\n";
//!
//! let engine = PassEngine::new(directory, fares);
//! let verdict = engine
//!     .check_pass(Cursor::new(csv), Money::from_str("64.00").unwrap(), None)
//!     .unwrap();
//! println!("{}", verdict);
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fare;
pub mod money;
pub mod peak;
pub mod reconstruct;
pub mod ride;
pub mod station;
pub mod transaction;
pub mod verdict;
pub mod wmata;

pub use config::{PairingFallback, Settings};
pub use engine::PassEngine;
pub use error::{PassError, Result};
pub use fare::{Fare, FareTable};
pub use money::Money;
pub use reconstruct::RideReconstructor;
pub use ride::{Ride, RidePricer};
pub use station::{StationDirectory, StationResolver};
pub use transaction::{Operator, Tap, TransactionRecord};
pub use verdict::{BreakEvenCalculator, Outcome, PassMode, Verdict};
