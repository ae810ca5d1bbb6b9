//! Reconstructed rides and their pricing.
//!
//! A [`Ride`] is built once by the reconstructor and read-only afterwards; its
//! regular cost is fixed at construction.

use crate::error::Result;
use crate::fare::FareTable;
use crate::money::Money;
use crate::peak;
use crate::station::StationResolver;
use crate::transaction::Operator;
use log::warn;
use std::fmt;

/// One priced ride.
///
/// # Invariants
///
/// - Bus rides cost the flat bus fare.
/// - Rail rides cost the fare-table amount for `(entry_code, exit_code)` at the
///   ride's time band, and are free only when a code is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    is_peak: bool,
    operator: Operator,
    entry_code: String,
    exit_code: String,
    adjustment: Money,
    regular_cost: Money,
}

impl Ride {
    pub fn is_peak(&self) -> bool {
        self.is_peak
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Resolved entry station code, or bus route text.
    pub fn entry_code(&self) -> &str {
        &self.entry_code
    }

    /// Resolved exit station code; empty for bus rides.
    pub fn exit_code(&self) -> &str {
        &self.exit_code
    }

    /// Signed correction carried on the source row.
    pub fn adjustment(&self) -> Money {
        self.adjustment
    }

    /// Un-discounted fare of the ride.
    pub fn regular_cost(&self) -> Money {
        self.regular_cost
    }
}

impl fmt::Display for Ride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.operator {
            Operator::Rail => "Metrorail",
            Operator::Bus => "Metrobus",
        };
        write!(
            f,
            "{} {} -> {} ({}) regular ${} adjustment ${}",
            mode,
            self.entry_code,
            if self.exit_code.is_empty() { "-" } else { self.exit_code.as_str() },
            if self.is_peak { "peak" } else { "off-peak" },
            self.regular_cost,
            self.adjustment,
        )
    }
}

/// Prices rides against the immutable lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct RidePricer<'a> {
    resolver: &'a StationResolver,
    fares: &'a FareTable,
    bus_fare: Money,
}

impl<'a> RidePricer<'a> {
    pub fn new(resolver: &'a StationResolver, fares: &'a FareTable, bus_fare: Money) -> Self {
        RidePricer {
            resolver,
            fares,
            bus_fare,
        }
    }

    /// Builds a ride from raw row text.
    ///
    /// `time` is the ride's governing timestamp (the paired entry for rail).
    /// Station text goes through fuzzy resolution before pricing.
    pub fn price(
        &self,
        operator: Operator,
        time: &str,
        entry_location: &str,
        exit_location: &str,
        adjustment: Money,
    ) -> Result<Ride> {
        let is_peak = peak::is_peak_str(time)?;
        let entry_code = self.resolver.resolve(entry_location);
        let exit_code = self.resolver.resolve(exit_location);
        let regular_cost =
            self.fares
                .regular_cost(operator, &entry_code, &exit_code, is_peak, self.bus_fare)?;

        if operator == Operator::Rail && (entry_code.is_empty() || exit_code.is_empty()) {
            warn!(
                "Rail ride at {} is missing a station ('{}' -> '{}'), counting it as free",
                time, entry_location, exit_location
            );
        }

        Ok(Ride {
            is_peak,
            operator,
            entry_code,
            exit_code,
            adjustment,
            regular_cost,
        })
    }
}
