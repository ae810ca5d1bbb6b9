//! Turns a card usage log into priced rides.
//!
//! The export is newest-first and records a rail trip as two rows: an entry tap
//! and an exit tap. The exit row carries both stations and any fare
//! correction; the entry row is only needed for its time, which decides the
//! peak band. Bus boardings are a single self-contained row.

use crate::config::{PairingFallback, Settings};
use crate::error::Result;
use crate::fare::FareTable;
use crate::ride::{Ride, RidePricer};
use crate::station::StationResolver;
use crate::transaction::{Operator, Tap, TransactionRecord};
use log::debug;

/// A row that survived filtering, with its position in the source file.
#[derive(Debug, Clone, Copy)]
struct Tapped<'r> {
    /// 1-indexed line in the source file, accounting for the header
    line: usize,
    tap: Tap,
    operator: Operator,
    record: &'r TransactionRecord,
}

/// Pairs taps into rides.
///
/// Holds only borrowed, immutable lookup tables, so one reconstructor can be
/// reused across logs.
#[derive(Debug, Clone, Copy)]
pub struct RideReconstructor<'a> {
    pricer: RidePricer<'a>,
    fallback: PairingFallback,
}

impl<'a> RideReconstructor<'a> {
    pub fn new(resolver: &'a StationResolver, fares: &'a FareTable, settings: &Settings) -> Self {
        RideReconstructor {
            pricer: RidePricer::new(resolver, fares, settings.bus_fare),
            fallback: settings.fallback,
        }
    }

    /// Rebuilds rides from rows in export order (newest first).
    ///
    /// - Rows other than rail/bus entry/exit taps are skipped.
    /// - Every bus row is a ride.
    /// - Every rail exit is a ride, timed by the row before it unless the
    ///   pairing fallback says to use the exit's own time.
    /// - Rail entries never produce a ride by themselves; one with no exit
    ///   after it is dropped.
    ///
    /// The first bad timestamp, bad amount or missing fare aborts the whole
    /// log.
    pub fn reconstruct(&self, rows: &[TransactionRecord]) -> Result<Vec<Ride>> {
        let taps = chronological_taps(rows);
        let mut rides = Vec::with_capacity(taps.len());

        let previous = std::iter::once(None).chain(taps.iter().map(Some));
        for (prev, current) in previous.zip(taps.iter()) {
            match (current.operator, current.tap) {
                (Operator::Bus, _) => {
                    let row = current.record;
                    let ride = self.pricer.price(
                        Operator::Bus,
                        &row.time,
                        &row.entry_location,
                        "",
                        row.adjustment()?,
                    )?;
                    rides.push(ride);
                }
                (Operator::Rail, Tap::Exit) => {
                    let entry = self.entry_for(prev, current);
                    let row = current.record;
                    let ride = self.pricer.price(
                        Operator::Rail,
                        &entry.record.time,
                        &row.entry_location,
                        &row.exit_location,
                        row.adjustment()?,
                    )?;
                    rides.push(ride);
                }
                (Operator::Rail, Tap::Entry) => {}
            }
        }

        log_orphan_entries(&taps);
        Ok(rides)
    }

    /// Picks the row whose time governs a rail exit.
    fn entry_for<'r>(&self, prev: Option<&Tapped<'r>>, exit: &Tapped<'r>) -> Tapped<'r> {
        let Some(candidate) = prev else {
            debug!("Line {}: exit with no earlier tap, using its own time", exit.line);
            return *exit;
        };

        let previous_is_entry = candidate.tap == Tap::Entry;
        let same_location = candidate.record.entry_location == exit.record.entry_location;

        if self.fallback.should_fall_back(previous_is_entry, same_location) {
            debug!(
                "Line {}: line {} is not a matching entry, using the exit's own time",
                exit.line, candidate.line
            );
            *exit
        } else {
            *candidate
        }
    }
}

/// Reverses into chronological order and keeps rail/bus entry/exit taps.
fn chronological_taps(rows: &[TransactionRecord]) -> Vec<Tapped<'_>> {
    rows.iter()
        .enumerate()
        .rev()
        .filter_map(|(idx, record)| {
            let line = idx + 2;
            match (record.tap(), record.operator()) {
                (Some(tap), Some(operator)) => Some(Tapped {
                    line,
                    tap,
                    operator,
                    record,
                }),
                _ => {
                    debug!(
                        "Line {}: skipping '{}' on '{}'",
                        line, record.description, record.operator
                    );
                    None
                }
            }
        })
        .collect()
}

fn log_orphan_entries(taps: &[Tapped<'_>]) {
    for (idx, tap) in taps.iter().enumerate() {
        if tap.operator != Operator::Rail || tap.tap != Tap::Entry {
            continue;
        }
        let followed_by_exit = taps
            .get(idx + 1)
            .is_some_and(|next| next.operator == Operator::Rail && next.tap == Tap::Exit);
        if !followed_by_exit {
            debug!(
                "Line {}: entry at '{}' has no exit, dropping",
                tap.line, tap.record.entry_location
            );
        }
    }
}
