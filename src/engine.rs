//! Break-even pipeline.
//!
//! Reads a card usage export, checks its columns, rebuilds rides and hands
//! them to the calculator. The station directory and fare table are built by
//! the caller beforehand and only read here.

use crate::config::Settings;
use crate::error::{PassError, Result};
use crate::fare::FareTable;
use crate::money::Money;
use crate::reconstruct::RideReconstructor;
use crate::ride::Ride;
use crate::station::{StationDirectory, StationResolver};
use crate::transaction::{TransactionRecord, REQUIRED_COLUMNS};
use crate::verdict::{BreakEvenCalculator, Verdict};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::io::Read;

/// The break-even engine.
///
/// Owns the lookup tables for the lifetime of the run; nothing mutates them
/// after construction.
pub struct PassEngine {
    resolver: StationResolver,
    fares: FareTable,
    settings: Settings,
}

impl PassEngine {
    /// Creates an engine with default settings.
    pub fn new(directory: StationDirectory, fares: FareTable) -> Self {
        Self::with_settings(directory, fares, Settings::default())
    }

    pub fn with_settings(directory: StationDirectory, fares: FareTable, settings: Settings) -> Self {
        info!(
            "Loaded {} stations and {} station-pair fares",
            directory.len(),
            fares.len()
        );
        PassEngine {
            resolver: StationResolver::with_threshold(directory, settings.match_threshold),
            fares,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Reads every row of a card usage export.
    ///
    /// All required columns must be present in the header; a missing one is
    /// reported before any row is read.
    pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(PassError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for result in csv_reader.deserialize::<TransactionRecord>() {
            records.push(result?);
        }
        debug!("Read {} card usage rows", records.len());
        Ok(records)
    }

    /// Rebuilds priced rides from rows in export order.
    pub fn reconstruct(&self, rows: &[TransactionRecord]) -> Result<Vec<Ride>> {
        RideReconstructor::new(&self.resolver, &self.fares, &self.settings).reconstruct(rows)
    }

    /// Reads an export and rebuilds its rides.
    pub fn rides<R: Read>(&self, reader: R) -> Result<Vec<Ride>> {
        let rows = Self::read_transactions(reader)?;
        let rides = self.reconstruct(&rows)?;
        info!("Reconstructed {} rides from {} rows", rides.len(), rows.len());
        Ok(rides)
    }

    /// Runs the whole pipeline.
    ///
    /// With `limit` unset this checks the pass actually held; with a limit it
    /// simulates a pass that covers each ride up to that amount.
    pub fn check_pass<R: Read>(
        &self,
        reader: R,
        pass_cost: Money,
        limit: Option<Money>,
    ) -> Result<Verdict> {
        let rides = self.rides(reader)?;
        Ok(BreakEvenCalculator::new(pass_cost, limit).evaluate(&rides))
    }
}
