//! Card usage rows as exported by SmarTrip, and their typed views.

use crate::error::{PassError, Result};
use crate::money::Money;
use serde::Deserialize;
use std::str::FromStr;

/// Columns a card usage export must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Time",
    "Description",
    "Operator",
    "Entry Location/ Bus Route",
    "Exit Location",
    "Change (+/-)",
];

/// Raw card usage row.
///
/// Everything stays textual; other export columns (sequence, balance,
/// product) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRecord {
    /// `MM/DD/YY HH:MM AM/PM`
    #[serde(rename = "Time")]
    pub time: String,

    /// Entry, Exit, or something else (e.g. "Add Value")
    #[serde(rename = "Description")]
    pub description: String,

    /// Metrorail, Metrobus, or another operator
    #[serde(rename = "Operator")]
    pub operator: String,

    /// Rail entry station or bus route
    #[serde(rename = "Entry Location/ Bus Route", default)]
    pub entry_location: String,

    /// Rail exit station; empty on entries and bus rows
    #[serde(rename = "Exit Location", default)]
    pub exit_location: String,

    /// `(1.25)` for a charge, `$1.25` for a credit, `$0.00` otherwise
    #[serde(rename = "Change (+/-)", default)]
    pub change: String,
}

impl TransactionRecord {
    /// Typed tap kind, or `None` for non-tap rows.
    pub fn tap(&self) -> Option<Tap> {
        Tap::from_column(&self.description)
    }

    /// Typed operator, or `None` for operators other than rail and bus.
    pub fn operator(&self) -> Option<Operator> {
        Operator::from_column(&self.operator)
    }

    /// Normalized signed adjustment of this row.
    pub fn adjustment(&self) -> Result<Money> {
        parse_adjustment(&self.change)
    }
}

/// Card tap direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tap {
    Entry,
    Exit,
}

impl Tap {
    pub fn from_column(value: &str) -> Option<Self> {
        match value.trim() {
            "Entry" => Some(Tap::Entry),
            "Exit" => Some(Tap::Exit),
            _ => None,
        }
    }
}

/// Transit mode a ride was taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Metrorail: priced per station pair.
    Rail,

    /// Metrobus: flat fare.
    Bus,
}

impl Operator {
    pub fn from_column(value: &str) -> Option<Self> {
        match value.trim() {
            "Metrorail" => Some(Operator::Rail),
            "Metrobus" => Some(Operator::Bus),
            _ => None,
        }
    }
}

/// Parses the `Change (+/-)` column.
///
/// - `(2.25)` / `($2.25)`: an extra charge, returned as a positive amount
/// - `$1.00` (other than `$0.00`): a credit, returned negative
/// - anything else: zero
pub fn parse_adjustment(text: &str) -> Result<Money> {
    let text = text.trim();
    if text.starts_with('(') {
        let digits: String = text
            .chars()
            .filter(|c| !matches!(c, '(' | ')' | '$' | ','))
            .collect();
        parse_amount(text, &digits)
    } else if text.starts_with('$') && text != "$0.00" {
        let digits: String = text.chars().filter(|c| !matches!(c, '$' | ',')).collect();
        parse_amount(text, &digits).map(|amount| -amount)
    } else {
        Ok(Money::ZERO)
    }
}

fn parse_amount(original: &str, digits: &str) -> Result<Money> {
    Money::from_str(digits).map_err(|_| PassError::InvalidAmount {
        value: original.to_string(),
    })
}
