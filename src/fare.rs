//! Station-pair fare table and regular-cost rules.

use crate::error::{PassError, Result};
use crate::money::Money;
use crate::transaction::Operator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat Metrobus fare.
pub const DEFAULT_BUS_FARE: Money = Money::cents(225);

/// Regular fares for one origin/destination pair.
///
/// Field names follow the WMATA `RailFare` object. Discounted classes in the
/// payload are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fare {
    #[serde(rename = "PeakTime")]
    pub peak: Money,

    #[serde(rename = "OffPeakTime")]
    pub off_peak: Money,
}

impl Fare {
    pub fn new(peak: Money, off_peak: Money) -> Self {
        Fare { peak, off_peak }
    }

    /// Amount charged at the given time band.
    pub fn amount(&self, is_peak: bool) -> Money {
        if is_peak {
            self.peak
        } else {
            self.off_peak
        }
    }
}

/// (entry code, exit code) → [`Fare`].
///
/// Built once at startup and never mutated during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareTable {
    fares: HashMap<(String, String), Fare>,
}

impl FareTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: impl Into<String>, exit: impl Into<String>, fare: Fare) {
        self.fares.insert((entry.into(), exit.into()), fare);
    }

    pub fn get(&self, entry: &str, exit: &str) -> Option<&Fare> {
        self.fares.get(&(entry.to_string(), exit.to_string()))
    }

    pub fn len(&self) -> usize {
        self.fares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Fare)> {
        self.fares
            .iter()
            .map(|((entry, exit), fare)| (entry.as_str(), exit.as_str(), fare))
    }

    /// Regular (un-discounted) cost of a ride.
    ///
    /// - Bus rides cost `bus_fare` regardless of stations or time.
    /// - Rail rides with an empty entry or exit code cost nothing.
    /// - Rail rides between two known codes must have a table entry; a missing
    ///   pair is [`PassError::FareNotFound`].
    pub fn regular_cost(
        &self,
        operator: Operator,
        entry: &str,
        exit: &str,
        is_peak: bool,
        bus_fare: Money,
    ) -> Result<Money> {
        match operator {
            Operator::Bus => Ok(bus_fare),
            Operator::Rail => {
                if entry.is_empty() || exit.is_empty() {
                    return Ok(Money::ZERO);
                }
                self.get(entry, exit)
                    .map(|fare| fare.amount(is_peak))
                    .ok_or_else(|| PassError::FareNotFound {
                        entry: entry.to_string(),
                        exit: exit.to_string(),
                    })
            }
        }
    }
}

impl<E: Into<String>, X: Into<String>> FromIterator<(E, X, Fare)> for FareTable {
    fn from_iter<I: IntoIterator<Item = (E, X, Fare)>>(iter: I) -> Self {
        let mut table = FareTable::new();
        for (entry, exit, fare) in iter {
            table.insert(entry, exit, fare);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn table() -> FareTable {
        [("A", "B", Fare::new(money("3.00"), money("2.00")))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_peak_and_off_peak_selection() {
        let fares = table();
        let peak = fares
            .regular_cost(Operator::Rail, "A", "B", true, DEFAULT_BUS_FARE)
            .unwrap();
        let off_peak = fares
            .regular_cost(Operator::Rail, "A", "B", false, DEFAULT_BUS_FARE)
            .unwrap();

        assert_eq!(peak.to_string(), "3.00");
        assert_eq!(off_peak.to_string(), "2.00");
    }

    #[test]
    fn test_bus_is_flat_fare() {
        let fares = table();
        for (entry, exit, peak) in [("A", "B", true), ("Route 70", "", false), ("", "", true)] {
            let cost = fares
                .regular_cost(Operator::Bus, entry, exit, peak, DEFAULT_BUS_FARE)
                .unwrap();
            assert_eq!(cost.to_string(), "2.25");
        }
    }

    #[test]
    fn test_rail_with_missing_code_is_free() {
        let fares = table();
        assert!(fares
            .regular_cost(Operator::Rail, "", "B", true, DEFAULT_BUS_FARE)
            .unwrap()
            .is_zero());
        assert!(fares
            .regular_cost(Operator::Rail, "A", "", true, DEFAULT_BUS_FARE)
            .unwrap()
            .is_zero());
    }

    #[test]
    fn test_unknown_pair_is_fare_not_found() {
        let fares = table();
        match fares.regular_cost(Operator::Rail, "B", "A", true, DEFAULT_BUS_FARE) {
            Err(PassError::FareNotFound { entry, exit }) => {
                assert_eq!(entry, "B");
                assert_eq!(exit, "A");
            }
            other => panic!("Expected FareNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_fare_deserializes_from_wmata_shape() {
        let fare: Fare =
            serde_json::from_str(r#"{"PeakTime": 2.9, "OffPeakTime": 2.5, "SeniorDisabled": 1.45}"#)
                .unwrap();
        assert_eq!(fare, Fare::new(money("2.90"), money("2.50")));
    }
}
