//! Run settings shared by the pipeline.

use crate::fare::DEFAULT_BUS_FARE;
use crate::money::Money;
use crate::station::DEFAULT_MATCH_THRESHOLD;

/// When a rail exit stops trusting the row before it as its entry.
///
/// The preceding row only supplies the ride's timestamp (and so its peak
/// band); stations always come from the exit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingFallback {
    /// Fall back only when the previous row is not an entry *and* names a
    /// different entry location. A preceding exit from the same station is
    /// still used as the entry.
    #[default]
    Compound,

    /// Fall back when the previous row is not an entry *or* names a different
    /// entry location.
    Either,
}

impl PairingFallback {
    /// Whether the exit row should stand in for its own entry.
    pub fn should_fall_back(self, previous_is_entry: bool, same_location: bool) -> bool {
        match self {
            PairingFallback::Compound => !previous_is_entry && !same_location,
            PairingFallback::Either => !previous_is_entry || !same_location,
        }
    }
}

/// Immutable settings for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Flat Metrobus fare.
    pub bus_fare: Money,

    /// Similarity score a station match must exceed.
    pub match_threshold: f64,

    /// Entry/exit pairing policy.
    pub fallback: PairingFallback,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bus_fare: DEFAULT_BUS_FARE,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            fallback: PairingFallback::default(),
        }
    }
}
