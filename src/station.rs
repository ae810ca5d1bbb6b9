//! Station directory and fuzzy name resolution.
//!
//! Card usage exports spell station names loosely ("Metro Center" vs.
//! "Metro Ctr", truncated names, stray punctuation). [`StationResolver`] maps
//! that free text to a canonical station code by picking the most similar
//! known name.

use log::debug;
use std::collections::BTreeMap;

/// Default similarity score a match must exceed to be accepted.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 80.0;

/// Station display name → station code.
///
/// Names are case-sensitive as delivered by WMATA. Iteration is sorted by
/// name, which fixes the tie-breaking order of fuzzy resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationDirectory {
    stations: BTreeMap<String, String>,
}

impl StationDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a station.
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) {
        self.stations.insert(name.into(), code.into());
    }

    /// Code for an exact display name.
    pub fn code(&self, name: &str) -> Option<&str> {
        self.stations.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Iterates `(name, code)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stations.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for StationDirectory {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut directory = StationDirectory::new();
        for (name, code) in iter {
            directory.insert(name, code);
        }
        directory
    }
}

/// Resolves free-text station names to station codes.
///
/// Resolution fails soft: a name that does not clear the threshold is
/// returned unchanged, so a bad match surfaces later as a missing fare
/// rather than a silently dropped ride.
#[derive(Debug, Clone)]
pub struct StationResolver {
    directory: StationDirectory,
    threshold: f64,
}

impl StationResolver {
    /// Creates a resolver with the default threshold of 80.
    pub fn new(directory: StationDirectory) -> Self {
        Self::with_threshold(directory, DEFAULT_MATCH_THRESHOLD)
    }

    pub fn with_threshold(directory: StationDirectory, threshold: f64) -> Self {
        StationResolver {
            directory,
            threshold,
        }
    }

    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolves `raw` to a station code.
    ///
    /// - Empty input returns an empty string (the unresolved sentinel).
    /// - The best-scoring known name wins if its score is strictly above the
    ///   threshold; the first name in directory order wins a tie.
    /// - Otherwise `raw` is returned as-is.
    pub fn resolve(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        if let Some(code) = self.directory.code(raw) {
            return code.to_string();
        }

        match self.best_match(raw) {
            Some((name, code, score)) if score > self.threshold => {
                debug!("Resolved '{}' to '{}' ({}, score {:.1})", raw, name, code, score);
                code.to_string()
            }
            Some((name, _, score)) => {
                debug!(
                    "No station match for '{}' (closest '{}', score {:.1})",
                    raw, name, score
                );
                raw.to_string()
            }
            None => raw.to_string(),
        }
    }

    /// Highest-scoring `(name, code, score)`; first encountered wins ties.
    fn best_match(&self, raw: &str) -> Option<(&str, &str, f64)> {
        let mut best: Option<(&str, &str, f64)> = None;
        for (name, code) in self.directory.iter() {
            let score = similarity(raw, name);
            if best.map_or(true, |(_, _, top)| score > top) {
                best = Some((name, code, score));
            }
        }
        best
    }
}

/// Normalized InDel similarity of two strings in `[0, 100]`.
///
/// `100 * 2 * LCS(a, b) / (len(a) + len(b))`, computed over chars with no case
/// folding. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let lcs = longest_common_subsequence(&a, &b);
    100.0 * (2 * lcs) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
