//! Error types for the pass checker.

use thiserror::Error;

/// Result type alias for pass checker operations
pub type Result<T> = std::result::Result<T, PassError>;

/// Errors that abort a run.
///
/// An unresolved station name is deliberately absent: the raw text is carried
/// forward as a pseudo-code instead.
#[derive(Error, Debug)]
pub enum PassError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed station or fare cache, or API payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the card usage export
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// Time field not in `MM/DD/YY HH:MM AM/PM` form
    #[error("Invalid timestamp '{value}', expected MM/DD/YY HH:MM AM/PM")]
    InvalidTimestamp { value: String },

    /// Both station codes are present but the fare table has no entry
    #[error("No fare found for ride from {entry} to {exit}")]
    FareNotFound { entry: String, exit: String },

    /// Monetary text that could not be parsed
    #[error("Invalid amount '{value}'")]
    InvalidAmount { value: String },

    /// HTTP failure talking to the WMATA API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WMATA API answered with a non-success status
    #[error("Failed to fetch data: {status}")]
    ApiStatus { status: u16 },

    /// `WMATA_API_KEY` not set when a refresh was requested
    #[error("WMATA_API_KEY is not set. Export it or add it to .env to refresh the fare data")]
    MissingApiKey,
}
