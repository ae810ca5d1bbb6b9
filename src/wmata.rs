//! WMATA data sources for the station directory and fare table.
//!
//! Both tables come from the WMATA Rail API and are cached as JSON files next
//! to the card usage export so a run normally needs no network access.
//!
//! Cache files look like:
//!
//! ```json
//! { "last_updated": "2025-03-14T10:11:12", "stations": { "Metro Center": "A01" } }
//! { "last_updated": "2025-03-14T10:11:12", "fares": { "A01-A15": { "PeakTime": 6.0, "OffPeakTime": 3.85 } } }
//! ```

use crate::error::{PassError, Result};
use crate::fare::{Fare, FareTable};
use crate::station::StationDirectory;
use chrono::{Local, NaiveDateTime};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const STATIONS_URL: &str = "https://api.wmata.com/Rail.svc/json/jStations";
pub const FARES_URL: &str = "https://api.wmata.com/Rail.svc/json/jSrcStationToDstStationInfo";

/// Environment variable holding the WMATA API key.
pub const API_KEY_VAR: &str = "WMATA_API_KEY";

#[derive(Debug, Deserialize)]
struct StationsResponse {
    #[serde(rename = "Stations")]
    stations: Vec<StationDto>,
}

#[derive(Debug, Deserialize)]
struct StationDto {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Code")]
    code: String,
}

#[derive(Debug, Deserialize)]
struct FaresResponse {
    #[serde(rename = "StationToStationInfos")]
    infos: Vec<StationToStationDto>,
}

#[derive(Debug, Deserialize)]
struct StationToStationDto {
    #[serde(rename = "SourceStation")]
    source: String,
    #[serde(rename = "DestinationStation")]
    destination: String,
    #[serde(rename = "RailFare")]
    fare: Fare,
}

#[derive(Debug, Serialize, Deserialize)]
struct StationCache {
    #[serde(default)]
    last_updated: Option<NaiveDateTime>,
    stations: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FareCache {
    #[serde(default)]
    last_updated: Option<NaiveDateTime>,
    fares: BTreeMap<String, Fare>,
}

/// Parses a `jStations` response body.
pub fn parse_stations_response(body: &str) -> Result<StationDirectory> {
    let response: StationsResponse = serde_json::from_str(body)?;
    Ok(response
        .stations
        .into_iter()
        .map(|s| (s.name, s.code))
        .collect())
}

/// Parses a `jSrcStationToDstStationInfo` response body.
pub fn parse_fares_response(body: &str) -> Result<FareTable> {
    let response: FaresResponse = serde_json::from_str(body)?;
    Ok(response
        .infos
        .into_iter()
        .map(|info| (info.source, info.destination, info.fare))
        .collect())
}

/// Loads a station cache file.
pub fn load_stations(path: &Path) -> Result<StationDirectory> {
    let content = fs::read_to_string(path)?;
    let cache: StationCache = serde_json::from_str(&content)?;
    Ok(cache.stations.into_iter().collect())
}

/// Writes a station cache file stamped with the current time.
pub fn save_stations(path: &Path, directory: &StationDirectory) -> Result<()> {
    let cache = StationCache {
        last_updated: Some(Local::now().naive_local()),
        stations: directory
            .iter()
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect(),
    };
    fs::write(path, serde_json::to_string_pretty(&cache)?)?;
    Ok(())
}

/// Loads a fare cache file. Keys are `"<source>-<destination>"`.
pub fn load_fares(path: &Path) -> Result<FareTable> {
    let content = fs::read_to_string(path)?;
    let cache: FareCache = serde_json::from_str(&content)?;

    let mut table = FareTable::new();
    for (key, fare) in cache.fares {
        let (source, destination) = key.split_once('-').ok_or_else(|| {
            <serde_json::Error as serde::de::Error>::custom(format!(
                "fare key '{}' is not SOURCE-DESTINATION",
                key
            ))
        })?;
        table.insert(source, destination, fare);
    }
    Ok(table)
}

/// Writes a fare cache file stamped with the current time.
pub fn save_fares(path: &Path, fares: &FareTable) -> Result<()> {
    let cache = FareCache {
        last_updated: Some(Local::now().naive_local()),
        fares: fares
            .iter()
            .map(|(source, destination, fare)| (format!("{}-{}", source, destination), *fare))
            .collect(),
    };
    fs::write(path, serde_json::to_string_pretty(&cache)?)?;
    Ok(())
}

/// Blocking client for the WMATA Rail API.
pub struct WmataClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl WmataClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(WmataClient {
            http,
            api_key: api_key.into(),
        })
    }

    /// Builds a client from `WMATA_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(API_KEY_VAR).map_err(|_| PassError::MissingApiKey)?;
        if key.trim().is_empty() {
            return Err(PassError::MissingApiKey);
        }
        Self::new(key)
    }

    pub fn fetch_stations(&self) -> Result<StationDirectory> {
        let directory = parse_stations_response(&self.get(STATIONS_URL)?)?;
        info!("Fetched {} stations from WMATA", directory.len());
        Ok(directory)
    }

    pub fn fetch_fares(&self) -> Result<FareTable> {
        let fares = parse_fares_response(&self.get(FARES_URL)?)?;
        info!("Fetched {} station-pair fares from WMATA", fares.len());
        Ok(fares)
    }

    fn get(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .header("Cache-Control", "no-cache")
            .header("api_key", &self.api_key)
            .send()?;

        if !response.status().is_success() {
            return Err(PassError::ApiStatus {
                status: response.status().as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::str::FromStr;
    use tempfile::tempdir;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_stations_response() {
        let body = r#"{"Stations": [
            {"Code": "A01", "Name": "Metro Center", "LineCode1": "RD", "Lat": 38.898303},
            {"Code": "A15", "Name": "Shady Grove", "LineCode1": "RD", "Lat": 39.119819}
        ]}"#;

        let directory = parse_stations_response(body).unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.code("Metro Center"), Some("A01"));
        // sorted by name
        let names: Vec<&str> = directory.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Metro Center", "Shady Grove"]);
    }

    #[test]
    fn test_parse_fares_response() {
        let body = r#"{"StationToStationInfos": [
            {"SourceStation": "A01", "DestinationStation": "A15", "CompositeMiles": 15.97,
             "RailFare": {"PeakTime": 6.0, "OffPeakTime": 3.85, "SeniorDisabled": 3.0},
             "RailTime": 32}
        ]}"#;

        let fares = parse_fares_response(body).unwrap();

        assert_eq!(fares.get("A01", "A15"), Some(&Fare::new(money("6.00"), money("3.85"))));
        assert_eq!(fares.get("A15", "A01"), None);
    }

    #[test]
    fn test_malformed_response_is_json_error() {
        assert!(matches!(
            parse_stations_response("{\"Stations\": 3}"),
            Err(PassError::Json(_))
        ));
    }

    #[test]
    fn test_load_cache_files_written_by_older_tooling() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("station_codes.json");
        let fares = dir.path().join("rail_fares.json");
        fs::write(
            &stations,
            r#"{"last_updated": "2025-03-14T10:11:12.345678", "stations": {"Metro Center": "A01"}}"#,
        )
        .unwrap();
        fs::write(
            &fares,
            r#"{"last_updated": "2025-03-14T10:11:12.345678",
                "fares": {"A01-A15": {"PeakTime": 6.0, "OffPeakTime": 3.85, "SeniorDisabled": 3.0}}}"#,
        )
        .unwrap();

        let directory = load_stations(&stations).unwrap();
        let table = load_fares(&fares).unwrap();

        assert_eq!(directory.code("Metro Center"), Some("A01"));
        assert_eq!(table.get("A01", "A15").unwrap().off_peak, money("3.85"));
    }

    #[test]
    fn test_cache_save_then_load() {
        let dir = tempdir().unwrap();
        let stations_path = dir.path().join("stations.json");
        let fares_path = dir.path().join("fares.json");
        let directory: StationDirectory = [("Metro Center", "A01"), ("Shady Grove", "A15")]
            .into_iter()
            .collect();
        let table: FareTable = [("A01", "A15", Fare::new(money("6.00"), money("3.85")))]
            .into_iter()
            .collect();

        save_stations(&stations_path, &directory).unwrap();
        save_fares(&fares_path, &table).unwrap();

        assert_eq!(load_stations(&stations_path).unwrap(), directory);
        assert_eq!(load_fares(&fares_path).unwrap(), table);
    }

    #[test]
    fn test_bad_fare_key_is_rejected() {
        let dir = tempdir().unwrap();
        let fares = dir.path().join("rail_fares.json");
        fs::write(
            &fares,
            r#"{"fares": {"A01A15": {"PeakTime": 6.0, "OffPeakTime": 3.85}}}"#,
        )
        .unwrap();

        assert!(matches!(load_fares(&fares), Err(PassError::Json(_))));
    }

    #[test]
    fn test_missing_cache_file_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_stations(&dir.path().join("absent.json")),
            Err(PassError::Io(_))
        ));
    }
}
