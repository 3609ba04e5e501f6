//! Scenario fixture loading for the HOS trip planner.
//!
//! The pure core (C1–C6) never touches the filesystem; this crate exists for
//! the CLI demonstrator and integration tests, loading trip/route scenario
//! catalogs from YAML or TOML manifests.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading or resolving scenario configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("'{0}' is not a recognized IANA timezone")]
    InvalidTimezone(String),
    #[error("'{0}' is not a valid departure datetime (expected e.g. 2026-01-05T08:00:00)")]
    InvalidDateTime(String),
    #[error("scenario directory '{0}' contains no .toml or .yaml scenario files")]
    EmptyDirectory(PathBuf),
}

/// A full trip scenario, as read from a fixture file: the trip parameters
/// plus the route the routing provider would have returned (spec §3).
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub trip: TripConfig,
    pub route: RouteConfig,
}

/// Trip-level inputs (spec §3 "Trip input").
#[derive(Debug, Clone, Deserialize)]
pub struct TripConfig {
    /// Local departure date/time, e.g. `"2026-01-05T08:00:00"`.
    pub departure: String,
    /// IANA timezone name the departure time and every daily log is local to.
    pub timezone: String,
    pub current_cycle_hours: Decimal,
    pub current_label: String,
    pub pickup_label: String,
    pub dropoff_label: String,
}

impl TripConfig {
    /// Resolve `departure`/`timezone` into a timezone-aware instant.
    pub fn departure_time(&self) -> Result<chrono::DateTime<Tz>, ConfigError> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(self.timezone.clone()))?;
        let naive = NaiveDateTime::parse_from_str(&self.departure, "%Y-%m-%dT%H:%M:%S")
            .map_err(|_| ConfigError::InvalidDateTime(self.departure.clone()))?;
        naive
            .and_local_timezone(tz)
            .single()
            .ok_or_else(|| ConfigError::InvalidDateTime(self.departure.clone()))
    }
}

/// Route input (spec §3 "Route input"): provider segments plus the decoded
/// polyline waypoints in `(lon, lat)` order.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    pub segments: Vec<SegmentConfig>,
    pub waypoints: Vec<(f64, f64)>,
}

/// One routing-provider segment.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentConfig {
    pub distance_miles: Decimal,
    pub duration_hours: Decimal,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// One turn-by-turn instruction within a segment (spec §10.6).
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    pub waypoint_start_index: usize,
    pub waypoint_end_index: usize,
    pub instruction: String,
    #[serde(default)]
    pub distance_m: f64,
    #[serde(default)]
    pub duration_s: f64,
}

/// Load a single scenario from a YAML or TOML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    load_one(path.as_ref())
}

/// Load every scenario in a directory (sorted by filename), or a single
/// scenario if `path` names a file.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let path = path.as_ref();
    if path.is_dir() {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_scenario_file(p))
            .collect();
        entries.sort();
        if entries.is_empty() {
            return Err(ConfigError::EmptyDirectory(path.to_path_buf()));
        }
        entries.iter().map(|p| load_one(p)).collect()
    } else {
        Ok(vec![load_one(path)?])
    }
}

fn is_scenario_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("toml") | Some("yaml") | Some("yml")
    )
}

fn load_one(path: &Path) -> Result<ScenarioConfig, ConfigError> {
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}
