//! Pitch usage and velocity trends
//!
//! Turns a season of Statcast pitch rows for one pitcher into time-bucketed
//! pitch-type usage, per-pitch-type averages and season workload totals.

pub mod analysis;
pub mod data;
pub mod pipeline;
pub mod report;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub use analysis::bucket::BucketStrategy;
pub use analysis::usage::FillPolicy;
pub use report::ChartStyle;

/// MLBAM player identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// Where a batch of pitch rows came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Savant,
    File,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Savant => write!(f, "Baseball Savant"),
            DataSource::File => write!(f, "CSV file"),
        }
    }
}

/// Inclusive date range for one supported season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub year: u16,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeasonWindow {
    /// Check whether a date falls inside the window (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for SeasonWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} to {})", self.year, self.start, self.end)
    }
}

/// One pitch row as delivered by a source, before cleaning.
///
/// Every column is optional: Statcast leaves cells blank for pitches the
/// tracking system missed, and the date is still text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPitchEvent {
    pub game_date: Option<String>,
    pub pitch_type: Option<String>,
    pub release_speed: Option<f64>,
    pub release_spin_rate: Option<f64>,
    pub inning: Option<u8>,
    pub outs_when_up: Option<u8>,
    /// Only used to restore chronological order
    pub game_pk: Option<u32>,
    pub at_bat_number: Option<u32>,
    pub pitch_number: Option<u32>,
}

/// A cleaned pitch: all required fields present and typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchEvent {
    pub game_date: NaiveDate,
    pub pitch_type: String,
    pub release_speed: f64,
    pub release_spin_rate: f64,
    pub inning: Option<u8>,
    pub outs_when_up: Option<u8>,
}

impl From<&PitchEvent> for RawPitchEvent {
    fn from(event: &PitchEvent) -> Self {
        RawPitchEvent {
            game_date: Some(event.game_date.format("%Y-%m-%d").to_string()),
            pitch_type: Some(event.pitch_type.clone()),
            release_speed: Some(event.release_speed),
            release_spin_rate: Some(event.release_spin_rate),
            inning: event.inning,
            outs_when_up: event.outs_when_up,
            game_pk: None,
            at_bat_number: None,
            pitch_number: None,
        }
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum PitchError {
    #[error("No data available for player {player} between {start} and {end}")]
    NoData {
        player: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("No data available: all {total} pitch records are missing required fields")]
    AllRecordsInvalid { total: usize },

    #[error("Unsupported season {0}: choose one of {supported}", supported = data::season::supported_years_label())]
    UnsupportedSeason(u16),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No cached response for {0} (offline mode)")]
    CacheMiss(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl PitchError {
    /// True for halts caused by the data rather than by the query
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            PitchError::NoData { .. } | PitchError::AllRecordsInvalid { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PitchError>;

/// Application configuration loaded from pitchtrends.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub source: SourceConfig,
    pub chart: ChartStyle,
    /// Extra or overriding pitch-type display names, keyed by code
    #[serde(default)]
    pub catalog: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub bucketing: BucketStrategy,
    /// Overrides the strategy's default fill policy when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub savant_url: String,
    pub players_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,
    #[serde(default)]
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            analysis: AnalysisConfig {
                bucketing: BucketStrategy::Monthly,
                fill: None,
            },
            source: SourceConfig {
                savant_url: "https://baseballsavant.mlb.com/statcast_search/csv".to_string(),
                players_url: "https://statsapi.mlb.com/api/v1/sports/1/players".to_string(),
                user_agent: "pitchtrends/0.1".to_string(),
                timeout_secs: 60,
                cache_dir: None,
                offline: false,
            },
            chart: ChartStyle::default(),
            catalog: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PitchError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| PitchError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PitchError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Fill policy in effect for the configured strategy
    pub fn fill_policy(&self) -> FillPolicy {
        self.analysis
            .fill
            .unwrap_or_else(|| self.analysis.bucketing.default_fill())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pitchtrends.toml");
        let path = path.to_str().unwrap();

        let mut config = Config::default();
        config.analysis.bucketing = BucketStrategy::PerGame;
        config.catalog.insert("XX".to_string(), "Mystery Pitch".to_string());
        config.save(path).unwrap();

        let loaded = Config::load(path).unwrap();
        assert_eq!(loaded.analysis.bucketing, BucketStrategy::PerGame);
        assert_eq!(loaded.catalog.get("XX").map(String::as_str), Some("Mystery Pitch"));
        assert_eq!(loaded.fill_policy(), FillPolicy::ZeroFill);
    }

    #[test]
    fn test_config_fill_override() {
        let text = r#"
            [analysis]
            bucketing = "weekly"
            fill = "zero-fill"

            [source]
            savant_url = "http://localhost/csv"
            players_url = "http://localhost/players"
            user_agent = "test"
            timeout_secs = 5

            [chart]
            marker = "o"
            grid = true
            legend_title = "Pitch Type"
            usage_size = [10.0, 6.0]
            series_size = [12.0, 5.0]
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.analysis.bucketing, BucketStrategy::Weekly);
        assert_eq!(config.fill_policy(), FillPolicy::ZeroFill);
        assert!(config.catalog.is_empty());
        assert!(!config.source.offline);
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load("/nonexistent/pitchtrends.toml").unwrap_err();
        assert!(matches!(err, PitchError::Config(_)));
    }

    #[test]
    fn test_error_families() {
        let no_data = PitchError::NoData {
            player: "1".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 3, 28).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        };
        assert!(no_data.is_no_data());
        assert!(PitchError::AllRecordsInvalid { total: 3 }.is_no_data());
        assert!(!PitchError::UnsupportedSeason(2019).is_no_data());
        assert!(!PitchError::PlayerNotFound("Nobody".to_string()).is_no_data());

        let msg = PitchError::UnsupportedSeason(2019).to_string();
        assert!(msg.contains("2019"));
        assert!(msg.contains("2021"));
    }
}
