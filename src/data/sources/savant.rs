//! Baseball Savant Statcast search client
//!
//! Downloads the per-pitch CSV export for one pitcher and date range.

use std::time::Duration;

use super::{PitchSource, ResponseCache};
use crate::data::statcast::parse_csv;
use crate::{DataSource, PlayerId, RawPitchEvent, Result, SeasonWindow, SourceConfig};

/// Client for the Statcast search CSV endpoint
pub struct SavantClient {
    client: reqwest::blocking::Client,
    url: String,
    cache: ResponseCache,
}

impl SavantClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(SavantClient {
            client,
            url: config.savant_url.clone(),
            cache: ResponseCache::disabled(),
        })
    }

    /// Cache responses through the given cache
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    /// Query string for a pitcher's pitches of every game type (regular
    /// season, postseason, spring training) inside the window
    fn query(player: PlayerId, window: &SeasonWindow) -> Vec<(&'static str, String)> {
        vec![
            ("all", "true".to_string()),
            ("type", "details".to_string()),
            ("player_type", "pitcher".to_string()),
            ("hfGT", "R|PO|S|".to_string()),
            ("pitchers_lookup[]", player.to_string()),
            ("game_date_gt", window.start.format("%Y-%m-%d").to_string()),
            ("game_date_lt", window.end.format("%Y-%m-%d").to_string()),
            ("min_pitches", "0".to_string()),
            ("min_results", "0".to_string()),
        ]
    }

    fn cache_key(player: PlayerId, window: &SeasonWindow) -> String {
        format!("savant-{}-{}-{}.csv", player, window.start, window.end)
    }

    /// Download the raw CSV export
    pub fn fetch_csv(&self, player: PlayerId, window: &SeasonWindow) -> Result<String> {
        self.cache.get_or_fetch(&Self::cache_key(player, window), || {
            log::info!("Fetching Statcast pitches for {} ({})", player, window);
            let response = self
                .client
                .get(&self.url)
                .query(&Self::query(player, window))
                .send()?
                .error_for_status()?;
            Ok(response.text()?)
        })
    }
}

impl PitchSource for SavantClient {
    fn source(&self) -> DataSource {
        DataSource::Savant
    }

    fn fetch_pitches(&self, player: PlayerId, window: &SeasonWindow) -> Result<Vec<RawPitchEvent>> {
        let text = self.fetch_csv(player, window)?;
        let rows = parse_csv(&text)?;
        log::info!("Fetched {} pitch rows from {}", rows.len(), self.source());
        Ok(rows)
    }
}
