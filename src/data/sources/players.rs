//! MLB Stats API player directory
//!
//! Resolves a pitcher's display name to an MLBAM id from the season's
//! player list.

use std::time::Duration;

use serde::Deserialize;

use super::{PlayerDirectory, ResponseCache};
use crate::{Player, PlayerId, Result, SourceConfig};

#[derive(Debug, Deserialize)]
struct PlayersResponse {
    #[serde(default)]
    people: Vec<PersonEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonEntry {
    id: u32,
    full_name: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl PersonEntry {
    fn matches(&self, wanted: &str) -> bool {
        if normalize_name(&self.full_name) == wanted {
            return true;
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => normalize_name(&format!("{} {}", first, last)) == wanted,
            _ => false,
        }
    }
}

/// Lowercase, collapse whitespace and turn "Last, First" into "first last"
pub fn normalize_name(name: &str) -> String {
    let name = match name.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => name.to_string(),
    };
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find every player in a Stats API `players` response matching `name`
pub fn match_players(json: &str, name: &str) -> Result<Vec<Player>> {
    let response: PlayersResponse = serde_json::from_str(json)?;
    let wanted = normalize_name(name);

    Ok(response
        .people
        .into_iter()
        .filter(|p| p.matches(&wanted))
        .map(|p| Player {
            id: PlayerId(p.id),
            name: p.full_name,
        })
        .collect())
}

/// Player lookup backed by `statsapi.mlb.com`
pub struct MlbStatsDirectory {
    client: reqwest::blocking::Client,
    url: String,
    cache: ResponseCache,
}

impl MlbStatsDirectory {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(MlbStatsDirectory {
            client,
            url: config.players_url.clone(),
            cache: ResponseCache::disabled(),
        })
    }

    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    fn fetch_season(&self, season: u16) -> Result<String> {
        self.cache
            .get_or_fetch(&format!("players-{}.json", season), || {
                log::info!("Fetching {} player list", season);
                let response = self
                    .client
                    .get(&self.url)
                    .query(&[("season", season.to_string())])
                    .send()?
                    .error_for_status()?;
                Ok(response.text()?)
            })
    }
}

impl PlayerDirectory for MlbStatsDirectory {
    fn find_player(&self, name: &str, season: u16) -> Result<Option<Player>> {
        let json = self.fetch_season(season)?;
        let mut matches = match_players(&json, name)?;

        if matches.len() > 1 {
            let ids: Vec<String> = matches.iter().map(|p| p.id.to_string()).collect();
            log::warn!(
                "{} players match '{}' ({}); using the first",
                matches.len(),
                name,
                ids.join(", ")
            );
        }

        Ok(if matches.is_empty() {
            None
        } else {
            Some(matches.swap_remove(0))
        })
    }
}
