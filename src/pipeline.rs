//! Run orchestration
//!
//! season lookup → player lookup → fetch → clean → {bucket → usage} and
//! {summary}. Each stage halts the run on its error; no partial output.

use serde::Serialize;

use crate::analysis::{
    bucketize, clean, daily_means, summarize, BucketStrategy, CleaningStats, FillPolicy,
    PitchTypeCatalog, PitchTypeSeries, SeasonSummary, UsageTable,
};
use crate::data::{season_window, PitchSource, PlayerDirectory};
use crate::{Config, PitchError, PitchEvent, Player, PlayerId, RawPitchEvent, Result, SeasonWindow};

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub player: Player,
    pub window: SeasonWindow,
    pub strategy: BucketStrategy,
    pub cleaning: CleaningStats,
    pub usage: UsageTable,
    pub summary: SeasonSummary,
    /// Cleaned pitches in input order
    pub pitches: Vec<PitchEvent>,
    /// Per-game means per pitch type
    pub daily: Vec<PitchTypeSeries>,
}

/// Runs the aggregation core over one fetched batch
#[derive(Debug, Clone)]
pub struct Analyzer {
    strategy: BucketStrategy,
    fill: FillPolicy,
    catalog: PitchTypeCatalog,
}

impl Analyzer {
    pub fn new(strategy: BucketStrategy) -> Self {
        Analyzer {
            strategy,
            fill: strategy.default_fill(),
            catalog: PitchTypeCatalog::standard(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Analyzer {
            strategy: config.analysis.bucketing,
            fill: config.fill_policy(),
            catalog: PitchTypeCatalog::standard().with_overrides(&config.catalog),
        }
    }

    pub fn with_fill(mut self, fill: FillPolicy) -> Self {
        self.fill = fill;
        self
    }

    pub fn catalog(&self) -> &PitchTypeCatalog {
        &self.catalog
    }

    /// Clean, bucket, count and summarize one batch of raw rows
    pub fn analyze(
        &self,
        player: Player,
        window: SeasonWindow,
        raw: &[RawPitchEvent],
    ) -> Result<Analysis> {
        if raw.is_empty() {
            return Err(PitchError::NoData {
                player: player.name,
                start: window.start,
                end: window.end,
            });
        }

        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return Err(PitchError::AllRecordsInvalid {
                total: cleaned.stats.total,
            });
        }
        log::info!(
            "Analyzing {} of {} pitches ({} bucketing)",
            cleaned.stats.kept,
            cleaned.stats.total,
            self.strategy
        );

        let bucketed = bucketize(&cleaned.events, self.strategy);
        let usage = UsageTable::build(&bucketed, self.fill);
        let summary = summarize(raw, &cleaned.events, &self.catalog);
        let daily = daily_means(&cleaned.events);

        Ok(Analysis {
            player,
            window,
            strategy: self.strategy,
            cleaning: cleaned.stats,
            usage,
            summary,
            pitches: cleaned.events,
            daily,
        })
    }
}

/// Full run against a pitch source and a player directory
pub struct Pipeline<'a> {
    source: &'a dyn PitchSource,
    directory: &'a dyn PlayerDirectory,
    analyzer: Analyzer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        source: &'a dyn PitchSource,
        directory: &'a dyn PlayerDirectory,
        analyzer: Analyzer,
    ) -> Self {
        Pipeline {
            source,
            directory,
            analyzer,
        }
    }

    /// A numeric query is taken as an MLBAM id; anything else is a name
    pub fn resolve_player(&self, query: &str, season: u16) -> Result<Player> {
        let query = query.trim();
        if let Ok(id) = query.parse::<u32>() {
            return Ok(Player {
                id: PlayerId(id),
                name: format!("Player {}", id),
            });
        }

        self.directory
            .find_player(query, season)?
            .ok_or_else(|| PitchError::PlayerNotFound(query.to_string()))
    }

    pub fn run(&self, player_query: &str, season: u16) -> Result<Analysis> {
        // Unsupported seasons are rejected before any network access
        let window = season_window(season)?;
        let player = self.resolve_player(player_query, season)?;
        log::info!("Resolved '{}' to {} ({})", player_query, player.name, player.id);

        let raw = self.source.fetch_pitches(player.id, &window)?;
        self.analyzer.analyze(player, window, &raw)
    }
}
