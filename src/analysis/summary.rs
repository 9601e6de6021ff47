//! Season summary statistics
//!
//! Appearances and innings pitched come from the raw rows grouped by game;
//! velocity and spin averages come from the cleaned pitches.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::catalog::PitchTypeCatalog;
use super::cleaning::parse_game_date;
use crate::{PitchEvent, RawPitchEvent};

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Averages for one pitch type over the whole window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchTypeSummary {
    /// Raw Statcast code, the grouping key
    pub pitch_type: String,
    pub display_name: String,
    /// Cleaned pitches of this type
    pub count: usize,
    /// Mean release speed (mph), 1 decimal
    pub avg_velocity: f64,
    /// Mean spin rate (rpm), whole number
    pub avg_spin: f64,
}

/// Workload totals over the raw rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutingTotals {
    /// Distinct game dates
    pub appearances: usize,
    /// Σ max inning per game + Σ last outs_when_up per game / 3
    pub innings_pitched: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub appearances: usize,
    pub innings_pitched: f64,
    /// One entry per pitch type, in order of first appearance
    pub pitch_types: Vec<PitchTypeSummary>,
}

impl SeasonSummary {
    fn entry(&self, pitch_type: &str) -> Option<&PitchTypeSummary> {
        self.pitch_types.iter().find(|p| p.pitch_type == pitch_type)
    }

    pub fn avg_velocity(&self, pitch_type: &str) -> Option<f64> {
        self.entry(pitch_type).map(|p| p.avg_velocity)
    }

    pub fn avg_spin(&self, pitch_type: &str) -> Option<f64> {
        self.entry(pitch_type).map(|p| p.avg_spin)
    }

    /// Innings in box-score notation, e.g. 13.667 -> "13.2"
    pub fn innings_notation(&self) -> String {
        let outs = (self.innings_pitched * 3.0).round().max(0.0) as u64;
        format!("{}.{}", outs / 3, outs % 3)
    }
}

#[derive(Debug, Default)]
struct GameLine {
    max_inning: Option<u8>,
    last_outs: Option<u8>,
}

/// Appearances and innings pitched from raw rows in input order.
///
/// Innings use each game's highest inning plus the outs recorded on the
/// last row of that game carrying an `outs_when_up` value. Rows whose date
/// cannot be parsed belong to no game.
pub fn outing_totals(raw: &[RawPitchEvent]) -> OutingTotals {
    let mut games: BTreeMap<NaiveDate, GameLine> = BTreeMap::new();

    for row in raw {
        let Some(date) = row.game_date.as_deref().and_then(parse_game_date) else {
            continue;
        };
        let game = games.entry(date).or_default();
        if let Some(inning) = row.inning {
            game.max_inning = Some(game.max_inning.map_or(inning, |m| m.max(inning)));
        }
        if row.outs_when_up.is_some() {
            game.last_outs = row.outs_when_up;
        }
    }

    let full: u32 = games
        .values()
        .map(|g| g.max_inning.unwrap_or(0) as u32)
        .sum();
    let outs: u32 = games
        .values()
        .map(|g| g.last_outs.unwrap_or(0) as u32)
        .sum();

    OutingTotals {
        appearances: games.len(),
        innings_pitched: full as f64 + outs as f64 / 3.0,
    }
}

#[derive(Debug, Default)]
struct Running {
    count: usize,
    speed_sum: f64,
    spin_sum: f64,
}

/// Per-pitch-type means keyed by raw code, in first-seen order
fn pitch_type_means(events: &[PitchEvent]) -> Vec<(String, Running)> {
    let mut order: Vec<(String, Running)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let slot = *index.entry(event.pitch_type.as_str()).or_insert_with(|| {
            order.push((event.pitch_type.clone(), Running::default()));
            order.len() - 1
        });
        let running = &mut order[slot].1;
        running.count += 1;
        running.speed_sum += event.release_speed;
        running.spin_sum += event.release_spin_rate;
    }

    order
}

/// Build the season summary. Display names are attached after the numeric
/// aggregation, which is keyed on raw codes only.
pub fn summarize(
    raw: &[RawPitchEvent],
    events: &[PitchEvent],
    catalog: &PitchTypeCatalog,
) -> SeasonSummary {
    let totals = outing_totals(raw);

    let pitch_types = pitch_type_means(events)
        .into_iter()
        .map(|(code, running)| {
            let n = running.count as f64;
            PitchTypeSummary {
                display_name: catalog.display_name(&code).to_string(),
                count: running.count,
                avg_velocity: round_to(running.speed_sum / n, 1),
                avg_spin: round_to(running.spin_sum / n, 0),
                pitch_type: code,
            }
        })
        .collect();

    SeasonSummary {
        appearances: totals.appearances,
        innings_pitched: totals.innings_pitched,
        pitch_types,
    }
}
