//! Per-game velocity and spin series
//!
//! Velocity and spin are charted against game date with one line per pitch
//! type, each point the mean over that type's pitches in that game.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::PitchEvent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub count: usize,
    pub avg_velocity: f64,
    pub avg_spin: f64,
}

/// One pitch type's points in date order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchTypeSeries {
    pub pitch_type: String,
    pub points: Vec<SeriesPoint>,
}

/// Mean velocity and spin per (pitch type, game date).
///
/// Series come out in first-seen pitch-type order.
pub fn daily_means(events: &[PitchEvent]) -> Vec<PitchTypeSeries> {
    let mut order: Vec<(&str, BTreeMap<NaiveDate, (usize, f64, f64)>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let code = event.pitch_type.as_str();
        let slot = *index.entry(code).or_insert_with(|| {
            order.push((code, BTreeMap::new()));
            order.len() - 1
        });
        let (count, speed, spin) = order[slot].1.entry(event.game_date).or_insert((0, 0.0, 0.0));
        *count += 1;
        *speed += event.release_speed;
        *spin += event.release_spin_rate;
    }

    order
        .into_iter()
        .map(|(code, days)| PitchTypeSeries {
            pitch_type: code.to_string(),
            points: days
                .into_iter()
                .map(|(date, (count, speed, spin))| SeriesPoint {
                    date,
                    count,
                    avg_velocity: speed / count as f64,
                    avg_spin: spin / count as f64,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(d: u32, code: &str, speed: f64, spin: f64) -> PitchEvent {
        PitchEvent {
            game_date: NaiveDate::from_ymd_opt(2024, 4, d).unwrap(),
            pitch_type: code.to_string(),
            release_speed: speed,
            release_spin_rate: spin,
            inning: Some(1),
            outs_when_up: Some(0),
        }
    }

    #[test]
    fn test_daily_means() {
        let events = vec![
            make_event(9, "SL", 86.0, 2500.0),
            make_event(3, "FF", 96.0, 2300.0),
            make_event(3, "FF", 98.0, 2400.0),
            make_event(9, "FF", 97.0, 2350.0),
        ];
        let series = daily_means(&events);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].pitch_type, "SL");
        assert_eq!(series[1].pitch_type, "FF");

        let ff = &series[1].points;
        assert_eq!(ff.len(), 2);
        assert_eq!(ff[0].date, NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
        assert_eq!(ff[0].count, 2);
        assert_eq!(ff[0].avg_velocity, 97.0);
        assert_eq!(ff[0].avg_spin, 2350.0);
        assert_eq!(ff[1].avg_velocity, 97.0);
    }

    #[test]
    fn test_empty() {
        assert!(daily_means(&[]).is_empty());
    }
}
