//! Raw pitch row cleaning
//!
//! A row is kept only when date, pitch type, release speed and spin rate are
//! all present. Nothing is imputed.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{PitchEvent, RawPitchEvent};

/// What the cleaner kept and why it dropped the rest.
///
/// A dropped row with several missing fields counts toward each of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Rows received
    pub total: usize,
    /// Rows that survived
    pub kept: usize,
    pub missing_date: usize,
    pub missing_pitch_type: usize,
    pub missing_speed: usize,
    pub missing_spin: usize,
}

impl CleaningStats {
    pub fn dropped(&self) -> usize {
        self.total - self.kept
    }
}

/// Cleaned pitches in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub events: Vec<PitchEvent>,
    pub stats: CleaningStats,
}

impl Cleaned {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Parse a Statcast `game_date` cell. Accepts a bare ISO date or one
/// followed by a time component.
pub fn parse_game_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
        let date_part = text.split(|c: char| c == ' ' || c == 'T').next()?;
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    })
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn clean_one(raw: &RawPitchEvent, stats: &mut CleaningStats) -> Option<PitchEvent> {
    let game_date = raw.game_date.as_deref().and_then(parse_game_date);
    let pitch_type = raw
        .pitch_type
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty());
    let release_speed = finite(raw.release_speed);
    let release_spin_rate = finite(raw.release_spin_rate);

    match (game_date, pitch_type, release_speed, release_spin_rate) {
        (Some(game_date), Some(pitch_type), Some(release_speed), Some(release_spin_rate)) => {
            Some(PitchEvent {
                game_date,
                pitch_type: pitch_type.to_string(),
                release_speed,
                release_spin_rate,
                inning: raw.inning,
                outs_when_up: raw.outs_when_up,
            })
        }
        _ => {
            stats.missing_date += game_date.is_none() as usize;
            stats.missing_pitch_type += pitch_type.is_none() as usize;
            stats.missing_speed += release_speed.is_none() as usize;
            stats.missing_spin += release_spin_rate.is_none() as usize;
            None
        }
    }
}

/// Drop every row missing a required field and type the survivors
pub fn clean(raw: &[RawPitchEvent]) -> Cleaned {
    let mut stats = CleaningStats {
        total: raw.len(),
        ..Default::default()
    };

    let events: Vec<PitchEvent> = raw
        .iter()
        .filter_map(|row| clean_one(row, &mut stats))
        .collect();
    stats.kept = events.len();

    if stats.dropped() > 0 {
        log::debug!(
            "Cleaning dropped {} of {} rows (date: {}, pitch type: {}, speed: {}, spin: {})",
            stats.dropped(),
            stats.total,
            stats.missing_date,
            stats.missing_pitch_type,
            stats.missing_speed,
            stats.missing_spin
        );
    }

    Cleaned { events, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_raw(date: Option<&str>, code: Option<&str>, speed: Option<f64>, spin: Option<f64>) -> RawPitchEvent {
        RawPitchEvent {
            game_date: date.map(String::from),
            pitch_type: code.map(String::from),
            release_speed: speed,
            release_spin_rate: spin,
            inning: Some(1),
            outs_when_up: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_game_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 3);
        assert_eq!(parse_game_date("2024-04-03"), expected);
        assert_eq!(parse_game_date(" 2024-04-03 "), expected);
        assert_eq!(parse_game_date("2024-04-03 00:00:00"), expected);
        assert_eq!(parse_game_date("2024-04-03T19:10:00"), expected);
        assert_eq!(parse_game_date("04/03/2024"), None);
        assert_eq!(parse_game_date(""), None);
    }

    #[test]
    fn test_drops_incomplete_rows() {
        let raw = vec![
            make_raw(Some("2024-04-03"), Some("FF"), Some(97.1), Some(2400.0)),
            make_raw(None, Some("FF"), Some(97.1), Some(2400.0)),
            make_raw(Some("2024-04-03"), Some("  "), Some(97.1), Some(2400.0)),
            make_raw(Some("2024-04-03"), Some("SL"), None, None),
            make_raw(Some("2024-04-03"), Some("SL"), Some(f64::NAN), Some(2500.0)),
            make_raw(Some("garbage"), Some("CH"), Some(88.0), Some(1700.0)),
        ];

        let cleaned = clean(&raw);
        assert_eq!(cleaned.events.len(), 1);
        assert_eq!(cleaned.events[0].pitch_type, "FF");
        assert_eq!(cleaned.events[0].inning, Some(1));

        let stats = cleaned.stats;
        assert_eq!(stats.total, 6);
        assert_eq!(stats.kept, 1);
        assert_eq!(stats.dropped(), 5);
        assert_eq!(stats.missing_date, 2);
        assert_eq!(stats.missing_pitch_type, 1);
        assert_eq!(stats.missing_speed, 2);
        assert_eq!(stats.missing_spin, 1);
    }

    #[test]
    fn test_trims_pitch_type() {
        let cleaned = clean(&[make_raw(Some("2024-04-03"), Some(" SL "), Some(85.0), Some(2500.0))]);
        assert_eq!(cleaned.events[0].pitch_type, "SL");
    }

    #[test]
    fn test_reclean_is_noop() {
        let raw = vec![
            make_raw(Some("2024-04-03"), Some("FF"), Some(97.1), Some(2400.0)),
            make_raw(Some("2024-04-09"), Some("SL"), Some(86.4), Some(2550.0)),
            make_raw(Some("2024-04-09"), None, Some(86.4), Some(2550.0)),
        ];
        let first = clean(&raw);
        let again: Vec<RawPitchEvent> = first.events.iter().map(RawPitchEvent::from).collect();
        let second = clean(&again);

        assert_eq!(second.stats.dropped(), 0);
        assert_eq!(second.events, first.events);
    }

    #[test]
    fn test_all_invalid() {
        let cleaned = clean(&[make_raw(None, None, None, None)]);
        assert!(cleaned.is_empty());
        assert_eq!(cleaned.stats.total, 1);
    }
}
