//! Time bucketing
//!
//! Assigns each cleaned pitch to a calendar month, a week of the pitcher's
//! season, or its game date.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};

use super::usage::FillPolicy;
use crate::PitchEvent;

/// How pitches are grouped along the time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketStrategy {
    Monthly,
    Weekly,
    PerGame,
}

impl BucketStrategy {
    /// Per-game charts share one date axis across every pitch type, so
    /// missing combinations are filled with zero there.
    pub fn default_fill(&self) -> FillPolicy {
        match self {
            BucketStrategy::PerGame => FillPolicy::ZeroFill,
            BucketStrategy::Monthly | BucketStrategy::Weekly => FillPolicy::Sparse,
        }
    }

    /// X-axis label for charts bucketed this way
    pub fn axis_label(&self) -> &'static str {
        match self {
            BucketStrategy::Monthly => "Month",
            BucketStrategy::Weekly => "Week",
            BucketStrategy::PerGame => "Date",
        }
    }
}

impl fmt::Display for BucketStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketStrategy::Monthly => write!(f, "monthly"),
            BucketStrategy::Weekly => write!(f, "weekly"),
            BucketStrategy::PerGame => write!(f, "per-game"),
        }
    }
}

impl FromStr for BucketStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "month" => Ok(BucketStrategy::Monthly),
            "weekly" | "week" => Ok(BucketStrategy::Weekly),
            "per-game" | "pergame" | "game" => Ok(BucketStrategy::PerGame),
            _ => Err(format!(
                "Unknown bucketing: {}. Use monthly, weekly, or per-game.",
                s
            )),
        }
    }
}

/// An ordered time bucket label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeBucket {
    Month { year: i32, month: u32 },
    /// 1-based week counted from the first game in the data
    Week(u32),
    Game(NaiveDate),
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBucket::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            TimeBucket::Week(n) => write!(f, "Week {}", n),
            TimeBucket::Game(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for TimeBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Week number of `date` relative to `season_min`
pub fn week_of_season(date: NaiveDate, season_min: NaiveDate) -> u32 {
    let days = (date - season_min).num_days().max(0);
    (days / 7) as u32 + 1
}

/// A cleaned pitch together with its bucket
#[derive(Debug, Clone, Copy)]
pub struct Bucketed<'a> {
    pub bucket: TimeBucket,
    pub event: &'a PitchEvent,
}

/// Label every pitch under `strategy`, preserving input order.
///
/// Weekly labels are relative to the earliest date in `events`, found in a
/// first pass so the result does not depend on input order.
pub fn bucketize(events: &[PitchEvent], strategy: BucketStrategy) -> Vec<Bucketed<'_>> {
    let season_min = match strategy {
        BucketStrategy::Weekly => match events.iter().map(|e| e.game_date).min() {
            Some(min) => Some(min),
            None => return Vec::new(),
        },
        _ => None,
    };

    events
        .iter()
        .map(|event| {
            let date = event.game_date;
            let bucket = match (strategy, season_min) {
                (BucketStrategy::Weekly, Some(min)) => TimeBucket::Week(week_of_season(date, min)),
                (BucketStrategy::PerGame, _) => TimeBucket::Game(date),
                _ => TimeBucket::Month {
                    year: date.year(),
                    month: date.month(),
                },
            };
            Bucketed { bucket, event }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(y: i32, m: u32, d: u32) -> PitchEvent {
        PitchEvent {
            game_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            pitch_type: "FF".to_string(),
            release_speed: 95.0,
            release_spin_rate: 2300.0,
            inning: Some(1),
            outs_when_up: Some(0),
        }
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("monthly".parse::<BucketStrategy>(), Ok(BucketStrategy::Monthly));
        assert_eq!("Weekly".parse::<BucketStrategy>(), Ok(BucketStrategy::Weekly));
        assert_eq!("per-game".parse::<BucketStrategy>(), Ok(BucketStrategy::PerGame));
        assert!("daily-ish".parse::<BucketStrategy>().is_err());
        assert_eq!(BucketStrategy::PerGame.to_string(), "per-game");
    }

    #[test]
    fn test_monthly() {
        let events = vec![make_event(2024, 4, 3), make_event(2024, 4, 29), make_event(2024, 5, 1)];
        let labels: Vec<String> = bucketize(&events, BucketStrategy::Monthly)
            .iter()
            .map(|b| b.bucket.to_string())
            .collect();
        assert_eq!(labels, vec!["2024-04", "2024-04", "2024-05"]);
    }

    #[test]
    fn test_weekly_relative_to_first_game() {
        // Out of order on purpose: the earliest date is in the middle
        let events = vec![
            make_event(2024, 4, 10),
            make_event(2024, 4, 2),
            make_event(2024, 4, 8),
            make_event(2024, 4, 9),
            make_event(2024, 4, 30),
        ];
        let buckets: Vec<TimeBucket> = bucketize(&events, BucketStrategy::Weekly)
            .iter()
            .map(|b| b.bucket)
            .collect();
        assert_eq!(
            buckets,
            vec![
                TimeBucket::Week(2),
                TimeBucket::Week(1),
                TimeBucket::Week(1),
                TimeBucket::Week(2),
                TimeBucket::Week(5),
            ]
        );
        assert_eq!(TimeBucket::Week(5).to_string(), "Week 5");
    }

    #[test]
    fn test_weekly_monotone() {
        let mut events: Vec<PitchEvent> = (1..=28).map(|d| make_event(2024, 6, d)).collect();
        events.reverse();

        let mut pairs: Vec<(NaiveDate, TimeBucket)> = bucketize(&events, BucketStrategy::Weekly)
            .iter()
            .map(|b| (b.event.game_date, b.bucket))
            .collect();
        pairs.sort();

        assert_eq!(pairs[0].1, TimeBucket::Week(1));
        assert!(pairs.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(pairs.last().unwrap().1, TimeBucket::Week(4));
    }

    #[test]
    fn test_per_game_identity() {
        let events = vec![make_event(2024, 7, 4)];
        let bucketed = bucketize(&events, BucketStrategy::PerGame);
        assert_eq!(bucketed[0].bucket, TimeBucket::Game(events[0].game_date));
        assert_eq!(bucketed[0].bucket.to_string(), "2024-07-04");
    }

    #[test]
    fn test_bucket_ordering() {
        let a = TimeBucket::Month { year: 2023, month: 12 };
        let b = TimeBucket::Month { year: 2024, month: 1 };
        assert!(a < b);
        assert!(TimeBucket::Week(2) < TimeBucket::Week(10));
    }

    #[test]
    fn test_empty() {
        assert!(bucketize(&[], BucketStrategy::Weekly).is_empty());
        assert!(bucketize(&[], BucketStrategy::Monthly).is_empty());
    }
}
