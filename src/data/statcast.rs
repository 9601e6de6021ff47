//! Statcast CSV parsing
//!
//! Baseball Savant's search export has ~90 columns; only the ones the
//! analysis reads are deserialized and the rest are ignored.

use serde::Deserialize;

use crate::{RawPitchEvent, Result};

/// Columns read from a Statcast export. Cells that are blank or fail to
/// parse come through as `None`.
#[derive(Debug, Deserialize)]
struct StatcastRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    game_date: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pitch_type: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    release_speed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    release_spin_rate: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    inning: Option<u8>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    outs_when_up: Option<u8>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    game_pk: Option<u32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    at_bat_number: Option<u32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pitch_number: Option<u32>,
}

impl From<StatcastRow> for RawPitchEvent {
    fn from(row: StatcastRow) -> Self {
        RawPitchEvent {
            game_date: row.game_date,
            pitch_type: row.pitch_type,
            release_speed: row.release_speed,
            release_spin_rate: row.release_spin_rate,
            inning: row.inning,
            outs_when_up: row.outs_when_up,
            game_pk: row.game_pk,
            at_bat_number: row.at_bat_number,
            pitch_number: row.pitch_number,
        }
    }
}

/// Parse a Statcast CSV export into raw pitch rows in chronological order
pub fn parse_csv(text: &str) -> Result<Vec<RawPitchEvent>> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.deserialize::<StatcastRow>() {
        rows.push(RawPitchEvent::from(result?));
    }

    sort_chronological(&mut rows);
    Ok(rows)
}

/// Savant exports newest pitch first. Order by (date, game, at-bat, pitch)
/// so the last row of each date is the last pitch thrown that day, even
/// across a doubleheader: game ids increase in scheduled order and at-bat
/// numbers restart in each game. Stable, so rows without these columns keep
/// their relative order within a date.
pub fn sort_chronological(rows: &mut [RawPitchEvent]) {
    rows.sort_by(|a, b| {
        (&a.game_date, a.game_pk, a.at_bat_number, a.pitch_number).cmp(&(
            &b.game_date,
            b.game_pk,
            b.at_bat_number,
            b.pitch_number,
        ))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}pitch_type,game_date,release_speed,release_pos_x,player_name,release_spin_rate,inning,outs_when_up,at_bat_number,pitch_number
SL,2024-04-03,86.1,-1.2,\"Crochet, Garrett\",2410,2,1,9,2
FF,2024-04-03,97.3,-1.1,\"Crochet, Garrett\",2380,2,1,9,1
FF,2024-03-28,96.8,-1.0,\"Crochet, Garrett\",,1,0,1,1
,2024-03-28,95.0,-1.0,\"Crochet, Garrett\",2300,1,0,1,2
";

    #[test]
    fn test_parse_sample() {
        let rows = parse_csv(SAMPLE).unwrap();
        assert_eq!(rows.len(), 4);

        // Sorted oldest first
        assert_eq!(rows[0].game_date.as_deref(), Some("2024-03-28"));
        assert_eq!(rows[0].pitch_number, Some(1));
        assert_eq!(rows[0].release_spin_rate, None);
        assert_eq!(rows[1].pitch_type, None);

        let last = &rows[3];
        assert_eq!(last.pitch_type.as_deref(), Some("SL"));
        assert_eq!(last.release_speed, Some(86.1));
        assert_eq!(last.inning, Some(2));
        assert_eq!(last.outs_when_up, Some(1));
    }

    #[test]
    fn test_doubleheader_keeps_games_apart() {
        // Newest first: game 2 of the doubleheader, then game 1
        let text = "game_date,game_pk,pitch_type,release_speed,release_spin_rate,inning,outs_when_up,at_bat_number,pitch_number
2024-07-13,746002,FF,96.0,2350,5,1,5,1
2024-07-13,746002,SL,86.0,2400,4,0,4,1
2024-07-13,746001,FF,96.5,2360,4,2,30,1
2024-07-13,746001,CH,88.0,1900,3,1,29,1
";
        let rows = parse_csv(text).unwrap();
        let order: Vec<_> = rows.iter().map(|r| (r.game_pk, r.at_bat_number)).collect();
        assert_eq!(
            order,
            vec![
                (Some(746001), Some(29)),
                (Some(746001), Some(30)),
                (Some(746002), Some(4)),
                (Some(746002), Some(5)),
            ]
        );

        let totals = crate::analysis::summary::outing_totals(&rows);
        assert_eq!(totals.appearances, 1);
        assert!((totals.innings_pitched - (5.0 + 1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_cells_are_absent() {
        let text = "game_date,pitch_type,release_speed,release_spin_rate,inning,outs_when_up
2024-05-01,FF,null,abc,x,
";
        let rows = parse_csv(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pitch_type.as_deref(), Some("FF"));
        assert_eq!(rows[0].release_speed, None);
        assert_eq!(rows[0].release_spin_rate, None);
        assert_eq!(rows[0].inning, None);
        assert_eq!(rows[0].outs_when_up, None);
    }

    #[test]
    fn test_missing_columns() {
        let rows = parse_csv("game_date,pitch_type\n2024-05-01,CH\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].release_speed, None);
        assert_eq!(rows[0].at_bat_number, None);
    }

    #[test]
    fn test_empty_export() {
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("\u{feff}\n").unwrap().is_empty());
        assert!(parse_csv("game_date,pitch_type\n").unwrap().is_empty());
    }
}
