//! Local Statcast CSV source

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::PitchSource;
use crate::analysis::cleaning::parse_game_date;
use crate::data::statcast::parse_csv;
use crate::{DataSource, PlayerId, RawPitchEvent, Result, SeasonWindow};

/// Reads a previously downloaded Savant export from disk.
///
/// The file is assumed to hold one pitcher, so the player id is ignored.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PitchSource for CsvFileSource {
    fn source(&self) -> DataSource {
        DataSource::File
    }

    fn fetch_pitches(&self, _player: PlayerId, window: &SeasonWindow) -> Result<Vec<RawPitchEvent>> {
        log::info!("Reading pitches from {}", self.path.display());
        let text = std::fs::read_to_string(&self.path)?;
        let rows = parse_csv(&text)?;
        let total = rows.len();

        // Rows with unreadable dates stay in; the cleaner rejects them.
        let rows: Vec<_> = rows
            .into_iter()
            .filter(|row| {
                let date: Option<NaiveDate> = row.game_date.as_deref().and_then(parse_game_date);
                date.map(|d| window.contains(d)).unwrap_or(true)
            })
            .collect();

        if rows.len() < total {
            log::debug!(
                "Dropped {} rows outside {}",
                total - rows.len(),
                window
            );
        }
        Ok(rows)
    }
}
