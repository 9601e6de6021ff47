//! Pitch data and player lookup sources

pub mod cache;
pub mod file;
pub mod players;
pub mod savant;

pub use cache::ResponseCache;
pub use file::CsvFileSource;
pub use players::MlbStatsDirectory;
pub use savant::SavantClient;

use crate::{DataSource, Player, PlayerId, RawPitchEvent, Result, SeasonWindow};

/// Anything that can hand over a season of pitch rows for one pitcher
pub trait PitchSource {
    /// The data source this fetches from
    fn source(&self) -> DataSource;

    /// Fetch every pitch thrown by the player inside the window, oldest first
    fn fetch_pitches(&self, player: PlayerId, window: &SeasonWindow) -> Result<Vec<RawPitchEvent>>;
}

/// Player name to MLBAM id resolution
pub trait PlayerDirectory {
    /// Find a player by display name, `None` if nobody matches
    fn find_player(&self, name: &str, season: u16) -> Result<Option<Player>>;
}
