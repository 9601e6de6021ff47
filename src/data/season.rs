//! Supported season windows

use chrono::NaiveDate;

use crate::{PitchError, Result, SeasonWindow};

/// (year, start, end) for every supported season
const SEASONS: &[(u16, (i32, u32, u32), (i32, u32, u32))] = &[
    (2021, (2021, 4, 1), (2021, 10, 3)),
    (2022, (2022, 4, 7), (2022, 10, 5)),
    (2023, (2023, 3, 30), (2023, 10, 1)),
    (2024, (2024, 3, 28), (2024, 10, 1)),
    (2025, (2025, 3, 27), (2025, 9, 28)),
];

fn date((y, m, d): (i32, u32, u32)) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| PitchError::Parse(format!("invalid season date {}-{}-{}", y, m, d)))
}

/// Look up the window for a season year
pub fn season_window(year: u16) -> Result<SeasonWindow> {
    let (_, start, end) = SEASONS
        .iter()
        .find(|(y, _, _)| *y == year)
        .ok_or(PitchError::UnsupportedSeason(year))?;

    Ok(SeasonWindow {
        year,
        start: date(*start)?,
        end: date(*end)?,
    })
}

/// All supported windows, oldest first
pub fn all_seasons() -> Result<Vec<SeasonWindow>> {
    SEASONS.iter().map(|(y, _, _)| season_window(*y)).collect()
}

pub fn supported_years() -> impl Iterator<Item = u16> {
    SEASONS.iter().map(|(y, _, _)| *y)
}

/// "2021, 2022, ..." for error messages
pub fn supported_years_label() -> String {
    supported_years()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
