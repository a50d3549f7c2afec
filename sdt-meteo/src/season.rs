//! Snow season (water year) date logic.
//!
//! The Norwegian hydrological year runs from July 1 to June 30 and is the
//! 12-month timeframe used to capture one complete winter accumulation
//! cycle. A season is labelled by its starting calendar year, e.g.
//! "2021-2022" covers July 1 2021 through June 30 2022.

use crate::observation::HourlyObservation;
use chrono::{Datelike, NaiveDateTime};

/// Get the season (water year) for a given timestamp.
/// Season runs Jul 1 to Jun 30.
/// e.g., Jul 1 2022 -> season 2022, Jun 30 2023 -> season 2022
pub fn season_year_for(timestamp: &NaiveDateTime) -> i32 {
    let month = timestamp.month();
    let year = timestamp.year();
    if month >= 7 {
        year
    } else {
        year - 1
    }
}

/// Label for a season starting in `year`, e.g. "2021-2022".
pub fn season_label(year: i32) -> String {
    format!("{}-{}", year, year + 1)
}

/// Partition a series into per-season groups, ordered by season start
/// year. Seasons with no observations are not emitted.
pub fn seasons_from_series(
    series: &[HourlyObservation],
) -> Vec<(i32, Vec<HourlyObservation>)> {
    let (min_year, max_year) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (
            season_year_for(&first.timestamp),
            season_year_for(&last.timestamp),
        ),
        _ => return Vec::new(),
    };

    let mut seasons = Vec::new();
    for year in min_year..=max_year {
        let season_observations: Vec<_> = series
            .iter()
            .filter(|obs| season_year_for(&obs.timestamp) == year)
            .cloned()
            .collect();
        if !season_observations.is_empty() {
            seasons.push((year, season_observations));
        }
    }
    seasons
}
