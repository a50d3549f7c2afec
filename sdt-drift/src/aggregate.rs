//! Per-season transport aggregation.
//!
//! Splits a multi-year series into snow seasons (July 1 to June 30) and
//! runs the transport model once per season. Seasons are independent
//! design load cases; no state carries across the boundary.

use crate::error::DriftError;
use crate::transport::{compute_transport, TablerParams, TransportResult};
use log::debug;
use sdt_meteo::observation::HourlyObservation;
use sdt_meteo::season::{season_label, seasons_from_series};
use serde::Serialize;

/// Transport estimate for one labelled season.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonTransport {
    /// Season label, e.g. "2021-2022"
    pub label: String,
    /// Calendar year the season starts in
    pub season_year: i32,
    pub result: TransportResult,
}

/// Split a series into seasons and compute the transport estimate for
/// each, ordered by season start year. Seasons with no observations are
/// skipped; absence of data is distinct from a zero-transport season.
///
/// The full series must be strictly chronological with non-negative
/// precipitation and wind speed; defects fail the whole call.
pub fn aggregate_by_season(
    series: &[HourlyObservation],
    params: &TablerParams,
) -> Result<Vec<SeasonTransport>, DriftError> {
    params.validate()?;
    HourlyObservation::validate_series(series)?;

    let mut season_results = Vec::new();
    for (year, season_series) in seasons_from_series(series) {
        let result = compute_transport(&season_series, params)?;
        debug!(
            "Season {}: {} hours, qt {:.1} kg/m ({})",
            season_label(year),
            season_series.len(),
            result.qt,
            result.control
        );
        season_results.push(SeasonTransport {
            label: season_label(year),
            season_year: year,
            result,
        });
    }
    Ok(season_results)
}

#[cfg(test)]
mod tests {
    use super::aggregate_by_season;
    use crate::error::DriftError;
    use crate::transport::TablerParams;
    use chrono::{Duration, NaiveDate};
    use sdt_meteo::observation::HourlyObservation;

    /// One observation every hour from start for `hours` hours.
    fn hourly_series(start: NaiveDate, hours: i64) -> Vec<HourlyObservation> {
        let start = start.and_hms_opt(0, 0, 0).unwrap();
        (0..hours)
            .map(|h| HourlyObservation {
                timestamp: start + Duration::hours(h),
                temperature: -2.0,
                precipitation: 0.05,
                wind_speed: 5.0,
                wind_direction: (h % 360) as f64,
            })
            .collect()
    }

    #[test]
    fn test_two_year_series_partitions_into_three_seasons() {
        // Jan 1 2021 through Dec 31 2022, gap-free
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let hours = (end - start).num_hours();
        let series = hourly_series(start, hours);

        let seasons = aggregate_by_season(&series, &TablerParams::default()).unwrap();
        let labels: Vec<&str> = seasons.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["2020-2021", "2021-2022", "2022-2023"]);

        // every observation in exactly one bucket: partial Jan-Jun 2021,
        // full 2021-2022 season, partial Jul-Dec 2022
        let jul1_2021 = NaiveDate::from_ymd_opt(2021, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let jul1_2022 = NaiveDate::from_ymd_opt(2022, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let first_partial = series.iter().filter(|o| o.timestamp < jul1_2021).count();
        let full_season = series
            .iter()
            .filter(|o| o.timestamp >= jul1_2021 && o.timestamp < jul1_2022)
            .count();
        let last_partial = series.iter().filter(|o| o.timestamp >= jul1_2022).count();
        assert_eq!(first_partial + full_season + last_partial, series.len());
        let expected_swe = full_season as f64 * 0.05;
        assert!((seasons[1].result.total_swe - expected_swe).abs() < 1e-6 * expected_swe);
    }

    #[test]
    fn test_empty_seasons_skipped() {
        let mut series = hourly_series(NaiveDate::from_ymd_opt(2020, 12, 1).unwrap(), 24);
        series.extend(hourly_series(
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            24,
        ));
        let seasons = aggregate_by_season(&series, &TablerParams::default()).unwrap();
        let labels: Vec<&str> = seasons.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["2020-2021", "2023-2024"]);
    }

    #[test]
    fn test_empty_series_yields_no_seasons() {
        let seasons = aggregate_by_season(&[], &TablerParams::default()).unwrap();
        assert!(seasons.is_empty());
    }

    #[test]
    fn test_unsorted_series_rejected() {
        let mut series = hourly_series(NaiveDate::from_ymd_opt(2021, 12, 1).unwrap(), 24);
        series.swap(0, 1);
        let result = aggregate_by_season(&series, &TablerParams::default());
        assert!(matches!(result, Err(DriftError::InvalidInput(_))));
    }
}
