//! Directional decomposition of the wind-only potential transport into
//! 16 compass sectors, the wind-rose breakdown of where drifting snow
//! comes from.

use crate::error::DriftError;
use sdt_meteo::observation::HourlyObservation;

/// Number of compass sectors.
pub const SECTOR_COUNT: usize = 16;

/// Angular width of one sector, degrees.
pub const SECTOR_WIDTH_DEGREES: f64 = 22.5;

/// Sector names in index order; index 0 = N.
pub const SECTOR_NAMES: [&str; SECTOR_COUNT] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Sector index for a wind direction in degrees.
///
/// The half-width offset centers each bin on its named direction, so N
/// covers [348.75, 11.25). Any real direction is accepted and wrapped.
pub fn sector_index(direction: f64) -> usize {
    (((direction + SECTOR_WIDTH_DEGREES / 2.0).rem_euclid(360.0)) / SECTOR_WIDTH_DEGREES) as usize
}

/// Accumulate the per-hour wind transport into the sector selected by
/// that hour's wind direction. Units match qupot (kg/m); the sector sum
/// equals qupot up to float rounding.
pub fn compute_sector_transport(
    series: &[HourlyObservation],
) -> Result<[f64; SECTOR_COUNT], DriftError> {
    let mut sectors = [0.0f64; SECTOR_COUNT];
    for obs in series {
        if obs.wind_speed < 0.0 {
            return Err(DriftError::InvalidInput(format!(
                "wind speed must be non-negative, got {} at {}",
                obs.wind_speed, obs.timestamp
            )));
        }
        sectors[sector_index(obs.wind_direction)] += crate::transport::hourly_transport(obs.wind_speed);
    }
    Ok(sectors)
}

#[cfg(test)]
mod tests {
    use super::{compute_sector_transport, sector_index, SECTOR_NAMES};
    use crate::transport::hourly_transport;
    use sdt_meteo::observation::HourlyObservation;
    use chrono::NaiveDate;

    fn obs(hour: u32, wind_speed: f64, wind_direction: f64) -> HourlyObservation {
        HourlyObservation {
            timestamp: NaiveDate::from_ymd_opt(2022, 2, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            temperature: -4.0,
            precipitation: 0.0,
            wind_speed,
            wind_direction,
        }
    }

    #[test]
    fn test_sector_index_centers_bins() {
        assert_eq!(sector_index(0.0), 0); // N
        assert_eq!(sector_index(11.24), 0); // still N
        assert_eq!(sector_index(11.25), 1); // NNE starts
        assert_eq!(sector_index(348.75), 0); // N wraps below 360
        assert_eq!(sector_index(348.74), 15); // NNW
        assert_eq!(sector_index(90.0), 4); // E
        assert_eq!(sector_index(180.0), 8); // S
        assert_eq!(sector_index(270.0), 12); // W
    }

    #[test]
    fn test_sector_index_wraps_any_real() {
        assert_eq!(sector_index(360.0), sector_index(0.0));
        assert_eq!(sector_index(-90.0), sector_index(270.0));
        assert_eq!(sector_index(720.0 + 45.0), sector_index(45.0));
    }

    #[test]
    fn test_sector_names_align_with_index() {
        assert_eq!(SECTOR_NAMES[sector_index(0.0)], "N");
        assert_eq!(SECTOR_NAMES[sector_index(45.0)], "NE");
        assert_eq!(SECTOR_NAMES[sector_index(202.5)], "SSW");
    }

    #[test]
    fn test_transport_lands_in_one_sector() {
        let series = vec![obs(0, 9.0, 45.0), obs(1, 6.0, 45.0)];
        let sectors = compute_sector_transport(&series).unwrap();
        let expected = hourly_transport(9.0) + hourly_transport(6.0);
        assert!((sectors[2] - expected).abs() < 1e-12);
        let rest: f64 = sectors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, v)| v)
            .sum();
        assert_eq!(rest, 0.0);
    }

    #[test]
    fn test_empty_series() {
        let sectors = compute_sector_transport(&[]).unwrap();
        assert!(sectors.iter().all(|v| *v == 0.0));
    }
}
