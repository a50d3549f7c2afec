//! Fetch + analyze implementation, and the shared season report output.

use chrono::NaiveDate;
use log::info;
use sdt_drift::aggregate::{aggregate_by_season, SeasonTransport};
use sdt_drift::fence::{required_fence_height, FenceType};
use sdt_drift::sector::SECTOR_NAMES;
use sdt_drift::transport::TablerParams;
use sdt_meteo::archive::{fetch_hourly_series, ArchiveRequest};
use sdt_meteo::observation::HourlyObservation;

/// Header row of the per-season results CSV.
pub const SEASON_CSV_HEADER: &str =
    "season,qupot_kg_per_m,qspot_kg_per_m,srwe_mm,qinf_kg_per_m,qt_kg_per_m,control,total_swe_mm,fence_height_m";

/// Fetch the archive series covering the requested seasons and run the
/// per-season analysis.
pub async fn run_analyze(
    latitude: f64,
    longitude: f64,
    start_year: i32,
    end_year: i32,
    params: TablerParams,
    fence_type: &str,
    output_csv: Option<&str>,
) -> anyhow::Result<()> {
    if start_year > end_year {
        anyhow::bail!("start year {start_year} is after end year {end_year}");
    }
    let fence: FenceType = fence_type.parse()?;

    // Season Y runs Jul 1 Y through Jun 30 Y+1
    let start_date = NaiveDate::from_ymd_opt(start_year, 7, 1).unwrap();
    let end_date = NaiveDate::from_ymd_opt(end_year + 1, 6, 30).unwrap();
    let request = ArchiveRequest {
        latitude,
        longitude,
        start_date,
        end_date,
    };
    let series = fetch_hourly_series(&request).await?;
    info!(
        "Loaded {} hours of weather data for seasons {}..{}",
        series.len(),
        start_year,
        end_year
    );

    analyze_series(&series, &params, fence, output_csv)
}

/// Aggregate a series by season, log a summary per season, and write
/// the results CSV if requested.
pub fn analyze_series(
    series: &[HourlyObservation],
    params: &TablerParams,
    fence: FenceType,
    output_csv: Option<&str>,
) -> anyhow::Result<()> {
    let seasons = aggregate_by_season(series, params)?;
    if seasons.is_empty() {
        info!("No seasonal data in the supplied series");
        return Ok(());
    }

    for season in &seasons {
        let result = &season.result;
        let height = required_fence_height(result.qt, fence)?;
        let dominant = dominant_sector(&result.sector_transport);
        info!(
            "Season {}: Qt {:.1} tonnes/m ({}), SWE {:.0} mm, dominant sector {}, {} fence {:.2} m",
            season.label,
            result.qt / 1000.0,
            result.control,
            result.total_swe,
            dominant,
            fence,
            height
        );
    }

    if let Some(path) = output_csv {
        let rows = season_csv_rows(&seasons, fence)?;
        let mut output = String::from(SEASON_CSV_HEADER);
        output.push('\n');
        output.push_str(&rows.join("\n"));
        output.push('\n');
        std::fs::write(path, &output)?;
        info!("Wrote {} season rows to {}", seasons.len(), path);
    }
    Ok(())
}

/// Format one CSV row per season.
pub fn season_csv_rows(
    seasons: &[SeasonTransport],
    fence: FenceType,
) -> anyhow::Result<Vec<String>> {
    let mut rows = Vec::with_capacity(seasons.len());
    for season in seasons {
        let result = &season.result;
        let height = required_fence_height(result.qt, fence)?;
        rows.push(format!(
            "{},{:.3},{:.3},{:.3},{:.3},{:.3},{},{:.3},{:.3}",
            season.label,
            result.qupot,
            result.qspot,
            result.srwe,
            result.qinf,
            result.qt,
            result.control,
            result.total_swe,
            height
        ));
    }
    Ok(rows)
}

/// Name of the sector with the largest accumulated transport.
pub fn dominant_sector(sector_transport: &[f64; 16]) -> &'static str {
    let mut index = 0;
    for (i, value) in sector_transport.iter().enumerate() {
        if *value > sector_transport[index] {
            index = i;
        }
    }
    SECTOR_NAMES[index]
}

#[cfg(test)]
mod tests {
    use super::{dominant_sector, season_csv_rows};
    use chrono::{Duration, NaiveDate};
    use sdt_drift::aggregate::aggregate_by_season;
    use sdt_drift::fence::FenceType;
    use sdt_drift::transport::TablerParams;
    use sdt_meteo::observation::HourlyObservation;

    #[test]
    fn test_dominant_sector() {
        let mut sectors = [0.0f64; 16];
        sectors[12] = 42.0;
        sectors[3] = 7.0;
        assert_eq!(dominant_sector(&sectors), "W");
    }

    #[test]
    fn test_season_csv_rows() {
        let start = NaiveDate::from_ymd_opt(2021, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let series: Vec<_> = (0..48)
            .map(|h| HourlyObservation {
                timestamp: start + Duration::hours(h),
                temperature: -3.0,
                precipitation: 0.2,
                wind_speed: 8.0,
                wind_direction: 310.0,
            })
            .collect();
        let seasons = aggregate_by_season(&series, &TablerParams::default()).unwrap();
        let rows = season_csv_rows(&seasons, FenceType::Wyoming).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("2021-2022,"));
        assert_eq!(rows[0].split(',').count(), 9);
    }
}
