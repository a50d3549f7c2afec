//! Analysis of a local hourly observations CSV.

use crate::analyze::analyze_series;
use log::info;
use sdt_drift::fence::FenceType;
use sdt_drift::transport::TablerParams;
use sdt_meteo::observation::HourlyObservation;

/// Read an hourly observations CSV and run the per-season analysis.
pub fn run_local(
    observations_csv: &str,
    params: TablerParams,
    fence_type: &str,
    output_csv: Option<&str>,
) -> anyhow::Result<()> {
    let fence: FenceType = fence_type.parse()?;

    let path = std::path::Path::new(observations_csv);
    if !path.exists() {
        anyhow::bail!("{observations_csv} not found");
    }
    let body = std::fs::read_to_string(path)?;
    let series = HourlyObservation::parse_observation_csv(&body)
        .map_err(|e| anyhow::anyhow!("failed to parse {observations_csv}: {e:?}"))?;
    info!(
        "Loaded {} hourly observations from {}",
        series.len(),
        observations_csv
    );

    analyze_series(&series, &params, fence, output_csv)
}
