//! Tabler (1997/2003) snow drift transport model.
//!
//! Converts an hourly weather series into the seasonal snow transport
//! estimate the fence sizing is based on. The wind power law and its
//! divisor are the published calibration constants and are reproduced
//! exactly.

use crate::error::DriftError;
use crate::sector::{compute_sector_transport, SECTOR_COUNT};
use sdt_meteo::observation::HourlyObservation;
use serde::Serialize;
use std::fmt;

/// Exponent of the Tabler wind speed power law.
pub const WIND_SPEED_EXPONENT: f64 = 3.8;

/// Calibration divisor of the Tabler power law (kg/m per (m/s)^3.8 s).
pub const TRANSPORT_DIVISOR: f64 = 233_847.0;

/// Weight of one observation; the series is assumed hourly.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Precipitation at or above this temperature is rain, not driftable snow.
pub const RAIN_SNOW_THRESHOLD_CELSIUS: f64 = 1.0;

/// Base of the fetch-distance saturation term.
const FETCH_SATURATION_BASE: f64 = 0.14;

/// Tunable parameters of the transport model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TablerParams {
    /// Maximum transport distance T, meters
    pub transport_distance: f64,
    /// Fetch distance F, meters
    pub fetch_distance: f64,
    /// Relocation coefficient theta, in (0, 1]
    pub relocation_coeff: f64,
}

impl Default for TablerParams {
    fn default() -> Self {
        TablerParams {
            transport_distance: 3000.0,
            fetch_distance: 30000.0,
            relocation_coeff: 0.5,
        }
    }
}

impl TablerParams {
    pub fn validate(&self) -> Result<(), DriftError> {
        if !(self.transport_distance > 0.0) {
            return Err(DriftError::InvalidInput(format!(
                "transport distance must be > 0, got {}",
                self.transport_distance
            )));
        }
        if !(self.fetch_distance > 0.0) {
            return Err(DriftError::InvalidInput(format!(
                "fetch distance must be > 0, got {}",
                self.fetch_distance
            )));
        }
        if !(self.relocation_coeff > 0.0 && self.relocation_coeff <= 1.0) {
            return Err(DriftError::InvalidInput(format!(
                "relocation coefficient must be in (0, 1], got {}",
                self.relocation_coeff
            )));
        }
        Ok(())
    }
}

/// Which process bounds the transport estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Control {
    WindControlled,
    SnowfallControlled,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::WindControlled => write!(f, "wind controlled"),
            Control::SnowfallControlled => write!(f, "snowfall controlled"),
        }
    }
}

/// Transport estimate for one weather series (typically one season).
#[derive(Debug, Clone, Serialize)]
pub struct TransportResult {
    /// Potential wind-driven transport capacity, kg/m
    pub qupot: f64,
    /// Snowfall-limited transport capacity, kg/m
    pub qspot: f64,
    /// Relocatable snow water equivalent, mm
    pub srwe: f64,
    /// The binding transport estimate, kg/m
    pub qinf: f64,
    /// Final transport after fetch-distance attenuation, kg/m
    pub qt: f64,
    /// Which branch produced qinf
    pub control: Control,
    /// Total snow water equivalent over the period, mm
    pub total_swe: f64,
    /// Wind-only potential transport per 22.5-degree compass sector, kg/m
    pub sector_transport: [f64; SECTOR_COUNT],
}

/// Transport contribution of a single hour, kg/m.
pub fn hourly_transport(wind_speed: f64) -> f64 {
    wind_speed.powf(WIND_SPEED_EXPONENT) * SECONDS_PER_HOUR / TRANSPORT_DIVISOR
}

/// Compute the Tabler transport estimate for one contiguous hourly
/// series.
///
/// The series is weighted at exactly one hour per element; gaps
/// silently under-count transport. An empty series yields an all-zero,
/// wind-controlled result rather than an error.
pub fn compute_transport(
    series: &[HourlyObservation],
    params: &TablerParams,
) -> Result<TransportResult, DriftError> {
    params.validate()?;

    let mut qupot = 0.0;
    let mut total_swe = 0.0;
    for obs in series {
        if obs.wind_speed < 0.0 {
            return Err(DriftError::InvalidInput(format!(
                "wind speed must be non-negative, got {} at {}",
                obs.wind_speed, obs.timestamp
            )));
        }
        if obs.precipitation < 0.0 {
            return Err(DriftError::InvalidInput(format!(
                "precipitation must be non-negative, got {} at {}",
                obs.precipitation, obs.timestamp
            )));
        }
        qupot += hourly_transport(obs.wind_speed);
        if obs.temperature < RAIN_SNOW_THRESHOLD_CELSIUS {
            total_swe += obs.precipitation;
        }
    }

    let transport_distance = params.transport_distance;
    let qspot = 0.5 * transport_distance * total_swe;
    let srwe = params.relocation_coeff * total_swe;

    // Hard either/or branch, never a blend
    let (qinf, control) = if qupot > qspot {
        (0.5 * transport_distance * srwe, Control::SnowfallControlled)
    } else {
        (qupot, Control::WindControlled)
    };

    let fetch_ratio = params.fetch_distance / transport_distance;
    let qt = qinf * (1.0 - FETCH_SATURATION_BASE.powf(fetch_ratio));

    let sector_transport = compute_sector_transport(series)?;

    Ok(TransportResult {
        qupot,
        qspot,
        srwe,
        qinf,
        qt,
        control,
        total_swe,
        sector_transport,
    })
}
