//! Snow fence sizing from a seasonal transport estimate.

use crate::error::DriftError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const KG_PER_TONNE: f64 = 1000.0;

/// Exponent of the Tabler fence storage relation H = (Q / factor)^(1/2.2).
const HEIGHT_EXPONENT: f64 = 1.0 / 2.2;

/// Supported snow fence designs, each with a fixed storage-capacity
/// factor (tonnes/m stored per m^2.2 of height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FenceType {
    Wyoming,
    SlatAndWire,
    Solid,
}

impl FenceType {
    pub fn storage_factor(&self) -> f64 {
        match self {
            FenceType::Wyoming => 8.5,
            FenceType::SlatAndWire => 7.7,
            FenceType::Solid => 2.9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FenceType::Wyoming => "Wyoming",
            FenceType::SlatAndWire => "Slat-and-wire",
            FenceType::Solid => "Solid",
        }
    }
}

impl fmt::Display for FenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FenceType {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wyoming" => Ok(FenceType::Wyoming),
            "slat-and-wire" => Ok(FenceType::SlatAndWire),
            "solid" => Ok(FenceType::Solid),
            other => Err(DriftError::InvalidInput(format!(
                "unknown fence type: {other} (expected wyoming, slat-and-wire, or solid)"
            ))),
        }
    }
}

/// Required fence height in meters to store a seasonal transport of
/// `qt_kg_per_m`. Zero transport needs a zero fence; negative transport
/// is a caller error rather than a NaN.
pub fn required_fence_height(qt_kg_per_m: f64, fence_type: FenceType) -> Result<f64, DriftError> {
    if qt_kg_per_m < 0.0 {
        return Err(DriftError::InvalidInput(format!(
            "snow transport must be non-negative, got {qt_kg_per_m}"
        )));
    }
    let qt_tonnes = qt_kg_per_m / KG_PER_TONNE;
    Ok((qt_tonnes / fence_type.storage_factor()).powf(HEIGHT_EXPONENT))
}
