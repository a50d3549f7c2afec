use sdt_meteo::observation::SeriesError;
use std::fmt;

/// Errors from the drift transport calculations. There is nothing
/// transient to retry in a pure computation; every variant is a caller
/// input defect.
#[derive(Debug, PartialEq, Clone)]
pub enum DriftError {
    InvalidInput(String),
}

impl fmt::Display for DriftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftError::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl std::error::Error for DriftError {}

impl From<SeriesError> for DriftError {
    fn from(value: SeriesError) -> Self {
        let message = match value {
            SeriesError::NonChronological => "timestamps must be strictly increasing",
            SeriesError::NegativePrecipitation => "precipitation must be non-negative",
            SeriesError::NegativeWindSpeed => "wind speed must be non-negative",
        };
        DriftError::InvalidInput(message.to_string())
    }
}
