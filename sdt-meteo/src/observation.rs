use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Timestamp format used in hourly observation CSV exports and in the
/// Open-Meteo archive responses: "2021-07-01T13:00"
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Expected number of columns in an hourly observation CSV row.
pub const CSV_ROW_LENGTH: usize = 5;

/// Errors that can occur when parsing hourly observations.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ObservationError {
    CsvReadError,
    CsvRowLengthError,
    TimestampParseError,
    FieldParseError,
}

/// Defects a weather series can carry that make it unusable for
/// transport analysis.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SeriesError {
    /// Timestamps not strictly increasing (gap-free ordering is not
    /// checked, only monotonicity and absence of duplicates).
    NonChronological,
    NegativePrecipitation,
    NegativeWindSpeed,
}

/// One hour of weather at a fixed location.
///
/// Wind speed is at 10 m height in m/s; wind direction follows the
/// meteorological convention (degrees the wind blows *from*).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyObservation {
    pub timestamp: NaiveDateTime,
    /// Air temperature at 2 m, degrees Celsius
    pub temperature: f64,
    /// Water equivalent of precipitation for the hour, mm
    pub precipitation: f64,
    /// Wind speed at 10 m, m/s
    pub wind_speed: f64,
    /// Wind direction, degrees
    pub wind_direction: f64,
}

impl HourlyObservation {
    /// Parse an hourly observation CSV export into observations.
    ///
    /// Expected columns: `timestamp,temperature,precipitation,wind_speed,wind_direction`
    /// with a header row and timestamps in [`TIMESTAMP_FORMAT`].
    pub fn parse_observation_csv(
        csv_body: &str,
    ) -> Result<Vec<HourlyObservation>, ObservationError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_body.as_bytes());
        let mut observations = Vec::new();
        for row in rdr.records() {
            let record = row.map_err(|_| ObservationError::CsvReadError)?;
            observations.push(record.try_into()?);
        }
        Ok(observations)
    }

    /// Check a series for the defects in [`SeriesError`].
    ///
    /// Timestamps must be strictly increasing; precipitation and wind
    /// speed must be non-negative. Wind direction is accepted as any
    /// real value (wrapped modulo 360 at use sites).
    pub fn validate_series(series: &[HourlyObservation]) -> Result<(), SeriesError> {
        for window in series.windows(2) {
            if window[1].timestamp <= window[0].timestamp {
                return Err(SeriesError::NonChronological);
            }
        }
        for obs in series {
            if obs.precipitation < 0.0 {
                return Err(SeriesError::NegativePrecipitation);
            }
            if obs.wind_speed < 0.0 {
                return Err(SeriesError::NegativeWindSpeed);
            }
        }
        Ok(())
    }
}

impl TryFrom<StringRecord> for HourlyObservation {
    type Error = ObservationError;

    fn try_from(value: StringRecord) -> Result<Self, Self::Error> {
        if value.len() != CSV_ROW_LENGTH {
            return Err(ObservationError::CsvRowLengthError);
        }
        let timestamp =
            NaiveDateTime::parse_from_str(value.get(0).unwrap().trim(), TIMESTAMP_FORMAT)
                .map_err(|_| ObservationError::TimestampParseError)?;
        let mut fields = [0.0f64; 4];
        for (i, field) in fields.iter_mut().enumerate() {
            *field = value
                .get(i + 1)
                .unwrap()
                .trim()
                .parse::<f64>()
                .map_err(|_| ObservationError::FieldParseError)?;
        }
        Ok(HourlyObservation {
            timestamp,
            temperature: fields[0],
            precipitation: fields[1],
            wind_speed: fields[2],
            wind_direction: fields[3],
        })
    }
}

impl PartialEq for HourlyObservation {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
    }
}

impl Eq for HourlyObservation {}

impl Ord for HourlyObservation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

impl PartialOrd for HourlyObservation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
