//! Open-Meteo ERA5 archive client.
//!
//! Fetches hourly reanalysis weather for one location and date interval.
//! Wind speed is requested in m/s (`wind_speed_unit=ms`) since the drift
//! transport power law is calibrated for m/s at 10 m height.

use crate::observation::{HourlyObservation, TIMESTAMP_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::Deserialize;
use std::fmt;

/// Open-Meteo historical (ERA5) archive endpoint.
pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Hourly variables needed for drift transport analysis.
pub const HOURLY_VARS: &str = "temperature_2m,precipitation,wind_speed_10m,wind_direction_10m";

/// Errors that can occur when fetching or decoding an archive response.
#[derive(Debug)]
pub enum ArchiveError {
    HttpRequestError(String),
    BadStatus(u16),
    DecodeError(String),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::HttpRequestError(e) => write!(f, "archive request failed: {e}"),
            ArchiveError::BadStatus(code) => write!(f, "archive returned status {code}"),
            ArchiveError::DecodeError(e) => write!(f, "archive response decode failed: {e}"),
        }
    }
}

impl std::error::Error for ArchiveError {}

/// One location + closed date interval to fetch.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Deserialize)]
struct ArchiveResponse {
    hourly: HourlyBlock,
}

/// Columnar hourly block as returned by the archive API. Individual
/// values can be null where the reanalysis has no data.
#[derive(Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    precipitation: Vec<Option<f64>>,
    wind_speed_10m: Vec<Option<f64>>,
    wind_direction_10m: Vec<Option<f64>>,
}

/// Fetch the hourly weather series for a request.
///
/// Hours with any missing field are dropped (and counted in the log);
/// returned observations are in the API's chronological order.
pub async fn fetch_hourly_series(
    request: &ArchiveRequest,
) -> Result<Vec<HourlyObservation>, ArchiveError> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .map_err(|e| ArchiveError::HttpRequestError(e.to_string()))?;

    info!(
        "Fetching archive weather for ({:.4}, {:.4}) from {} to {}",
        request.latitude, request.longitude, request.start_date, request.end_date
    );

    let response = client
        .get(ARCHIVE_URL)
        .query(&[
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("start_date", request.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", request.end_date.format("%Y-%m-%d").to_string()),
            ("hourly", HOURLY_VARS.to_string()),
            ("wind_speed_unit", "ms".to_string()),
            ("timezone", "UTC".to_string()),
        ])
        .send()
        .await
        .map_err(|e| ArchiveError::HttpRequestError(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ArchiveError::BadStatus(response.status().as_u16()));
    }

    let body: ArchiveResponse = response
        .json()
        .await
        .map_err(|e| ArchiveError::DecodeError(e.to_string()))?;

    hourly_block_to_observations(body.hourly)
}

fn hourly_block_to_observations(
    hourly: HourlyBlock,
) -> Result<Vec<HourlyObservation>, ArchiveError> {
    let len = hourly.time.len();
    if hourly.temperature_2m.len() != len
        || hourly.precipitation.len() != len
        || hourly.wind_speed_10m.len() != len
        || hourly.wind_direction_10m.len() != len
    {
        return Err(ArchiveError::DecodeError(
            "hourly column lengths differ".to_string(),
        ));
    }

    let mut observations = Vec::with_capacity(len);
    let mut dropped = 0usize;
    for i in 0..len {
        let timestamp = parse_archive_timestamp(&hourly.time[i])?;
        let fields = (
            hourly.temperature_2m[i],
            hourly.precipitation[i],
            hourly.wind_speed_10m[i],
            hourly.wind_direction_10m[i],
        );
        match fields {
            (Some(temperature), Some(precipitation), Some(wind_speed), Some(wind_direction)) => {
                observations.push(HourlyObservation {
                    timestamp,
                    temperature,
                    precipitation,
                    wind_speed,
                    wind_direction,
                });
            }
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!("Dropped {dropped} hours with missing fields");
    }
    info!("Decoded {} hourly observations", observations.len());
    Ok(observations)
}

fn parse_archive_timestamp(raw: &str) -> Result<NaiveDateTime, ArchiveError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| ArchiveError::DecodeError(format!("bad timestamp: {raw}")))
}
