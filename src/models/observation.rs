//! Weather observation model

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use super::Station;
use crate::DeliveryFeeError;

/// One weather reading for one station at one instant
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Observation {
    /// Name of the weather station as reported by the feed
    pub station_name: String,
    /// WMO code of the weather station
    pub wmo_code: u32,
    /// Air temperature in Celsius
    pub air_temperature: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Free-text weather phenomenon, e.g. "Light snow shower"
    pub phenomenon: String,
    /// Time of the reading in the station's civil time zone
    pub timestamp: DateTime<Tz>,
}

impl Observation {
    /// Create an observation; the timestamp is normalized to the station zone.
    pub fn new<Z: TimeZone>(
        station: Station,
        air_temperature: f64,
        wind_speed: f64,
        phenomenon: impl Into<String>,
        timestamp: DateTime<Z>,
    ) -> Self {
        Self {
            station_name: station.feed_name().to_string(),
            wmo_code: station.wmo_code(),
            air_temperature,
            wind_speed,
            phenomenon: phenomenon.into(),
            timestamp: timestamp.with_timezone(&station.time_zone()),
        }
    }

    /// Create an observation from a Unix timestamp in seconds
    pub fn from_epoch_seconds(
        station: Station,
        air_temperature: f64,
        wind_speed: f64,
        phenomenon: impl Into<String>,
        epoch_seconds: i64,
    ) -> crate::Result<Self> {
        let timestamp = DateTime::from_timestamp(epoch_seconds, 0).ok_or_else(|| {
            DeliveryFeeError::validation(format!("Timestamp out of range: {epoch_seconds}"))
        })?;
        Ok(Self::new(
            station,
            air_temperature,
            wind_speed,
            phenomenon,
            timestamp,
        ))
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.air_temperature)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }
}
