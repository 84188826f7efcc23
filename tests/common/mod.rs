//! Shared fixtures for integration tests

use std::sync::Arc;

use chrono::TimeZone;
use delivery_fee::{FeeSchedule, MemoryStore, Observation, QuoteService, STATION_TIME_ZONE, Station};

/// Observation at a Tallinn local wall-clock time in 2023
pub fn tallinn_at(
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    air_temperature: f64,
    wind_speed: f64,
    phenomenon: &str,
) -> Observation {
    let timestamp = STATION_TIME_ZONE
        .with_ymd_and_hms(2023, month, day, hour, minute, 0)
        .unwrap();
    Observation::new(Station::Tallinn, air_temperature, wind_speed, phenomenon, timestamp)
}

/// Tallinn history spanning summer 2023
pub fn tallinn_history() -> Vec<Observation> {
    vec![
        tallinn_at(6, 15, 15, 15, 20.0, 2.0, "Rain"),
        tallinn_at(6, 30, 15, 15, -2.0, 2.0, "Snow"),
        tallinn_at(7, 15, 11, 15, 20.0, 2.0, "Thunder"),
        tallinn_at(7, 15, 12, 15, 20.0, 15.0, "Overcast"),
        tallinn_at(7, 30, 15, 15, -2.0, 2.0, "Overcast"),
        tallinn_at(8, 15, 15, 15, -15.0, 2.0, "Overcast"),
    ]
}

pub fn service_with(observations: Vec<Observation>) -> QuoteService {
    QuoteService::new(
        Arc::new(MemoryStore::with_observations(observations)),
        Arc::new(FeeSchedule::standard()),
    )
}
