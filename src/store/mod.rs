//! Observation storage
//!
//! The quote service only ever reads a full snapshot of one station's
//! observations; the weather importer only ever appends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::models::{Observation, Station};

pub mod memory;
pub mod persistent;

pub use memory::MemoryStore;
pub use persistent::FjallStore;

#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// All observations recorded for a station, in no particular order
    async fn list_observations(&self, wmo_code: u32) -> Result<Vec<Observation>>;

    async fn append(&self, observation: Observation) -> Result<()>;
}

/// Serialized form of an observation; the timestamp is kept as Unix seconds
/// and re-attached to the station zone when read back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct StoredObservation {
    pub station_name: String,
    pub wmo_code: u32,
    pub air_temperature: f64,
    pub wind_speed: f64,
    pub phenomenon: String,
    pub timestamp: i64,
}

impl From<&Observation> for StoredObservation {
    fn from(observation: &Observation) -> Self {
        Self {
            station_name: observation.station_name.clone(),
            wmo_code: observation.wmo_code,
            air_temperature: observation.air_temperature,
            wind_speed: observation.wind_speed,
            phenomenon: observation.phenomenon.clone(),
            timestamp: observation.timestamp.timestamp(),
        }
    }
}

impl StoredObservation {
    pub(crate) fn into_observation(self) -> Result<Observation> {
        let station = Station::from_wmo_code(self.wmo_code).map_err(|_| {
            crate::DeliveryFeeError::storage(format!(
                "Stored observation has unknown station code {}",
                self.wmo_code
            ))
        })?;
        let mut observation = Observation::from_epoch_seconds(
            station,
            self.air_temperature,
            self.wind_speed,
            self.phenomenon,
            self.timestamp,
        )?;
        observation.station_name = self.station_name;
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeliveryFeeError;

    #[test]
    fn test_stored_observation_keeps_every_field() {
        let observation =
            Observation::from_epoch_seconds(Station::Tartu, -2.5, 12.3, "Snow fall", 1_686_831_300)
                .unwrap();
        let stored = StoredObservation::from(&observation);
        assert_eq!(stored.timestamp, 1_686_831_300);
        assert_eq!(stored.into_observation().unwrap(), observation);
    }

    #[test]
    fn test_unknown_station_in_storage_is_a_storage_error() {
        let stored = StoredObservation {
            station_name: "Narva".into(),
            wmo_code: 26058,
            air_temperature: 1.0,
            wind_speed: 1.0,
            phenomenon: String::new(),
            timestamp: 0,
        };
        assert!(matches!(
            stored.into_observation(),
            Err(DeliveryFeeError::Storage { .. })
        ));
    }
}
