use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ObservationStore;
use crate::Result;
use crate::models::Observation;

/// Volatile store, used in tests and when no persistent backend is configured
#[derive(Debug, Default)]
pub struct MemoryStore {
    observations: RwLock<HashMap<u32, Vec<Observation>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_observations(observations: impl IntoIterator<Item = Observation>) -> Self {
        let mut by_station: HashMap<u32, Vec<Observation>> = HashMap::new();
        for observation in observations {
            by_station
                .entry(observation.wmo_code)
                .or_default()
                .push(observation);
        }
        Self {
            observations: RwLock::new(by_station),
        }
    }
}

#[async_trait]
impl ObservationStore for MemoryStore {
    async fn list_observations(&self, wmo_code: u32) -> Result<Vec<Observation>> {
        let observations = self.observations.read().await;
        Ok(observations.get(&wmo_code).cloned().unwrap_or_default())
    }

    async fn append(&self, observation: Observation) -> Result<()> {
        self.observations
            .write()
            .await
            .entry(observation.wmo_code)
            .or_default()
            .push(observation);
        Ok(())
    }
}
