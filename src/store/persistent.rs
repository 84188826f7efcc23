use std::path::Path;

use async_trait::async_trait;
use fjall::Keyspace;
use tokio::sync::Mutex;
use tokio::task;

use super::{ObservationStore, StoredObservation};
use crate::models::Observation;
use crate::{DeliveryFeeError, Result};

const KEYSPACE: &str = "observations";

/// Observation store persisted in a fjall keyspace.
///
/// Every observation is its own postcard-encoded record under
/// `observations:<code>:<epoch>:<seq>`, so an append is a single insert and a
/// station's snapshot is one prefix scan.
pub struct FjallStore {
    store: Keyspace,
    write_lock: Mutex<()>,
}

fn station_prefix(wmo_code: u32) -> Vec<u8> {
    format!("{KEYSPACE}:{wmo_code}:").into_bytes()
}

// Epoch is sign-flipped big-endian so keys sort chronologically.
fn instant_prefix(wmo_code: u32, epoch_seconds: i64) -> Vec<u8> {
    let mut key = station_prefix(wmo_code);
    key.extend_from_slice(&((epoch_seconds as u64) ^ (1 << 63)).to_be_bytes());
    key.push(b':');
    key
}

fn storage_error(err: impl std::fmt::Display) -> DeliveryFeeError {
    DeliveryFeeError::storage(err.to_string())
}

fn read_records(store: &Keyspace, prefix: &[u8]) -> Result<Vec<StoredObservation>> {
    store
        .prefix(prefix)
        .map(|guard| {
            let bytes = guard.value().map_err(storage_error)?;
            postcard::from_bytes(&bytes).map_err(storage_error)
        })
        .collect()
}

impl FjallStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = fjall::Database::builder(path)
            .open()
            .map_err(storage_error)?;
        let store = db
            .keyspace(KEYSPACE, fjall::KeyspaceCreateOptions::default)
            .map_err(storage_error)?;
        tracing::info!("Opened observation store at {}", path.display());
        Ok(Self {
            store,
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl ObservationStore for FjallStore {
    #[tracing::instrument(name = "list_observations", level = "debug", skip(self))]
    async fn list_observations(&self, wmo_code: u32) -> Result<Vec<Observation>> {
        let store = self.store.clone();
        let prefix = station_prefix(wmo_code);

        let records = task::spawn_blocking(move || read_records(&store, &prefix))
            .await
            .map_err(storage_error)??;
        tracing::debug!("Loaded {} observations", records.len());

        records
            .into_iter()
            .map(StoredObservation::into_observation)
            .collect()
    }

    #[tracing::instrument(name = "append_observation", level = "debug", skip(self, observation), fields(wmo_code = observation.wmo_code))]
    async fn append(&self, observation: Observation) -> Result<()> {
        let store = self.store.clone();
        let record = StoredObservation::from(&observation);
        let prefix = instant_prefix(record.wmo_code, record.timestamp);

        // Duplicates at the same instant get the next sequence number.
        let _guard = self.write_lock.lock().await;
        task::spawn_blocking(move || {
            let seq = store.prefix(&prefix).count() as u32;
            let mut key = prefix;
            key.extend_from_slice(&seq.to_be_bytes());
            let bytes = postcard::to_stdvec(&record).map_err(storage_error)?;
            store.insert(key, bytes).map_err(storage_error)
        })
        .await
        .map_err(storage_error)??;

        Ok(())
    }
}
