use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use delivery_fee::config::{DeliveryFeeConfig, StorageBackend};
use delivery_fee::telemetry::init_tracing;
use delivery_fee::{
    FeeSchedule, FjallStore, MemoryStore, ObservationStore, QuoteService, VERSION,
    WeatherFeedClient, WeatherImporter, web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, load_error) = match DeliveryFeeConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (DeliveryFeeConfig::default(), Some(e)),
    };

    init_tracing(&config.logging);
    if let Some(e) = load_error {
        error!("Failed to load config: {:#}. Using defaults.", e);
    }
    info!("Starting delivery fee service v{}", VERSION);

    let store: Arc<dyn ObservationStore> = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory observation store");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::Fjall => Arc::new(
            FjallStore::open(config.storage_path())
                .context("Failed to open observation store")?,
        ),
    };

    let feed = WeatherFeedClient::new(&config.weather).context("Failed to build feed client")?;
    let importer = WeatherImporter::new(
        Arc::new(feed),
        store.clone(),
        config.weather.import_minute,
        config.weather.import_on_startup,
    );
    tokio::spawn(importer.run());

    let service = QuoteService::new(store, Arc::new(FeeSchedule::standard()));
    web::run(&config.server, service)
        .await
        .context("Web server failed")?;

    Ok(())
}
