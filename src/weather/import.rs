//! Periodic weather import

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use tracing::{debug, info, instrument, warn};

use super::client::FeedSource;
use super::feed::parse_feed;
use crate::Result;
use crate::store::ObservationStore;

/// Next instant at `minute` past the hour strictly after `now`
#[must_use]
pub fn next_import_at(now: DateTime<Utc>, minute: u32) -> DateTime<Utc> {
    let this_hour = now
        .with_minute(minute)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0));

    match this_hour {
        Some(slot) if slot > now => slot,
        Some(slot) => slot + TimeDelta::hours(1),
        None => now + TimeDelta::hours(1),
    }
}

pub struct WeatherImporter {
    source: Arc<dyn FeedSource>,
    store: Arc<dyn ObservationStore>,
    import_minute: u32,
    import_on_startup: bool,
}

impl WeatherImporter {
    pub fn new(
        source: Arc<dyn FeedSource>,
        store: Arc<dyn ObservationStore>,
        import_minute: u32,
        import_on_startup: bool,
    ) -> Self {
        Self {
            source,
            store,
            import_minute,
            import_on_startup,
        }
    }

    /// Fetch the feed once and append every supported station's observation.
    /// Returns the number of observations stored.
    #[instrument(name = "import_weather", skip(self))]
    pub async fn import_once(&self) -> Result<usize> {
        let xml = self.source.fetch().await?;
        let observations = parse_feed(&xml)?;

        let mut stored = 0;
        for observation in observations {
            debug!(
                "Storing observation for {} at {}: {}, {}, '{}'",
                observation.station_name,
                observation.timestamp,
                observation.format_temperature(),
                observation.format_wind(),
                observation.phenomenon
            );
            self.store.append(observation).await?;
            stored += 1;
        }

        info!("Imported weather data for {} stations", stored);
        Ok(stored)
    }

    /// Import on startup (if enabled), then every hour at the configured minute.
    /// Failed imports are logged and retried at the next slot.
    pub async fn run(self) {
        if self.import_on_startup {
            self.import_logged().await;
        }

        loop {
            let now = Utc::now();
            let next = next_import_at(now, self.import_minute);
            debug!("Next weather import at {}", next);
            tokio::time::sleep((next - now).to_std().unwrap_or_default()).await;
            self.import_logged().await;
        }
    }

    async fn import_logged(&self) {
        if let Err(e) = self.import_once().await {
            warn!("Weather info was not imported: {}", e);
        }
    }
}
