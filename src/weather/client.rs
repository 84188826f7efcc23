//! HTTP client for the observations feed

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::{debug, instrument};

use crate::config::WeatherConfig;
use crate::{DeliveryFeeError, Result};

/// Source of the raw observations document
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

/// Fetches the feed over HTTP, retrying transient failures with
/// exponential backoff.
pub struct WeatherFeedClient {
    client: ClientWithMiddleware,
    feed_url: String,
}

impl WeatherFeedClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(|e| DeliveryFeeError::config(format!("Failed to build HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            feed_url: config.feed_url.clone(),
        })
    }
}

#[async_trait]
impl FeedSource for WeatherFeedClient {
    #[instrument(name = "fetch_weather_feed", level = "debug", skip(self), fields(url = %self.feed_url))]
    async fn fetch(&self) -> Result<String> {
        debug!("Calling the weather feed");
        let response = self
            .client
            .get(&self.feed_url)
            .header(ACCEPT, "application/xml")
            .send()
            .await
            .map_err(|e| DeliveryFeeError::ingestion(format!("Weather feed request failed: {e}")))?;

        let response = response.error_for_status().map_err(|e| {
            DeliveryFeeError::ingestion(format!("Weather feed returned an error: {e}"))
        })?;

        response
            .text()
            .await
            .map_err(|e| DeliveryFeeError::ingestion(format!("Failed to read weather feed: {e}")))
    }
}
