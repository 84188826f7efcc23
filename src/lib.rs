//! `delivery-fee` - Weather-aware courier delivery fee calculation
//!
//! This library provides the core functionality for resolving the weather
//! observation that applies to a delivery, pricing it per city and vehicle,
//! importing observations from the national weather feed and serving quotes
//! over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod fees;
pub mod models;
pub mod quote;
pub mod resolver;
pub mod store;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::DeliveryFeeConfig;
pub use error::DeliveryFeeError;
pub use fees::{Assessment, FeeSchedule};
pub use models::{Fee, Observation, RuleFamily, STATION_TIME_ZONE, Station, VehicleKind};
pub use quote::{QuoteService, quote_from_snapshot};
pub use store::{FjallStore, MemoryStore, ObservationStore};
pub use weather::{FeedSource, WeatherFeedClient, WeatherImporter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DeliveryFeeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
