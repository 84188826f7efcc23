//! Weather observation ingestion
//!
//! Observations are imported from the Estonian Environment Agency feed once
//! at startup and then every hour at a fixed minute, and appended to the
//! observation store. Only stations in the supported catalog are kept.

pub mod client;
pub mod feed;
pub mod import;

pub use client::{FeedSource, WeatherFeedClient};
pub use feed::parse_feed;
pub use import::{WeatherImporter, next_import_at};
