//! Domain models for the delivery fee service
//!
//! This module contains the core domain models organized by concern:
//! - Station: supported pickup cities and their weather stations
//! - Vehicle: courier vehicle kinds and their weather sensitivities
//! - Observation: time-stamped weather readings
//! - Fee: exact fixed-point fee amounts

pub mod fee;
pub mod observation;
pub mod station;
pub mod vehicle;

// Re-export all public types for convenient access
pub use fee::Fee;
pub use observation::Observation;
pub use station::{STATION_TIME_ZONE, Station};
pub use vehicle::{RuleFamily, VehicleKind};
