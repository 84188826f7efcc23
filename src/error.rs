//! Error types and handling for the delivery fee service

use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

use crate::models::{RuleFamily, VehicleKind};

/// Main error type for the delivery fee service
#[derive(Error, Debug)]
pub enum DeliveryFeeError {
    /// Station code outside the supported catalog
    #[error("Unknown station code: {code}")]
    UnknownStation { code: String },

    /// Vehicle name outside the supported catalog
    #[error("Unknown vehicle type: {name}")]
    UnknownVehicle { name: String },

    /// The station has no recorded observations at all
    #[error("No weather observations recorded for station")]
    NoObservations,

    /// No observation lies within the tolerance window of the target
    #[error("No weather observation within tolerance of {target}")]
    NoApplicableObservation { target: DateTime<Tz> },

    /// Weather makes the vehicle unusable
    #[error("Usage of {vehicle} is forbidden by the {rule} rule")]
    ForbiddenVehicleUsage {
        vehicle: VehicleKind,
        rule: RuleFamily,
    },

    /// Target instant lies after the evaluation time
    #[error("Target time {target} is in the future")]
    FutureTarget { target: DateTime<Tz> },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Observation store errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Weather feed fetch or parse errors
    #[error("Weather import error: {message}")]
    Ingestion { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DeliveryFeeError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new ingestion error
    pub fn ingestion<S: Into<String>>(message: S) -> Self {
        Self::Ingestion {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DeliveryFeeError::UnknownStation { .. } => "Cant find Station".to_string(),
            DeliveryFeeError::UnknownVehicle { name } => {
                format!("Unsupported vehicle type '{name}'. Use car, scooter or bike.")
            }
            DeliveryFeeError::NoObservations => "Did not find weather report!".to_string(),
            DeliveryFeeError::NoApplicableObservation { .. } => {
                "There is no weather data close enough to the chosen date".to_string()
            }
            DeliveryFeeError::ForbiddenVehicleUsage { .. } => {
                "Usage of selected vehicle type is forbidden".to_string()
            }
            DeliveryFeeError::FutureTarget { .. } => {
                "Please do not select a future date".to_string()
            }
            DeliveryFeeError::Validation { message } => format!("Invalid input: {message}"),
            DeliveryFeeError::Config { .. }
            | DeliveryFeeError::Storage { .. }
            | DeliveryFeeError::Ingestion { .. }
            | DeliveryFeeError::Io { .. } => "Encountered an Error. Please try again.".to_string(),
        }
    }

    /// Whether the caller can fix the request and retry
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DeliveryFeeError::UnknownStation { .. }
                | DeliveryFeeError::UnknownVehicle { .. }
                | DeliveryFeeError::FutureTarget { .. }
                | DeliveryFeeError::Validation { .. }
        )
    }
}
