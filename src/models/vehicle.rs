//! Courier vehicle kinds and the weather rules they are sensitive to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DeliveryFeeError;

/// A family of weather rules that may add a surcharge or forbid a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    AirTemperature,
    Phenomenon,
    WindSpeed,
}

impl RuleFamily {
    /// Evaluation order. A phenomenon prohibition is reported before a wind one.
    pub const ORDER: [RuleFamily; 3] = [
        RuleFamily::AirTemperature,
        RuleFamily::Phenomenon,
        RuleFamily::WindSpeed,
    ];
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleFamily::AirTemperature => "air temperature",
            RuleFamily::Phenomenon => "weather phenomenon",
            RuleFamily::WindSpeed => "wind speed",
        };
        f.write_str(name)
    }
}

/// Delivery vehicle kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Car,
    Scooter,
    Bike,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Car, VehicleKind::Scooter, VehicleKind::Bike];

    /// Weather rule families this vehicle is sensitive to
    #[must_use]
    pub const fn sensitivities(self) -> &'static [RuleFamily] {
        match self {
            VehicleKind::Car => &[],
            VehicleKind::Scooter => &[RuleFamily::AirTemperature, RuleFamily::Phenomenon],
            VehicleKind::Bike => &[
                RuleFamily::AirTemperature,
                RuleFamily::Phenomenon,
                RuleFamily::WindSpeed,
            ],
        }
    }

    #[must_use]
    pub fn is_sensitive_to(self, rule: RuleFamily) -> bool {
        self.sensitivities().contains(&rule)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Scooter => "scooter",
            VehicleKind::Bike => "bike",
        }
    }
}

impl FromStr for VehicleKind {
    type Err = DeliveryFeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DeliveryFeeError::UnknownVehicle {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
