//! Supported pickup cities and the weather stations observing them

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::DeliveryFeeError;

/// Civil time zone shared by every supported station
pub const STATION_TIME_ZONE: Tz = chrono_tz::Europe::Tallinn;

/// A pickup city, identified externally by the WMO code of its weather station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Station {
    Tallinn,
    Tartu,
    Parnu,
}

impl Station {
    pub const ALL: [Station; 3] = [Station::Tallinn, Station::Tartu, Station::Parnu];

    /// WMO code of the weather station closest to the city
    #[must_use]
    pub const fn wmo_code(self) -> u32 {
        match self {
            Station::Tallinn => 26038,
            Station::Tartu => 26242,
            Station::Parnu => 41803,
        }
    }

    /// Station name as it appears in the observations feed
    #[must_use]
    pub const fn feed_name(self) -> &'static str {
        match self {
            Station::Tallinn => "Tallinn-Harku",
            Station::Tartu => "Tartu-Tõravere",
            Station::Parnu => "Pärnu",
        }
    }

    #[must_use]
    pub const fn city(self) -> &'static str {
        match self {
            Station::Tallinn => "Tallinn",
            Station::Tartu => "Tartu",
            Station::Parnu => "Pärnu",
        }
    }

    #[must_use]
    pub const fn time_zone(self) -> Tz {
        STATION_TIME_ZONE
    }

    /// Look up a station by WMO code. Unknown codes are an error, never a default.
    pub fn from_wmo_code(code: u32) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|station| station.wmo_code() == code)
            .ok_or_else(|| DeliveryFeeError::UnknownStation {
                code: code.to_string(),
            })
    }

    #[must_use]
    pub fn from_feed_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|station| station.feed_name() == name)
    }
}

impl FromStr for Station {
    type Err = DeliveryFeeError;

    /// Parses the textual WMO code, e.g. `"26038"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s
            .trim()
            .parse::<u32>()
            .map_err(|_| DeliveryFeeError::UnknownStation {
                code: s.to_string(),
            })?;
        Self::from_wmo_code(code)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.city(), self.wmo_code())
    }
}
