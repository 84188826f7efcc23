//! Delivery fee evaluation
//!
//! A fee is the regional base fee for the (station, vehicle) pair plus the
//! weather surcharges of every rule family the vehicle is sensitive to.
//! Rule families are checked in [`RuleFamily::ORDER`]; the first forbidding
//! rule aborts the evaluation and no partial fee is returned.

use crate::models::{Fee, Observation, RuleFamily, Station, VehicleKind};
use crate::{DeliveryFeeError, Result};

const STATIONS: usize = Station::ALL.len();
const VEHICLES: usize = VehicleKind::ALL.len();

/// Air temperature below which the higher surcharge applies (°C)
pub const SEVERE_COLD_CELSIUS: f64 = -10.0;
/// Air temperature at or below which the lower surcharge applies (°C)
pub const FREEZING_CELSIUS: f64 = 0.0;
/// Wind speed from which a surcharge applies (m/s)
pub const STRONG_WIND_MS: f64 = 10.0;
/// Wind speed above which wind-sensitive vehicles are forbidden (m/s)
pub const MAX_WIND_MS: f64 = 20.0;

const HALF_UNIT: Fee = Fee::from_tenths(5);
const ONE_UNIT: Fee = Fee::from_tenths(10);

const RAIN_KEYWORDS: &[&str] = &["rain"];
const SNOW_KEYWORDS: &[&str] = &["snow", "sleet"];
const FORBIDDING_KEYWORDS: &[&str] = &["glaze", "hail", "thunder"];

/// Outcome of one rule family for one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Surcharge(Fee),
    Forbidden,
}

/// Regional base fees, total over every station and vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    base: [[Fee; VEHICLES]; STATIONS],
}

/// One row of the schedule, as listed by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFeeEntry {
    pub station: Station,
    pub vehicle: VehicleKind,
    pub fee: Fee,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl FeeSchedule {
    /// Regional base fees for Tallinn, Tartu and Pärnu
    #[must_use]
    pub const fn standard() -> Self {
        const fn row(car: u32, scooter: u32, bike: u32) -> [Fee; VEHICLES] {
            [
                Fee::from_tenths(car),
                Fee::from_tenths(scooter),
                Fee::from_tenths(bike),
            ]
        }

        Self {
            base: [row(40, 35, 30), row(35, 30, 25), row(30, 25, 20)],
        }
    }

    /// Build a schedule from explicit entries. Every station and vehicle
    /// combination must be present exactly once.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Station, VehicleKind, Fee)>,
    ) -> Result<Self> {
        let mut grid: [[Option<Fee>; VEHICLES]; STATIONS] = [[None; VEHICLES]; STATIONS];

        for (station, vehicle, fee) in entries {
            let cell = &mut grid[station_index(station)][vehicle_index(vehicle)];
            if cell.is_some() {
                return Err(DeliveryFeeError::config(format!(
                    "Duplicate base fee for {station} / {vehicle}"
                )));
            }
            *cell = Some(fee);
        }

        let mut base = [[Fee::ZERO; VEHICLES]; STATIONS];
        for station in Station::ALL {
            for vehicle in VehicleKind::ALL {
                base[station_index(station)][vehicle_index(vehicle)] = grid
                    [station_index(station)][vehicle_index(vehicle)]
                .ok_or_else(|| {
                    DeliveryFeeError::config(format!(
                        "Missing base fee for {station} / {vehicle}"
                    ))
                })?;
            }
        }

        Ok(Self { base })
    }

    #[must_use]
    pub fn base_fee(&self, station: Station, vehicle: VehicleKind) -> Fee {
        self.base[station_index(station)][vehicle_index(vehicle)]
    }

    #[must_use]
    pub fn entries(&self) -> Vec<BaseFeeEntry> {
        Station::ALL
            .into_iter()
            .flat_map(|station| {
                VehicleKind::ALL.into_iter().map(move |vehicle| BaseFeeEntry {
                    station,
                    vehicle,
                    fee: self.base_fee(station, vehicle),
                })
            })
            .collect()
    }

    /// Total fee for delivering from `station` with `vehicle` in the weather
    /// described by `observation`.
    pub fn evaluate(
        &self,
        station: Station,
        vehicle: VehicleKind,
        observation: &Observation,
    ) -> Result<Fee> {
        let surcharges = RuleFamily::ORDER
            .into_iter()
            .filter(|&rule| vehicle.is_sensitive_to(rule))
            .map(|rule| match assess(rule, observation) {
                Assessment::Surcharge(extra) => Ok(extra),
                Assessment::Forbidden => {
                    Err(DeliveryFeeError::ForbiddenVehicleUsage { vehicle, rule })
                }
            })
            .sum::<Result<Fee>>()?;

        Ok(self.base_fee(station, vehicle) + surcharges)
    }
}

fn station_index(station: Station) -> usize {
    station as usize
}

fn vehicle_index(vehicle: VehicleKind) -> usize {
    vehicle as usize
}

/// Apply a single rule family to an observation
#[must_use]
pub fn assess(rule: RuleFamily, observation: &Observation) -> Assessment {
    match rule {
        RuleFamily::AirTemperature => assess_air_temperature(observation.air_temperature),
        RuleFamily::Phenomenon => assess_phenomenon(&observation.phenomenon),
        RuleFamily::WindSpeed => assess_wind_speed(observation.wind_speed),
    }
}

fn assess_air_temperature(celsius: f64) -> Assessment {
    if celsius < SEVERE_COLD_CELSIUS {
        Assessment::Surcharge(ONE_UNIT)
    } else if celsius <= FREEZING_CELSIUS {
        Assessment::Surcharge(HALF_UNIT)
    } else {
        Assessment::Surcharge(Fee::ZERO)
    }
}

// Keyword groups are checked in order; the first matching group decides.
fn assess_phenomenon(phenomenon: &str) -> Assessment {
    let phenomenon = phenomenon.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| phenomenon.contains(k));

    if mentions(RAIN_KEYWORDS) {
        Assessment::Surcharge(HALF_UNIT)
    } else if mentions(SNOW_KEYWORDS) {
        Assessment::Surcharge(ONE_UNIT)
    } else if mentions(FORBIDDING_KEYWORDS) {
        Assessment::Forbidden
    } else {
        Assessment::Surcharge(Fee::ZERO)
    }
}

fn assess_wind_speed(speed_ms: f64) -> Assessment {
    if speed_ms > MAX_WIND_MS {
        Assessment::Forbidden
    } else if speed_ms >= STRONG_WIND_MS {
        Assessment::Surcharge(HALF_UNIT)
    } else {
        Assessment::Surcharge(Fee::ZERO)
    }
}
