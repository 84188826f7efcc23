//! Delivery fee quoting
//!
//! Glues the observation store to the pure core: one snapshot read, then
//! [`resolver::resolve`] and [`FeeSchedule::evaluate`].

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use tracing::{debug, instrument};

use crate::fees::FeeSchedule;
use crate::models::{Fee, Observation, Station, VehicleKind};
use crate::resolver;
use crate::store::ObservationStore;
use crate::{DeliveryFeeError, Result};

/// Fee for `vehicle` at `station`, computed from an already fetched snapshot
/// of the station's observations.
pub fn quote_from_snapshot(
    schedule: &FeeSchedule,
    station: Station,
    vehicle: VehicleKind,
    observations: &[Observation],
    target: Option<DateTime<Tz>>,
) -> Result<Fee> {
    let observation = resolver::resolve(observations, target)?;
    schedule.evaluate(station, vehicle, observation)
}

/// Reject targets later than `now`. Runs before the core is invoked.
pub fn ensure_not_future<Z: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Z>) -> Result<()> {
    if target > now {
        return Err(DeliveryFeeError::FutureTarget { target: *target });
    }
    Ok(())
}

#[derive(Clone)]
pub struct QuoteService {
    store: Arc<dyn ObservationStore>,
    schedule: Arc<FeeSchedule>,
}

impl QuoteService {
    pub fn new(store: Arc<dyn ObservationStore>, schedule: Arc<FeeSchedule>) -> Self {
        Self { store, schedule }
    }

    #[must_use]
    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Quote a delivery from the station with WMO code `wmo_code`.
    ///
    /// Without a target the latest observation is used; otherwise the one
    /// nearest to the target within the tolerance window.
    #[instrument(name = "quote", level = "debug", skip(self))]
    pub async fn quote(
        &self,
        wmo_code: u32,
        vehicle: VehicleKind,
        target: Option<DateTime<Tz>>,
    ) -> Result<Fee> {
        let station = Station::from_wmo_code(wmo_code)?;
        let observations = self.store.list_observations(wmo_code).await?;
        debug!(
            "Resolving against {} observations for {}",
            observations.len(),
            station
        );

        let fee = quote_from_snapshot(&self.schedule, station, vehicle, &observations, target)?;
        debug!("Quoted {} for {} from {}", fee, vehicle, station);
        Ok(fee)
    }
}
