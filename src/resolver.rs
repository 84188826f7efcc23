//! Temporal resolution of the weather observation applicable to a quote
//!
//! Without a target instant the most recent observation wins. With a target,
//! the nearest observation on each side is found, the closer one is preferred
//! (the later one on an exact tie), and nothing further than the tolerance
//! window from the target is ever used.

use chrono::{DateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::models::{Observation, STATION_TIME_ZONE};
use crate::{DeliveryFeeError, Result};

/// Maximum distance between a target instant and the observation answering it
pub const TOLERANCE_SECONDS: i64 = 86_400;

#[must_use]
pub fn tolerance() -> TimeDelta {
    TimeDelta::seconds(TOLERANCE_SECONDS)
}

/// Select the observation that applies to `target`, or the latest one when
/// no target is given.
pub fn resolve<'a>(
    observations: &'a [Observation],
    target: Option<DateTime<Tz>>,
) -> Result<&'a Observation> {
    if observations.is_empty() {
        return Err(DeliveryFeeError::NoObservations);
    }

    match target {
        None => latest(observations).ok_or(DeliveryFeeError::NoObservations),
        Some(target) => nearest(observations, target),
    }
}

/// Convert any instant into the civil zone used for all comparisons
#[must_use]
pub fn normalize<Z: TimeZone>(instant: &DateTime<Z>) -> DateTime<Tz> {
    instant.with_timezone(&STATION_TIME_ZONE)
}

/// Latest observation; the first one encountered wins a tie
fn latest(observations: &[Observation]) -> Option<&Observation> {
    observations.iter().reduce(|best, candidate| {
        if candidate.timestamp > best.timestamp {
            candidate
        } else {
            best
        }
    })
}

fn nearest(observations: &[Observation], target: DateTime<Tz>) -> Result<&Observation> {
    let target = normalize(&target);

    // An observation taken exactly at the target counts as "before".
    let before = observations
        .iter()
        .filter(|o| o.timestamp <= target)
        .reduce(|best, o| if o.timestamp > best.timestamp { o } else { best });
    let after = observations
        .iter()
        .filter(|o| o.timestamp > target)
        .reduce(|best, o| if o.timestamp < best.timestamp { o } else { best });

    let distance = |o: &Observation| (o.timestamp - target).abs();
    let within = |o: &Observation| distance(o) <= tolerance();

    let chosen = match (before, after) {
        (Some(only), None) | (None, Some(only)) => Some(only).filter(|&o| within(o)),
        (Some(before), Some(after)) => {
            let (preferred, other) = if distance(after) <= distance(before) {
                (after, before)
            } else {
                (before, after)
            };
            [preferred, other].into_iter().find(|&o| within(o))
        }
        (None, None) => None,
    };

    chosen.ok_or(DeliveryFeeError::NoApplicableObservation { target })
}
