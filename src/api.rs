//! HTTP API for delivery fee quotes
//!
//! Exposes the quote service under `/api`: a fee lookup per station and
//! vehicle, optionally at a past instant, and the station catalog.

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, instrument, warn};

use crate::models::{Fee, STATION_TIME_ZONE, Station, VehicleKind};
use crate::quote::{QuoteService, ensure_not_future};
use crate::resolver::normalize;
use crate::{DeliveryFeeError, Result};

/// Local date-time layouts accepted for the `date` parameter
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Deserialize)]
pub struct DeliveryFeeQuery {
    pub station: String,
    pub vehicle: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiQuote {
    pub station: u32,
    pub vehicle: VehicleKind,
    pub fee: Fee,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct ApiBaseFee {
    pub vehicle: VehicleKind,
    pub fee: Fee,
}

#[derive(Debug, Serialize)]
pub struct ApiStation {
    pub code: u32,
    pub name: String,
    pub city: String,
    pub base_fees: Vec<ApiBaseFee>,
}

/// Error response carrying the user-facing message
pub struct ApiError(DeliveryFeeError);

impl From<DeliveryFeeError> for ApiError {
    fn from(err: DeliveryFeeError) -> Self {
        Self(err)
    }
}

/// HTTP status for each error kind
#[must_use]
pub fn status_for(err: &DeliveryFeeError) -> StatusCode {
    match err {
        _ if err.is_client_error() => StatusCode::BAD_REQUEST,
        DeliveryFeeError::NoObservations | DeliveryFeeError::NoApplicableObservation { .. } => {
            StatusCode::NOT_FOUND
        }
        DeliveryFeeError::ForbiddenVehicleUsage { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!("Quote request failed: {}", self.0);
        } else {
            warn!("Quote request rejected: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

/// Parse the `date` parameter.
///
/// Accepts RFC 3339 with an offset, or a local date-time (seconds optional)
/// interpreted in the stations' time zone. Ambiguous local times resolve to
/// the earlier instant; local times skipped by a DST change are rejected.
pub fn parse_target(raw: &str) -> Result<DateTime<Tz>> {
    let raw = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(normalize(&instant));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| DeliveryFeeError::validation(format!("Unrecognized date '{raw}'")))?;

    STATION_TIME_ZONE
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| {
            DeliveryFeeError::validation(format!("Local time '{raw}' does not exist"))
        })
}

#[instrument(name = "get_delivery_fee", skip(service))]
async fn get_delivery_fee(
    State(service): State<QuoteService>,
    query: std::result::Result<Query<DeliveryFeeQuery>, QueryRejection>,
) -> std::result::Result<Json<ApiQuote>, ApiError> {
    let Query(query) =
        query.map_err(|rejection| DeliveryFeeError::validation(rejection.body_text()))?;
    let station: Station = query.station.parse()?;
    let vehicle: VehicleKind = query.vehicle.parse()?;

    let target = match query.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            let target = parse_target(raw)?;
            ensure_not_future(&target, &Utc::now())?;
            Some(target)
        }
        _ => None,
    };

    let fee = service.quote(station.wmo_code(), vehicle, target).await?;
    Ok(Json(ApiQuote {
        station: station.wmo_code(),
        vehicle,
        fee,
        display: fee.display_with_currency(),
    }))
}

async fn get_stations(State(service): State<QuoteService>) -> Json<Vec<ApiStation>> {
    let entries = service.schedule().entries();
    let stations = Station::ALL
        .into_iter()
        .map(|station| ApiStation {
            code: station.wmo_code(),
            name: station.feed_name().to_string(),
            city: station.city().to_string(),
            base_fees: entries
                .iter()
                .filter(|entry| entry.station == station)
                .map(|entry| ApiBaseFee {
                    vehicle: entry.vehicle,
                    fee: entry.fee,
                })
                .collect(),
        })
        .collect();
    Json(stations)
}

pub fn router(service: QuoteService) -> Router {
    Router::new()
        .route("/delivery-fee", get(get_delivery_fee))
        .route("/stations", get(get_stations))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rstest::rstest;

    #[rstest]
    #[case("2023-06-16T14:09", 14, 9, 0)]
    #[case("2023-06-16T14:09:30", 14, 9, 30)]
    #[case(" 2023-06-16T14:09:30.250 ", 14, 9, 30)]
    fn test_parse_local_target(
        #[case] raw: &str,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] second: u32,
    ) {
        let target = parse_target(raw).unwrap();
        assert_eq!(target.timezone(), STATION_TIME_ZONE);
        assert_eq!(
            (target.hour(), target.minute(), target.second()),
            (hour, minute, second)
        );
    }

    #[test]
    fn test_parse_rfc3339_target_is_normalized() {
        let target = parse_target("2023-06-16T11:09:00Z").unwrap();
        assert_eq!(target.timezone(), STATION_TIME_ZONE);
        // Tallinn is UTC+3 in summer
        assert_eq!(target.hour(), 14);
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2023-06-16")]
    #[case("2023-13-01T10:00")]
    fn test_parse_invalid_target(#[case] raw: &str) {
        assert!(matches!(
            parse_target(raw),
            Err(DeliveryFeeError::Validation { .. })
        ));
    }

    #[test]
    fn test_parse_target_in_dst_gap() {
        // Clocks jump from 03:00 to 04:00 on the last Sunday of March
        assert!(matches!(
            parse_target("2023-03-26T03:30"),
            Err(DeliveryFeeError::Validation { .. })
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&DeliveryFeeError::UnknownStation { code: "1".into() }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DeliveryFeeError::NoObservations),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DeliveryFeeError::ForbiddenVehicleUsage {
                vehicle: VehicleKind::Bike,
                rule: crate::models::RuleFamily::Phenomenon,
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&DeliveryFeeError::storage("broken")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[rstest]
    #[case(DeliveryFeeError::UnknownVehicle { name: "truck".into() })]
    #[case(DeliveryFeeError::validation("bad date"))]
    #[case(DeliveryFeeError::FutureTarget { target: parse_target("2999-01-01T00:00").unwrap() })]
    #[case(DeliveryFeeError::NoObservations)]
    #[case(DeliveryFeeError::ingestion("timeout"))]
    fn test_bad_request_iff_client_error(#[case] err: DeliveryFeeError) {
        assert_eq!(
            status_for(&err) == StatusCode::BAD_REQUEST,
            err.is_client_error()
        );
    }

    #[test]
    fn test_fee_payload_uses_decimal_value() {
        let fee = Fee::from_tenths(45);
        assert_eq!(fee.as_f64(), 4.5);
        assert_eq!(fee.display_with_currency(), "4.5 €");
    }
}
