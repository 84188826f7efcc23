//! Parsing of the observations XML feed

use quick_xml::de::from_str;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{Observation, Station};
use crate::{DeliveryFeeError, Result};

/// Root `<observations timestamp="...">` element
#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(rename = "@timestamp")]
    timestamp: String,
    #[serde(rename = "station", default)]
    stations: Vec<FeedStation>,
}

/// One `<station>` element; every field may be empty in the feed
#[derive(Debug, Deserialize)]
struct FeedStation {
    name: String,
    #[serde(default)]
    wmocode: Option<String>,
    #[serde(default)]
    phenomenon: Option<String>,
    #[serde(default)]
    airtemperature: Option<String>,
    #[serde(default)]
    windspeed: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_measurement(station: &str, field: &str, value: Option<&String>) -> Option<f64> {
    let Some(text) = non_empty(value) else {
        warn!("Station {} reported no {}", station, field);
        return None;
    };
    match text.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            warn!("Station {} reported invalid {}: {}", station, field, text);
            None
        }
    }
}

impl FeedStation {
    fn to_observation(&self, station: Station, epoch_seconds: i64) -> Option<Observation> {
        if let Some(code) = non_empty(self.wmocode.as_ref())
            && code != station.wmo_code().to_string()
        {
            warn!(
                "Station {} reported WMO code {}, expected {}",
                self.name,
                code,
                station.wmo_code()
            );
        }

        let air_temperature =
            parse_measurement(&self.name, "air temperature", self.airtemperature.as_ref())?;
        let wind_speed = parse_measurement(&self.name, "wind speed", self.windspeed.as_ref())?;
        let phenomenon = non_empty(self.phenomenon.as_ref()).unwrap_or_default();

        let mut observation = Observation::from_epoch_seconds(
            station,
            air_temperature,
            wind_speed,
            phenomenon,
            epoch_seconds,
        )
        .ok()?;
        observation.station_name = self.name.trim().to_string();
        Some(observation)
    }
}

/// Parse the feed and keep one observation per supported station
pub fn parse_feed(xml: &str) -> Result<Vec<Observation>> {
    let document: FeedDocument = from_str(xml)
        .map_err(|e| DeliveryFeeError::ingestion(format!("Failed to parse weather feed: {e}")))?;

    let epoch_seconds = document.timestamp.trim().parse::<i64>().map_err(|_| {
        DeliveryFeeError::ingestion(format!(
            "Invalid feed timestamp: {}",
            document.timestamp
        ))
    })?;

    let observations: Vec<Observation> = document
        .stations
        .iter()
        .filter_map(|feed_station| {
            let station = Station::from_feed_name(&feed_station.name)?;
            feed_station.to_observation(station, epoch_seconds)
        })
        .collect();

    debug!(
        "Parsed {} of {} stations from weather feed",
        observations.len(),
        document.stations.len()
    );
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<observations timestamp="1693131973">
  <station>
    <name>Kuressaare linn</name>
    <wmocode></wmocode>
    <longitude>22.48944444411111</longitude>
    <latitude>58.26416666666667</latitude>
    <phenomenon></phenomenon>
    <airtemperature>15.2</airtemperature>
    <windspeed></windspeed>
  </station>
  <station>
    <name>Tallinn-Harku</name>
    <wmocode>26038</wmocode>
    <longitude>24.602891666624284</longitude>
    <latitude>59.398122222355134</latitude>
    <phenomenon>Light snow shower</phenomenon>
    <visibility>35.0</visibility>
    <airpressure>1006.5</airpressure>
    <relativehumidity>84</relativehumidity>
    <airtemperature>-2.1</airtemperature>
    <winddirection>209</winddirection>
    <windspeed>4.3</windspeed>
    <windspeedmax>7.2</windspeedmax>
  </station>
  <station>
    <name>Tartu-Tõravere</name>
    <wmocode>26242</wmocode>
    <phenomenon></phenomenon>
    <airtemperature>0.5</airtemperature>
    <windspeed>11.0</windspeed>
  </station>
  <station>
    <name>Pärnu</name>
    <wmocode>41803</wmocode>
    <phenomenon>Overcast</phenomenon>
    <airtemperature></airtemperature>
    <windspeed>3.1</windspeed>
  </station>
</observations>
"#;

    #[test]
    fn test_keeps_only_supported_stations() {
        let observations = parse_feed(FEED).unwrap();
        let codes: Vec<u32> = observations.iter().map(|o| o.wmo_code).collect();
        assert_eq!(codes, vec![26038, 26242]);
    }

    #[test]
    fn test_fields_are_parsed() {
        let observations = parse_feed(FEED).unwrap();
        let tallinn = &observations[0];
        assert_eq!(tallinn.station_name, "Tallinn-Harku");
        assert_eq!(tallinn.air_temperature, -2.1);
        assert_eq!(tallinn.wind_speed, 4.3);
        assert_eq!(tallinn.phenomenon, "Light snow shower");
        assert_eq!(tallinn.timestamp.timestamp(), 1_693_131_973);
        assert_eq!(tallinn.timestamp.timezone(), chrono_tz::Europe::Tallinn);
    }

    #[test]
    fn test_empty_phenomenon_becomes_empty_text() {
        let observations = parse_feed(FEED).unwrap();
        assert_eq!(observations[1].phenomenon, "");
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(
            parse_feed("<observations><station>"),
            Err(DeliveryFeeError::Ingestion { .. })
        ));
    }

    #[test]
    fn test_invalid_timestamp() {
        let xml = r#"<observations timestamp="yesterday"></observations>"#;
        let err = parse_feed(xml).unwrap_err();
        assert!(err.to_string().contains("Invalid feed timestamp"));
    }

    #[rstest]
    #[case("NaN", "3.0")]
    #[case("-2.0", "inf")]
    #[case("-inf", "-inf")]
    fn test_non_finite_readings_drop_station(#[case] temperature: &str, #[case] wind: &str) {
        let xml = format!(
            r#"<observations timestamp="1693131973">
  <station><name>Tartu-Tõravere</name><wmocode>26242</wmocode><phenomenon>Snow</phenomenon><airtemperature>{temperature}</airtemperature><windspeed>{wind}</windspeed></station>
  <station><name>Pärnu</name><wmocode>41803</wmocode><phenomenon></phenomenon><airtemperature>1.0</airtemperature><windspeed>3.0</windspeed></station>
</observations>"#
        );
        let codes: Vec<u32> = parse_feed(&xml).unwrap().iter().map(|o| o.wmo_code).collect();
        assert_eq!(codes, vec![41803]);
    }
}
