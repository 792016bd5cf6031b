//! Map-click current-conditions client
//!
//! The default source: NWS MapClick keyed by coordinates and unit system.
//! Only `creationDateLocal` and `currentobservation` are pulled out of the
//! response; the observation block is passed through verbatim.

use serde::Deserialize;
use serde_json::Value;

use super::UpstreamClient;
use crate::error::ApiError;
use crate::validate::UnitCode;

/// The fields of a MapClick response the façade cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct MapClickReport {
    pub created: String,
    pub observation: Value,
}

impl MapClickReport {
    /// Raw condition string used for icon classification.
    pub fn condition(&self) -> Option<&str> {
        self.observation.get("Weather").and_then(Value::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct RawMapClick {
    #[serde(rename = "creationDateLocal")]
    creation_date_local: String,
    currentobservation: Value,
}

impl UpstreamClient {
    pub async fn fetch_map_click(
        &self,
        lat: f64,
        lon: f64,
        unitcode: UnitCode,
    ) -> Result<MapClickReport, ApiError> {
        let url = map_click_url(&self.endpoints().map_click_base, lat, lon, unitcode);
        let value = self.get_json(&url, "map-click").await?;

        let raw: RawMapClick = serde_json::from_value(value).map_err(|e| {
            tracing::error!("Map-click response had unexpected shape: {}", e);
            ApiError::UpstreamMalformed
        })?;

        Ok(MapClickReport {
            created: raw.creation_date_local,
            observation: raw.currentobservation,
        })
    }
}

fn map_click_url(base: &str, lat: f64, lon: f64, unitcode: UnitCode) -> String {
    format!(
        "{}?lat={}&lon={}&unit={}&lg=english&FcstType=json",
        base,
        lat,
        lon,
        unitcode.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_click_url() {
        let url = map_click_url(
            "https://forecast.weather.gov/MapClick.php",
            39.7,
            -104.9,
            UnitCode::UsStd,
        );
        assert_eq!(
            url,
            "https://forecast.weather.gov/MapClick.php?lat=39.7&lon=-104.9&unit=us-std&lg=english&FcstType=json"
        );
    }

    #[test]
    fn test_raw_parse_keeps_observation_verbatim() {
        let raw: RawMapClick = serde_json::from_str(
            r#"{
                "creationDateLocal": "26 Aug 14:02 pm MDT",
                "currentobservation": {
                    "name": "Denver, Denver International Airport",
                    "Temp": "84",
                    "Weather": "Mostly Cloudy",
                    "Relh": "31"
                },
                "location": {"region": "oax"}
            }"#,
        )
        .unwrap();

        let report = MapClickReport {
            created: raw.creation_date_local,
            observation: raw.currentobservation,
        };
        assert_eq!(report.created, "26 Aug 14:02 pm MDT");
        assert_eq!(report.condition(), Some("Mostly Cloudy"));
        // untouched pass-through, including fields we never interpret
        assert_eq!(report.observation["Relh"], "31");
    }

    #[test]
    fn test_condition_absent_when_no_weather_field() {
        let report = MapClickReport {
            created: String::new(),
            observation: serde_json::json!({"Temp": "84"}),
        };
        assert_eq!(report.condition(), None);
    }
}
