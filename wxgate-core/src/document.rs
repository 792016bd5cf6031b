//! Weather document shaping
//!
//! The unified output document. Which shape is produced depends on the
//! selected source: current conditions carry the observation block plus
//! icon and sun/moon data; the other sources wrap their payload under a
//! single named key. Built fresh per request, never persisted.

use serde::Serialize;
use serde_json::Value;

use crate::upstream::astro::{AstroReport, MoonTimes, SunTimes};
use crate::upstream::mapclick::MapClickReport;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum WeatherDocument {
    Conditions(ConditionsDocument),
    Metar { metar: String },
    WeeklyForecast { weekly_forecast: Value },
    RawForecast { raw_forecast: Value },
}

/// Shaped map-click + astronomical payload.
///
/// `observation` is the upstream `currentobservation` block verbatim;
/// `moon_phase` duplicates `moon.phase` at the top level for callers that
/// predate the nested form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConditionsDocument {
    pub created: String,
    pub observation: Value,
    pub icon_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unitcode: Option<String>,
    pub sun: SunTimes,
    pub moon: MoonTimes,
    pub moon_phase: String,
}

impl ConditionsDocument {
    pub fn from_parts(
        report: MapClickReport,
        icon_type: String,
        astro: AstroReport,
        unitcode: Option<String>,
    ) -> Self {
        let moon_phase = astro.moon.phase.clone();
        Self {
            created: report.created,
            observation: report.observation,
            icon_type,
            unitcode,
            sun: astro.sun,
            moon: astro.moon,
            moon_phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconTable;
    use crate::upstream::astro::TIME_UNAVAILABLE;

    fn report() -> MapClickReport {
        MapClickReport {
            created: "26 Aug 14:02 pm MDT".to_string(),
            observation: serde_json::json!({
                "name": "Denver, Denver International Airport",
                "Temp": "84",
                "Weather": "Mostly Cloudy"
            }),
        }
    }

    fn astro() -> AstroReport {
        AstroReport {
            sun: SunTimes {
                rise: "06:26".to_string(),
                set: "19:36".to_string(),
            },
            moon: MoonTimes {
                phase: "Waxing Gibbous".to_string(),
                rise: "17:12".to_string(),
                set: TIME_UNAVAILABLE.to_string(),
            },
        }
    }

    #[test]
    fn test_conditions_document_shape() {
        let icons =
            IconTable::from_json_str(r#"{"cloudy": ["Mostly Cloudy", "Overcast"]}"#).unwrap();
        let report = report();
        let icon_type = icons.classify(report.condition().unwrap()).to_string();

        let doc = ConditionsDocument::from_parts(report, icon_type, astro(), None);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["created"], "26 Aug 14:02 pm MDT");
        assert_eq!(json["observation"]["Temp"], "84");
        assert_eq!(json["icon_type"], "cloudy");
        assert_eq!(json["sun"]["rise"], "06:26");
        assert_eq!(json["moon"]["phase"], "Waxing Gibbous");
        assert_eq!(json["moon"]["set"], TIME_UNAVAILABLE);
        assert_eq!(json["moon_phase"], "Waxing Gibbous");
        // unitcode only appears when echoed
        assert!(json.get("unitcode").is_none());
    }

    #[test]
    fn test_conditions_document_echoes_unitcode() {
        let doc = ConditionsDocument::from_parts(
            report(),
            "n/a".to_string(),
            astro(),
            Some("us-std".to_string()),
        );
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["unitcode"], "us-std");
        assert_eq!(json["icon_type"], "n/a");
    }

    #[test]
    fn test_metar_document_is_single_key() {
        let doc = WeatherDocument::Metar {
            metar: "KRAP 262052Z 30011KT 10SM FEW070 29/07 A3021".to_string(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert!(json["metar"].as_str().unwrap().starts_with("KRAP"));
    }

    #[test]
    fn test_forecast_documents_pass_payload_through() {
        let payload = serde_json::json!({"periods": [{"name": "Tonight"}]});
        let weekly = WeatherDocument::WeeklyForecast {
            weekly_forecast: payload.clone(),
        };
        let json = serde_json::to_value(&weekly).unwrap();
        assert_eq!(json["weekly_forecast"], payload);

        let raw = WeatherDocument::RawForecast {
            raw_forecast: payload.clone(),
        };
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["raw_forecast"], payload);
    }
}
