//! USNO astronomical data client
//!
//! Fetches one-day sun/moon rise-set data and the closest moon phase from
//! the USNO `rstt/oneday` API. Times are reported as local `HH:MM`
//! strings; entries that fail that format are substituted with the `n/a`
//! sentinel rather than failing the request.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::UpstreamClient;
use crate::error::ApiError;

/// Sentinel for a rise/set time that could not be determined.
pub const TIME_UNAVAILABLE: &str = "n/a";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SunTimes {
    pub rise: String,
    pub set: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MoonTimes {
    pub phase: String,
    pub rise: String,
    pub set: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstroReport {
    pub sun: SunTimes,
    pub moon: MoonTimes,
}

#[derive(Debug, Deserialize)]
struct RawAstro {
    closestphase: ClosestPhase,
    #[serde(default)]
    sundata: Vec<Phenomenon>,
    #[serde(default)]
    moondata: Vec<Phenomenon>,
}

#[derive(Debug, Deserialize)]
struct ClosestPhase {
    phase: String,
}

#[derive(Debug, Deserialize)]
struct Phenomenon {
    phen: String,
    time: String,
}

/// Return the value if it parses as `HH:MM`, otherwise the sentinel.
///
/// Applied uniformly to every rise/set field; a malformed time never
/// propagates and never fails the request.
pub fn valid_time_or_na(raw: &str) -> String {
    if NaiveTime::parse_from_str(raw, "%H:%M").is_ok() {
        raw.to_string()
    } else {
        TIME_UNAVAILABLE.to_string()
    }
}

/// Pull the rise (`R`) and set (`S`) phenomena out of a data table.
fn rise_set(data: &[Phenomenon]) -> (String, String) {
    let mut rise = TIME_UNAVAILABLE.to_string();
    let mut set = TIME_UNAVAILABLE.to_string();

    for item in data {
        match item.phen.as_str() {
            "R" => rise = valid_time_or_na(&item.time),
            "S" => set = valid_time_or_na(&item.time),
            _ => {}
        }
    }

    (rise, set)
}

fn shape(raw: RawAstro) -> AstroReport {
    let (sun_rise, sun_set) = rise_set(&raw.sundata);
    let (moon_rise, moon_set) = rise_set(&raw.moondata);

    AstroReport {
        sun: SunTimes {
            rise: sun_rise,
            set: sun_set,
        },
        moon: MoonTimes {
            phase: raw.closestphase.phase,
            rise: moon_rise,
            set: moon_set,
        },
    }
}

impl UpstreamClient {
    /// Fetch sun/moon data for one local date at the given coordinates.
    ///
    /// `tz_offset_hours` is the UTC offset of the local clock, e.g. -6.
    pub async fn fetch_astronomical(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
        tz_offset_hours: i32,
    ) -> Result<AstroReport, ApiError> {
        let url = astro_url(&self.endpoints().astro_base, lat, lon, date, tz_offset_hours);
        let value = self.get_json(&url, "astronomical").await?;

        let raw: RawAstro = serde_json::from_value(value).map_err(|e| {
            tracing::error!("Astronomical response had unexpected shape: {}", e);
            ApiError::UpstreamMalformed
        })?;

        Ok(shape(raw))
    }
}

fn astro_url(base: &str, lat: f64, lon: f64, date: NaiveDate, tz_offset_hours: i32) -> String {
    format!(
        "{}?date={}&coords={},{}&tz={:+03}",
        base,
        date.format("%m/%d/%Y"),
        lat,
        lon,
        tz_offset_hours
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_time_or_na() {
        assert_eq!(valid_time_or_na("06:31"), "06:31");
        assert_eq!(valid_time_or_na("23:59"), "23:59");
        assert_eq!(valid_time_or_na("24:00"), TIME_UNAVAILABLE);
        assert_eq!(valid_time_or_na("0631"), TIME_UNAVAILABLE);
        assert_eq!(valid_time_or_na(""), TIME_UNAVAILABLE);
        assert_eq!(valid_time_or_na("** Moon continuously above horizon **"), TIME_UNAVAILABLE);
    }

    #[test]
    fn test_shape_full_day() {
        let raw: RawAstro = serde_json::from_str(
            r#"{
                "closestphase": {"phase": "Waxing Gibbous"},
                "sundata": [
                    {"phen": "BC", "time": "05:58"},
                    {"phen": "R", "time": "06:26"},
                    {"phen": "U", "time": "13:01"},
                    {"phen": "S", "time": "19:36"}
                ],
                "moondata": [
                    {"phen": "R", "time": "17:12"},
                    {"phen": "S", "time": "03:44"}
                ]
            }"#,
        )
        .unwrap();

        let report = shape(raw);
        assert_eq!(report.sun.rise, "06:26");
        assert_eq!(report.sun.set, "19:36");
        assert_eq!(report.moon.phase, "Waxing Gibbous");
        assert_eq!(report.moon.rise, "17:12");
        assert_eq!(report.moon.set, "03:44");
    }

    #[test]
    fn test_shape_substitutes_sentinel_for_bad_times() {
        let raw: RawAstro = serde_json::from_str(
            r#"{
                "closestphase": {"phase": "New Moon"},
                "sundata": [{"phen": "R", "time": "not-a-time"}],
                "moondata": []
            }"#,
        )
        .unwrap();

        let report = shape(raw);
        assert_eq!(report.sun.rise, TIME_UNAVAILABLE);
        assert_eq!(report.sun.set, TIME_UNAVAILABLE);
        assert_eq!(report.moon.rise, TIME_UNAVAILABLE);
        assert_eq!(report.moon.set, TIME_UNAVAILABLE);
    }

    #[test]
    fn test_astro_url_format() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let url = astro_url(
            "https://api.usno.navy.mil/rstt/oneday",
            39.7,
            -104.9,
            date,
            -6,
        );
        assert_eq!(
            url,
            "https://api.usno.navy.mil/rstt/oneday?date=08/26/2026&coords=39.7,-104.9&tz=-06"
        );
    }
}
