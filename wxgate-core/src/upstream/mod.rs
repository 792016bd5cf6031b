//! Upstream aggregator
//!
//! One HTTP client shared by all sources. Exactly one source is consulted
//! per request; the map-click source additionally makes a dependent
//! astronomical call. Any non-200 or transport fault is terminal and
//! surfaces as `UpstreamUnavailable`; an undecodable body as
//! `UpstreamMalformed`. No retries, no backoff.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::document::{ConditionsDocument, WeatherDocument};
use crate::error::ApiError;
use crate::icons::IconTable;
use crate::source::SourceMode;
use crate::validate::ValidRequest;

pub mod astro;
pub mod forecast;
pub mod mapclick;
pub mod metar;

pub use astro::{AstroReport, MoonTimes, SunTimes, TIME_UNAVAILABLE};
pub use mapclick::MapClickReport;
pub use metar::DEFAULT_METAR_STATION;

const MAP_CLICK_BASE: &str = "https://forecast.weather.gov/MapClick.php";
const METAR_BASE: &str = "https://w1.weather.gov/data/METAR";
const POINTS_BASE: &str = "https://api.weather.gov";
const WEEKLY_BASE: &str = "https://forecast-v3.weather.gov";
const ASTRO_BASE: &str = "https://api.usno.navy.mil/rstt/oneday";

/// Base URLs for every upstream source. Defaults point at the public
/// services; tests override individual bases to exercise the failure
/// paths against local listeners.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub map_click_base: String,
    pub metar_base: String,
    pub points_base: String,
    pub weekly_base: String,
    pub astro_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            map_click_base: MAP_CLICK_BASE.to_string(),
            metar_base: METAR_BASE.to_string(),
            points_base: POINTS_BASE.to_string(),
            weekly_base: WEEKLY_BASE.to_string(),
            astro_base: ASTRO_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_endpoints(timeout, Endpoints::default())
    }

    pub fn with_endpoints(timeout: Duration, endpoints: Endpoints) -> Result<Self> {
        // api.weather.gov rejects requests without a User-Agent
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wxgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Aggregate the single source a validated request selected.
    pub async fn aggregate(
        &self,
        mode: SourceMode,
        request: &ValidRequest,
        icons: &IconTable,
        metar_station: &str,
    ) -> Result<WeatherDocument, ApiError> {
        tracing::debug!(
            "Aggregating source '{}' for {},{}",
            mode,
            request.lat,
            request.lon
        );

        match mode {
            SourceMode::Metar => {
                let text = self.fetch_metar(metar_station).await?;
                Ok(WeatherDocument::Metar { metar: text })
            }
            SourceMode::RawForecast => {
                let payload = self.fetch_raw_forecast(request.lat, request.lon).await?;
                Ok(WeatherDocument::RawForecast {
                    raw_forecast: payload,
                })
            }
            SourceMode::WeeklyForecast => {
                let payload = self.fetch_weekly_forecast(request.lat, request.lon).await?;
                Ok(WeatherDocument::WeeklyForecast {
                    weekly_forecast: payload,
                })
            }
            SourceMode::MapClick => {
                let document = self.current_conditions(request, icons, false).await?;
                Ok(WeatherDocument::Conditions(document))
            }
        }
    }

    /// Map-click current conditions plus the dependent astronomical call.
    ///
    /// `echo_unitcode` controls whether the document carries the request's
    /// unit system back to the caller (the current-conditions endpoint
    /// does, the aggregated endpoint does not).
    pub async fn current_conditions(
        &self,
        request: &ValidRequest,
        icons: &IconTable,
        echo_unitcode: bool,
    ) -> Result<ConditionsDocument, ApiError> {
        let report = self
            .fetch_map_click(request.lat, request.lon, request.unitcode)
            .await?;

        let icon_type = icons.classify(report.condition().unwrap_or("")).to_string();

        // Astronomical lookup is always sequential after the primary call
        let (date, tz_offset_hours) = local_clock();
        let astro = self
            .fetch_astronomical(request.lat, request.lon, date, tz_offset_hours)
            .await?;

        let unitcode = echo_unitcode.then(|| request.unitcode.to_string());
        Ok(ConditionsDocument::from_parts(report, icon_type, astro, unitcode))
    }

    pub(crate) async fn get_json(&self, url: &str, what: &str) -> Result<Value, ApiError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("{} request failed: {}", what, e);
            ApiError::UpstreamUnavailable
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("{} returned HTTP {}", what, status);
            return Err(ApiError::UpstreamUnavailable);
        }

        response.json().await.map_err(|e| {
            tracing::error!("{} returned undecodable JSON: {}", what, e);
            ApiError::UpstreamMalformed
        })
    }

    pub(crate) async fn get_text(&self, url: &str, what: &str) -> Result<String, ApiError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("{} request failed: {}", what, e);
            ApiError::UpstreamUnavailable
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("{} returned HTTP {}", what, status);
            return Err(ApiError::UpstreamUnavailable);
        }

        response.text().await.map_err(|e| {
            tracing::error!("{} body could not be read: {}", what, e);
            ApiError::UpstreamMalformed
        })
    }
}

/// Current local date and UTC-offset hours, for the astronomical call.
fn local_clock() -> (NaiveDate, i32) {
    let now = Local::now();
    let offset_hours = now.offset().local_minus_utc() / 3600;
    (now.date_naive(), offset_hours)
}
