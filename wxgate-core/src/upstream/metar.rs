//! METAR text client
//!
//! Fetches the raw aviation-style report for a fixed station. The body is
//! returned as-is; no parsing is performed.

use super::UpstreamClient;
use crate::error::ApiError;

/// Station used when none is configured. There is no coordinate-to-station
/// lookup yet.
/// TODO: resolve the nearest station from the request coordinates.
pub const DEFAULT_METAR_STATION: &str = "KRAP";

impl UpstreamClient {
    pub async fn fetch_metar(&self, station: &str) -> Result<String, ApiError> {
        let url = metar_url(&self.endpoints().metar_base, station);
        self.get_text(&url, "METAR").await
    }
}

fn metar_url(base: &str, station: &str) -> String {
    format!("{}/{}.1.txt", base, station)
}
