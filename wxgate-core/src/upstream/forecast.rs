//! Forecast clients
//!
//! Two forecast shapes are exposed, both passed through unmodified:
//! - raw forecast: a grid-point lookup (`/points/{lat},{lon}`) followed by
//!   a gridpoints fetch for the office/raster cell the point falls in
//! - weekly forecast: the plain-view point forecast

use serde::Deserialize;
use serde_json::Value;

use super::UpstreamClient;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

/// Grid cell a coordinate pair resolves to.
#[derive(Debug, Deserialize)]
struct PointsProperties {
    #[serde(rename = "gridId")]
    grid_id: String,
    #[serde(rename = "gridX")]
    grid_x: i64,
    #[serde(rename = "gridY")]
    grid_y: i64,
}

impl UpstreamClient {
    /// Grid-point based raw forecast: resolve the coordinates to a grid
    /// cell, then fetch that cell's gridpoints payload.
    pub async fn fetch_raw_forecast(&self, lat: f64, lon: f64) -> Result<Value, ApiError> {
        let points_url = format!("{}/points/{},{}", self.endpoints().points_base, lat, lon);
        let points_value = self.get_json(&points_url, "points").await?;

        let points: PointsResponse = serde_json::from_value(points_value).map_err(|e| {
            tracing::error!("Points response had unexpected shape: {}", e);
            ApiError::UpstreamMalformed
        })?;

        let grid_url = format!(
            "{}/gridpoints/{}/{},{}",
            self.endpoints().points_base,
            points.properties.grid_id,
            points.properties.grid_x,
            points.properties.grid_y
        );
        self.get_json(&grid_url, "gridpoints").await
    }

    pub async fn fetch_weekly_forecast(&self, lat: f64, lon: f64) -> Result<Value, ApiError> {
        let url = format!(
            "{}/point/{},{}?view=plain&mode=min",
            self.endpoints().weekly_base,
            lat,
            lon
        );
        self.get_json(&url, "weekly forecast").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_response_parses_grid_cell() {
        let points: PointsResponse = serde_json::from_str(
            r#"{
                "id": "https://api.weather.gov/points/39.7,-104.9",
                "properties": {
                    "gridId": "BOU",
                    "gridX": 63,
                    "gridY": 61,
                    "forecastZone": "https://api.weather.gov/zones/forecast/COZ040"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(points.properties.grid_id, "BOU");
        assert_eq!(points.properties.grid_x, 63);
        assert_eq!(points.properties.grid_y, 61);
    }

    #[test]
    fn test_points_response_without_grid_fields_is_error() {
        let result: Result<PointsResponse, _> =
            serde_json::from_str(r#"{"properties": {"forecastZone": "x"}}"#);
        assert!(result.is_err());
    }
}
