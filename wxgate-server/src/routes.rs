//! HTTP surface
//!
//! Two path-versioned GET endpoints:
//! - `/{version}/weather` — aggregated multi-source endpoint; query flags
//!   select the source
//! - `/{version}/wx/current/` — current-conditions only (map-click plus
//!   astronomical), trailing slash optional
//!
//! Success is 200 with the shaped JSON document; every validation or
//! upstream failure is 400 with a `{code, message}` body. The `pp` flag
//! only switches the content type to `application/json`; the wire bytes
//! are the same JSON either way.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, RawQuery, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use wxgate_core::{ApiError, SourceFlags, SourceMode, WeatherDocument, validate};

use crate::cache::CachedResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    pub location: Option<String>,
    pub user_id: Option<String>,
    pub unitcode: Option<String>,
    // source flags: presence selects, values are ignored
    pub metar: Option<String>,
    pub raw_forecast: Option<String>,
    pub weekly_forecast: Option<String>,
    pub map_click: Option<String>,
    // presentation flag
    pub pp: Option<String>,
}

impl WeatherParams {
    fn source_flags(&self) -> SourceFlags {
        SourceFlags {
            metar: self.metar.is_some(),
            raw_forecast: self.raw_forecast.is_some(),
            weekly_forecast: self.weekly_forecast.is_some(),
            map_click: self.map_click.is_some(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let enable_cors = state.config.enable_cors;

    let mut router = Router::new()
        .route("/{version}/weather", get(get_weather))
        .route("/{version}/weather/", get(get_weather))
        .route("/{version}/wx/current", get(get_current_conditions))
        .route("/{version}/wx/current/", get(get_current_conditions))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Aggregated multi-source endpoint.
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path(version): Path<String>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<WeatherParams>,
) -> Response {
    let cache_key = signature("weather", &version, raw_query.as_deref());
    if let Some(hit) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return render(hit);
    }

    let valid = match validate::validate_request(
        &version,
        params.user_id.as_deref(),
        params.location.as_deref(),
        params.unitcode.as_deref(),
        &state.users,
    ) {
        Ok(valid) => valid,
        Err(e) => return reject(&e),
    };

    let mode = SourceMode::select(params.source_flags());
    let document = match state
        .upstream
        .aggregate(mode, &valid, &state.icons, &state.config.metar_station)
        .await
    {
        Ok(document) => document,
        Err(e) => return reject(&e),
    };

    respond_and_cache(&state, cache_key, &document, params.pp.is_some()).await
}

/// Current-conditions-only endpoint: always map-click plus astronomical,
/// and the document echoes the unit system.
async fn get_current_conditions(
    State(state): State<Arc<AppState>>,
    Path(version): Path<String>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<WeatherParams>,
) -> Response {
    let cache_key = signature("wx/current", &version, raw_query.as_deref());
    if let Some(hit) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return render(hit);
    }

    let valid = match validate::validate_request(
        &version,
        params.user_id.as_deref(),
        params.location.as_deref(),
        params.unitcode.as_deref(),
        &state.users,
    ) {
        Ok(valid) => valid,
        Err(e) => return reject(&e),
    };

    let document = match state
        .upstream
        .current_conditions(&valid, &state.icons, true)
        .await
    {
        Ok(document) => WeatherDocument::Conditions(document),
        Err(e) => return reject(&e),
    };

    respond_and_cache(&state, cache_key, &document, params.pp.is_some()).await
}

/// Full request signature used as the cache key. The trailing-slash and
/// bare forms of an endpoint share a signature.
fn signature(endpoint: &str, version: &str, raw_query: Option<&str>) -> String {
    format!("/{}/{}?{}", version, endpoint, raw_query.unwrap_or(""))
}

async fn respond_and_cache(
    state: &AppState,
    cache_key: String,
    document: &WeatherDocument,
    as_json: bool,
) -> Response {
    let body = match serde_json::to_string(document) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Failed to serialize weather document: {}", e);
            return reject(&ApiError::UpstreamMalformed);
        }
    };

    let response = CachedResponse { body, as_json };
    state.cache.put(cache_key, response.clone()).await;
    render(response)
}

/// Serialize once, serve the same bytes from cache and live paths alike.
fn render(cached: CachedResponse) -> Response {
    let content_type = if cached.as_json {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    };
    ([(header::CONTENT_TYPE, content_type)], cached.body).into_response()
}

fn reject(error: &ApiError) -> Response {
    tracing::warn!("Request rejected: {} [{}]", error, error.code());
    (StatusCode::BAD_REQUEST, Json(error.body())).into_response()
}
