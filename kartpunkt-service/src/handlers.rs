//! HTTP request handlers for the enrichment service.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use geojson::Geometry;
use serde::{Deserialize, Serialize};

use kartpunkt::{enrich_once, BuildingLookup, Coordinate, ElevationDisplay, ElevationLookup};

use crate::AppState;

/// Query parameters for the enrichment endpoint.
#[derive(Debug, Deserialize)]
pub struct EnrichQuery {
    /// Longitude in decimal degrees (-180 to 180).
    pub lon: f64,
    /// Latitude in decimal degrees (-90 to 90).
    pub lat: f64,
}

/// Merged enrichment response for a single point.
#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    /// Longitude queried.
    pub lon: f64,
    /// Latitude queried.
    pub lat: f64,
    /// Point elevation in meters, `null` when unavailable.
    pub elevation: Option<f64>,
    /// Human-readable elevation readout.
    pub elevation_display: String,
    /// Building footprint geometry, `null` when no building is registered.
    pub outline: Option<Geometry>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Enrich a single point with elevation and building footprint data.
///
/// Both lookups run concurrently. Failures degrade to `null` fields rather
/// than error statuses: neither lookup is critical, and the map client must
/// stay interactive regardless of lookup outcomes.
///
/// # Query Parameters
///
/// - `lon`: Longitude in decimal degrees
/// - `lat`: Latitude in decimal degrees
///
/// # Returns
///
/// - `200 OK` with merged enrichment data whenever the query parses
/// - `400 Bad Request` if the coordinates are missing or malformed
pub async fn enrich_point<E, B>(
    State(state): State<Arc<AppState<E, B>>>,
    Query(query): Query<EnrichQuery>,
) -> Json<EnrichResponse>
where
    E: ElevationLookup,
    B: BuildingLookup,
{
    tracing::debug!(lon = query.lon, lat = query.lat, "enrich query");

    let coordinate = Coordinate::new(query.lon, query.lat);
    let point = enrich_once(&state.elevation, &state.buildings, coordinate).await;

    let display = match point.elevation {
        Some(meters) => ElevationDisplay::Meters(meters),
        None => ElevationDisplay::Unavailable,
    };

    tracing::info!(
        lon = query.lon,
        lat = query.lat,
        elevation = point.elevation,
        has_outline = point.outline.is_some(),
        "point enriched"
    );

    Json(EnrichResponse {
        lon: query.lon,
        lat: query.lat,
        elevation: point.elevation,
        elevation_display: display.to_string(),
        outline: point.outline,
    })
}

/// Health check endpoint.
///
/// Returns service status and version.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrich_query_deserialize() {
        let query: EnrichQuery = serde_json::from_str(r#"{"lon": 10.4, "lat": 63.4}"#).unwrap();
        assert_eq!(query.lon, 10.4);
        assert_eq!(query.lat, 63.4);
    }

    #[test]
    fn test_enrich_response_serialize_absent_fields_as_null() {
        let response = EnrichResponse {
            lon: 10.4,
            lat: 63.4,
            elevation: None,
            elevation_display: ElevationDisplay::Unavailable.to_string(),
            outline: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""elevation":null"#));
        assert!(json.contains(r#""outline":null"#));
    }

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }
}
