//! Integration tests for the HTTP API.

use std::sync::Arc;

use axum_test::TestServer;
use kartpunkt::{
    BuildingLookup, Coordinate, ElevationLookup, ElevationSample, LookupError, Result,
};
use kartpunkt_service::AppState;
use serde_json::Value;

/// Closed 5-position ring: a 4-vertex square footprint.
const SQUARE: &str = r#"{"type":"Polygon","coordinates":
    [[[10.405,63.415],[10.406,63.415],[10.406,63.416],[10.405,63.416],[10.405,63.415]]]}"#;

/// Elevation stub: fixed samples, or a failing service.
#[derive(Clone)]
struct StubElevation {
    samples: Vec<f64>,
    fail: bool,
}

impl StubElevation {
    fn returning(samples: &[f64]) -> Self {
        Self {
            samples: samples.to_vec(),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            samples: Vec::new(),
            fail: true,
        }
    }
}

impl ElevationLookup for StubElevation {
    async fn elevation_at(&self, _coordinate: Coordinate) -> Result<Vec<ElevationSample>> {
        if self.fail {
            return Err(LookupError::Failed("stub elevation offline".into()));
        }
        Ok(self
            .samples
            .iter()
            .map(|z| ElevationSample { z: *z })
            .collect())
    }
}

/// Building stub: fixed payload, or a failing service.
#[derive(Clone)]
struct StubBuildings {
    payload: Option<String>,
    fail: bool,
}

impl StubBuildings {
    fn returning(payload: &str) -> Self {
        Self {
            payload: Some(payload.to_string()),
            fail: false,
        }
    }

    fn empty() -> Self {
        Self {
            payload: None,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            payload: None,
            fail: true,
        }
    }
}

impl BuildingLookup for StubBuildings {
    async fn footprint_at(&self, _coordinate: Coordinate) -> Result<Option<String>> {
        if self.fail {
            return Err(LookupError::Failed("stub buildings offline".into()));
        }
        Ok(self.payload.clone())
    }
}

fn test_server(elevation: StubElevation, buildings: StubBuildings) -> TestServer {
    let state = Arc::new(AppState {
        elevation,
        buildings,
    });
    TestServer::new(kartpunkt_service::router(state)).unwrap()
}

#[tokio::test]
async fn test_enrich_merges_both_lookups() {
    let server = test_server(
        StubElevation::returning(&[42.0, 41.5]),
        StubBuildings::returning(SQUARE),
    );

    let response = server
        .get("/enrich")
        .add_query_param("lon", 10.4)
        .add_query_param("lat", 63.4)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["lon"], 10.4);
    assert_eq!(body["lat"], 63.4);
    assert_eq!(body["elevation"], 42.0);
    assert_eq!(body["elevation_display"], "42 m");
    assert_eq!(body["outline"]["type"], "Polygon");
}

#[tokio::test]
async fn test_enrich_without_building() {
    let server = test_server(StubElevation::returning(&[12.5]), StubBuildings::empty());

    let response = server
        .get("/enrich")
        .add_query_param("lon", 10.4)
        .add_query_param("lat", 63.4)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["elevation"], 12.5);
    assert!(body["outline"].is_null());
}

#[tokio::test]
async fn test_enrich_absorbs_lookup_failures() {
    // Both upstreams down: still 200, with explicit "unavailable" values.
    let server = test_server(StubElevation::failing(), StubBuildings::failing());

    let response = server
        .get("/enrich")
        .add_query_param("lon", 10.4)
        .add_query_param("lat", 63.4)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["elevation"].is_null());
    assert_eq!(body["elevation_display"], "No elevation data");
    assert!(body["outline"].is_null());
}

#[tokio::test]
async fn test_enrich_empty_sample_list_is_unavailable() {
    let server = test_server(StubElevation::returning(&[]), StubBuildings::empty());

    let response = server
        .get("/enrich")
        .add_query_param("lon", 10.4)
        .add_query_param("lat", 63.4)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["elevation"].is_null());
    assert_eq!(body["elevation_display"], "No elevation data");
}

#[tokio::test]
async fn test_enrich_rejects_malformed_query() {
    let server = test_server(StubElevation::returning(&[1.0]), StubBuildings::empty());

    let response = server.get("/enrich").add_query_param("lon", 10.4).await;
    response.assert_status_bad_request();

    let response = server
        .get("/enrich")
        .add_query_param("lon", "east")
        .add_query_param("lat", 63.4)
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_health() {
    let server = test_server(StubElevation::returning(&[]), StubBuildings::empty());

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
