//! Kartpunkt Service - HTTP API for map point enrichment.
//!
//! Enriches a clicked map coordinate with point elevation and building
//! footprint data, merged from two concurrent upstream lookups. Intended to
//! sit behind a browser map frontend, hence the permissive CORS policy.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `KARTPUNKT_PORT` | HTTP server port | 8080 |
//! | `KARTPUNKT_ELEVATION_URL` | URL template for elevation lookups | Geonorge høydedata |
//! | `KARTPUNKT_BUILDINGS_URL` | URL template for building lookups | FKB bygning |
//! | `KARTPUNKT_TIMEOUT_SECS` | Lookup request timeout in seconds | 10 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /enrich?lon=X&lat=Y` - Merged elevation + building footprint for a point
//! - `GET /health` - Health check

use std::net::SocketAddr;
use std::sync::Arc;

use kartpunkt::remote::{
    HttpBuildingLookup, HttpElevationLookup, LookupConfig, FKB_BUILDING_URL,
    GEONORGE_ELEVATION_URL,
};
use kartpunkt_service::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kartpunkt_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("KARTPUNKT_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let timeout_secs: u64 = std::env::var("KARTPUNKT_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let elevation_url = std::env::var("KARTPUNKT_ELEVATION_URL")
        .unwrap_or_else(|_| GEONORGE_ELEVATION_URL.to_string());
    let buildings_url = std::env::var("KARTPUNKT_BUILDINGS_URL")
        .unwrap_or_else(|_| FKB_BUILDING_URL.to_string());

    let elevation = HttpElevationLookup::new(
        LookupConfig::with_url_template(elevation_url.clone()).timeout_secs(timeout_secs),
    )?;
    let buildings = HttpBuildingLookup::new(
        LookupConfig::with_url_template(buildings_url.clone()).timeout_secs(timeout_secs),
    )?;

    tracing::info!(
        elevation_url = %elevation_url,
        buildings_url = %buildings_url,
        timeout_secs = timeout_secs,
        port = port,
        "Starting kartpunkt service"
    );

    let state = Arc::new(AppState {
        elevation,
        buildings,
    });

    let app = kartpunkt_service::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
