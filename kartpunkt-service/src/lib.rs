//! Kartpunkt Service Library
//!
//! HTTP handlers and router for the point enrichment service.
//! This library is used by both the kartpunkt-service binary and
//! integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use kartpunkt::{BuildingLookup, ElevationLookup};

/// Application state shared across handlers.
pub struct AppState<E, B> {
    /// Elevation lookup collaborator.
    pub elevation: E,
    /// Building footprint lookup collaborator.
    pub buildings: B,
}

/// Build the service router over the given lookup collaborators.
pub fn router<E, B>(state: Arc<AppState<E, B>>) -> Router
where
    E: ElevationLookup,
    B: BuildingLookup,
{
    Router::new()
        .route("/enrich", get(handlers::enrich_point::<E, B>))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{EnrichQuery, EnrichResponse, HealthResponse};
