//! Lookup collaborator traits and wire types.
//!
//! The two lookups are independent external services with independent,
//! variable latency. Both are modeled as async traits returning `Send`
//! futures so the controller can run them as spawned tasks; implementations
//! must be cheap to clone (HTTP clients are, stubs derive `Clone`).

use std::future::Future;

use serde::Deserialize;

use crate::error::Result;
use crate::point::Coordinate;

/// One elevation sample as returned by the elevation collaborator.
///
/// The service may return several gridded samples near the queried point.
/// The first sample's `Z` component is the authoritative point elevation;
/// see [`point_elevation`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ElevationSample {
    /// Elevation in meters.
    #[serde(rename = "Z")]
    pub z: f64,
}

/// Asynchronous elevation lookup at a coordinate.
pub trait ElevationLookup: Clone + Send + Sync + 'static {
    /// Fetch elevation samples at `coordinate`.
    ///
    /// An empty vector means the service responded but has no sample at this
    /// point; that is not an error.
    fn elevation_at(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<Vec<ElevationSample>>> + Send;
}

/// Asynchronous building footprint lookup at a coordinate.
pub trait BuildingLookup: Clone + Send + Sync + 'static {
    /// Fetch the building footprint registered at `coordinate`, if any, as
    /// raw GeoJSON text.
    ///
    /// `Ok(None)` means the service responded but no building is registered
    /// at this point; that is not an error.
    fn footprint_at(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Select the authoritative point elevation from a sample list.
///
/// The collaborator may return several samples near the click; the first one
/// is the point elevation. `None` for an empty list.
pub fn point_elevation(samples: &[ElevationSample]) -> Option<f64> {
    samples.first().map(|sample| sample.z)
}
