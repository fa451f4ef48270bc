//! Geographic coordinate passed between the view and the lookups.

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees (WGS84), longitude first.
///
/// Produced by a map click event; consumed by both lookups. Immutable once
/// created. Longitude is expected in [-180, 180] and latitude in [-90, 90];
/// values outside these ranges are a collaborator contract violation and are
/// not validated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Latitude in decimal degrees.
    pub lat: f64,
}

impl Coordinate {
    /// Create a new coordinate from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lon, self.lat)
    }
}
