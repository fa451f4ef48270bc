//! Error types for the kartpunkt library.

use thiserror::Error;

/// Errors produced by lookup collaborators and footprint parsing.
///
/// Empty responses are not errors: lookups model "service responded, no data
/// at this point" as `Ok(None)` or an empty sample list. Superseded responses
/// are not errors either; the controller drops them silently.
#[derive(Error, Debug)]
pub enum LookupError {
    /// HTTP transport failure from a remote lookup.
    #[cfg(feature = "remote")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A lookup collaborator failed for a non-transport reason.
    #[error("lookup failed: {0}")]
    Failed(String),

    /// A footprint payload was not valid GeoJSON.
    #[error("invalid footprint payload: {0}")]
    InvalidGeoJson(#[from] geojson::Error),

    /// A footprint payload parsed, but carried no polygon or multipolygon.
    #[error("unsupported footprint geometry: {0}")]
    UnsupportedGeometry(&'static str),
}

/// Result type alias using [`LookupError`].
pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LookupError::Failed("service offline".to_string());
        assert!(err.to_string().contains("service offline"));

        let err = LookupError::UnsupportedGeometry("Point");
        assert!(err.to_string().contains("Point"));
    }
}
