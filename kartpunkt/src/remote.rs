//! HTTP lookup clients.
//!
//! This module provides `reqwest`-backed implementations of the two lookup
//! traits. It is only available when the `remote` feature is enabled.
//!
//! Both clients are configured with a URL template; `{lon}` and `{lat}`
//! placeholders are substituted with the queried coordinate. The named
//! constructors target the Norwegian public services the wire formats
//! originate from:
//!
//! - **Geonorge høydedata** - point elevation from the national elevation
//!   model, returned as an array of `{"Z": ...}` samples
//! - **FKB bygning** - building footprints from the national base map,
//!   returned as GeoJSON text under `FkbData.BygningsOmriss`

use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;
use crate::lookup::{BuildingLookup, ElevationLookup, ElevationSample};
use crate::point::Coordinate;

/// Default timeout for lookup requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default URL template for the Geonorge høydedata point endpoint.
pub const GEONORGE_ELEVATION_URL: &str =
    "https://ws.geonorge.no/hoydedata/v1/punkt?ost={lon}&nord={lat}&koordsys=4258";

/// Default URL template for the FKB building footprint endpoint.
pub const FKB_BUILDING_URL: &str =
    "https://ws.geonorge.no/fkb/v1/bygning?ost={lon}&nord={lat}&koordsys=4258";

/// Configuration for an HTTP lookup client.
///
/// # Example
///
/// ```
/// use kartpunkt::remote::LookupConfig;
///
/// let config = LookupConfig::with_url_template(
///     "https://example.com/elevation?lon={lon}&lat={lat}",
/// )
/// .timeout_secs(5);
/// assert_eq!(config.timeout_secs, 5);
/// ```
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// URL template with `{lon}` and `{lat}` placeholders.
    pub url_template: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl LookupConfig {
    /// Create a configuration from a URL template.
    ///
    /// The template must contain `{lon}` and `{lat}` placeholders.
    pub fn with_url_template(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Substitute the `{lon}` and `{lat}` placeholders in a URL template.
fn render_url(template: &str, coordinate: Coordinate) -> String {
    template
        .replace("{lon}", &coordinate.lon.to_string())
        .replace("{lat}", &coordinate.lat.to_string())
}

/// Elevation lookup over HTTP.
#[derive(Debug, Clone)]
pub struct HttpElevationLookup {
    client: reqwest::Client,
    url_template: String,
}

impl HttpElevationLookup {
    /// Create a lookup against the Geonorge høydedata endpoint.
    pub fn geonorge() -> Result<Self> {
        Self::new(LookupConfig::with_url_template(GEONORGE_ELEVATION_URL))
    }

    /// Create a lookup from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created
    /// (e.g. TLS initialization failure).
    pub fn new(config: LookupConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            url_template: config.url_template,
        })
    }
}

impl ElevationLookup for HttpElevationLookup {
    async fn elevation_at(&self, coordinate: Coordinate) -> Result<Vec<ElevationSample>> {
        let url = render_url(&self.url_template, coordinate);
        tracing::debug!(url = %url, "elevation request");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let samples: Vec<ElevationSample> = response.json().await?;

        tracing::debug!(samples = samples.len(), "elevation response");
        Ok(samples)
    }
}

/// Building footprint lookup over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBuildingLookup {
    client: reqwest::Client,
    url_template: String,
}

impl HttpBuildingLookup {
    /// Create a lookup against the FKB building endpoint.
    pub fn fkb() -> Result<Self> {
        Self::new(LookupConfig::with_url_template(FKB_BUILDING_URL))
    }

    /// Create a lookup from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: LookupConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            url_template: config.url_template,
        })
    }
}

/// Envelope returned by the building collaborator. Every level is optional:
/// an empty envelope means no building is registered at the point.
#[derive(Debug, Deserialize)]
struct BuildingResponse {
    #[serde(rename = "FkbData")]
    fkb_data: Option<FkbData>,
}

#[derive(Debug, Deserialize)]
struct FkbData {
    #[serde(rename = "BygningsOmriss")]
    bygnings_omriss: Option<String>,
}

impl BuildingLookup for HttpBuildingLookup {
    async fn footprint_at(&self, coordinate: Coordinate) -> Result<Option<String>> {
        let url = render_url(&self.url_template, coordinate);
        tracing::debug!(url = %url, "building footprint request");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let payload: BuildingResponse = response.json().await?;

        Ok(payload.fkb_data.and_then(|data| data.bygnings_omriss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_url() {
        let url = render_url(
            "https://example.com/punkt?ost={lon}&nord={lat}",
            Coordinate::new(10.4, 63.4),
        );
        assert_eq!(url, "https://example.com/punkt?ost=10.4&nord=63.4");
    }

    #[test]
    fn test_config_defaults() {
        let config = LookupConfig::with_url_template("https://example.com/{lon}/{lat}");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let config = config.timeout_secs(3);
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_building_response_with_footprint() {
        let payload: BuildingResponse = serde_json::from_str(
            r#"{"FkbData": {"BygningsOmriss": "{\"type\":\"Polygon\",\"coordinates\":[]}"}}"#,
        )
        .unwrap();
        let text = payload.fkb_data.and_then(|data| data.bygnings_omriss);
        assert!(text.unwrap().contains("Polygon"));
    }

    #[test]
    fn test_building_response_absent_levels() {
        let payload: BuildingResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(payload.fkb_data.is_none());

        let payload: BuildingResponse = serde_json::from_str(r#"{"FkbData": {}}"#).unwrap();
        assert!(payload.fkb_data.unwrap().bygnings_omriss.is_none());
    }

    #[test]
    fn test_elevation_samples_decode() {
        let samples: Vec<ElevationSample> =
            serde_json::from_str(r#"[{"Z": 163.7}, {"Z": 164.1}]"#).unwrap();
        assert_eq!(samples[0].z, 163.7);
    }
}
