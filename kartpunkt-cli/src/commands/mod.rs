pub mod query;
pub mod watch;

use anyhow::{Context, Result};
use kartpunkt::remote::{
    HttpBuildingLookup, HttpElevationLookup, LookupConfig, FKB_BUILDING_URL,
    GEONORGE_ELEVATION_URL,
};

/// Build both lookup clients from the CLI options, falling back to the
/// public Norwegian endpoints.
pub fn build_lookups(
    elevation_url: Option<String>,
    buildings_url: Option<String>,
    timeout_secs: u64,
) -> Result<(HttpElevationLookup, HttpBuildingLookup)> {
    let elevation_template = elevation_url.unwrap_or_else(|| GEONORGE_ELEVATION_URL.to_string());
    let buildings_template = buildings_url.unwrap_or_else(|| FKB_BUILDING_URL.to_string());

    let elevation = HttpElevationLookup::new(
        LookupConfig::with_url_template(elevation_template).timeout_secs(timeout_secs),
    )
    .context("Failed to create elevation lookup client")?;

    let buildings = HttpBuildingLookup::new(
        LookupConfig::with_url_template(buildings_template).timeout_secs(timeout_secs),
    )
    .context("Failed to create building lookup client")?;

    Ok((elevation, buildings))
}
