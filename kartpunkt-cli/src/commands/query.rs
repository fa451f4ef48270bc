use anyhow::Result;
use kartpunkt::remote::{HttpBuildingLookup, HttpElevationLookup};
use kartpunkt::{enrich_once, outline, Coordinate, ElevationDisplay};
use serde::Serialize;

#[derive(Serialize)]
struct QueryResponse {
    lon: f64,
    lat: f64,
    elevation: Option<f64>,
    outline: Option<geojson::Geometry>,
}

pub async fn run(
    elevation: HttpElevationLookup,
    buildings: HttpBuildingLookup,
    lon: f64,
    lat: f64,
    json: bool,
) -> Result<()> {
    let point = enrich_once(&elevation, &buildings, Coordinate::new(lon, lat)).await;

    if json {
        let response = QueryResponse {
            lon,
            lat,
            elevation: point.elevation,
            outline: point.outline,
        };
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    match point.elevation {
        Some(meters) => println!("elevation: {}", ElevationDisplay::Meters(meters)),
        None => println!("elevation: {}", ElevationDisplay::Unavailable),
    }
    match &point.outline {
        Some(geometry) => println!(
            "building footprint: {} vertices",
            outline::vertex_count(geometry)
        ),
        None => println!("no building at this point"),
    }

    Ok(())
}
