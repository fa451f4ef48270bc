//! Example demonstrating the enrichment controller on stubbed lookups.
//!
//! Run with: cargo run --example click_session

use kartpunkt::{
    BuildingLookup, Coordinate, ElevationLookup, ElevationSample, EnrichmentController, Result,
};

/// Stub elevation service: the whole world is a gentle 42 m plateau.
#[derive(Clone)]
struct FlatWorld;

impl ElevationLookup for FlatWorld {
    async fn elevation_at(&self, _coordinate: Coordinate) -> Result<Vec<ElevationSample>> {
        Ok(vec![ElevationSample { z: 42.0 }])
    }
}

/// Stub building register: one square building east of the prime meridian.
#[derive(Clone)]
struct OneBuilding;

impl BuildingLookup for OneBuilding {
    async fn footprint_at(&self, coordinate: Coordinate) -> Result<Option<String>> {
        if coordinate.lon <= 0.0 {
            return Ok(None);
        }
        Ok(Some(
            r#"{"type":"Polygon","coordinates":
                [[[10.405,63.415],[10.406,63.415],[10.406,63.416],[10.405,63.416],[10.405,63.415]]]}"#
                .to_string(),
        ))
    }
}

#[tokio::main]
async fn main() {
    let mut controller = EnrichmentController::new(FlatWorld, OneBuilding);

    let clicks = [
        ("Trondheim", Coordinate::new(10.40565, 63.41566)),
        ("Mid-Atlantic", Coordinate::new(-30.0, 40.0)),
    ];

    for (name, coordinate) in clicks {
        controller.handle_click(coordinate);
        controller.settle().await;

        let state = controller.state();
        match &state.outline {
            Some(geometry) => println!(
                "{name} ({coordinate}): {} - building with {} vertices",
                state.elevation,
                kartpunkt::outline::vertex_count(geometry)
            ),
            None => println!("{name} ({coordinate}): {} - no building", state.elevation),
        }
    }
}
