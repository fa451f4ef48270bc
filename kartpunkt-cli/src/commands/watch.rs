//! Interactive mode: stdin lines as map clicks.
//!
//! Each `lon lat` line is handled exactly like a click on a map view: it
//! replaces the active coordinate and re-triggers both lookups. Typing a new
//! line before the previous one has settled supersedes it, and the stale
//! responses are discarded when they arrive.

use anyhow::Result;
use kartpunkt::remote::{HttpBuildingLookup, HttpElevationLookup};
use kartpunkt::{outline, Coordinate, EnrichmentController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub async fn run(elevation: HttpElevationLookup, buildings: HttpBuildingLookup) -> Result<()> {
    let controller = EnrichmentController::new(elevation, buildings);
    let mut snapshots = controller.subscribe();
    let (click_tx, click_rx) = mpsc::channel(16);

    // Rendering layer: print every published snapshot. Ends when the
    // controller (and with it the watch sender) is dropped.
    let renderer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let state = snapshots.borrow_and_update().clone();
            let Some(active) = state.active else {
                continue;
            };
            match &state.outline {
                Some(geometry) => println!(
                    "[{active}] {} | building: {} vertices",
                    state.elevation,
                    outline::vertex_count(geometry)
                ),
                None => println!("[{active}] {}", state.elevation),
            }
        }
    });

    // Click source: one coordinate per stdin line.
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match parse_click(trimmed) {
                Some(coordinate) => {
                    if click_tx.send(coordinate).await.is_err() {
                        break;
                    }
                }
                None => eprintln!("expected `lon lat`, got: {trimmed}"),
            }
        }
    });

    controller.run(click_rx).await;
    let _ = reader.await;
    let _ = renderer.await;
    Ok(())
}

/// Parse a `lon lat` input line. Comma and tab separators are accepted.
fn parse_click(line: &str) -> Option<Coordinate> {
    let mut parts = line.split([' ', ',', '\t']).filter(|part| !part.is_empty());
    let lon: f64 = parts.next()?.parse().ok()?;
    let lat: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinate::new(lon, lat))
}
