//! # Kartpunkt - map point enrichment
//!
//! Library for enriching a clicked map coordinate with terrain elevation and
//! building footprint data from two independent lookup services.
//!
//! ## Features
//!
//! - **Concurrent**: both lookups run as independent tasks; neither waits on
//!   the other
//! - **Consistent**: results are reconciled against the most recent click, so
//!   a slow response for an old click never overwrites newer overlay state
//! - **Forgiving**: lookup failures degrade to "unavailable"/absent display
//!   values; the map stays interactive regardless of lookup outcomes
//!
//! ## Quick Start
//!
//! ```ignore
//! use kartpunkt::{Coordinate, EnrichmentController};
//! use kartpunkt::remote::{HttpBuildingLookup, HttpElevationLookup};
//!
//! let elevation = HttpElevationLookup::geonorge()?;
//! let buildings = HttpBuildingLookup::fkb()?;
//!
//! let mut controller = EnrichmentController::new(elevation, buildings);
//! let snapshots = controller.subscribe();
//!
//! // Every click replaces the active coordinate and re-triggers both lookups
//! controller.handle_click(Coordinate::new(10.40565, 63.41566));
//! controller.settle().await;
//!
//! println!("{}", controller.state().elevation); // e.g. "12 m"
//! ```
//!
//! ## Wire Formats
//!
//! The elevation collaborator returns a JSON array of `{"Z": <meters>}`
//! samples; the first sample is authoritative. The building collaborator
//! returns `{"FkbData": {"BygningsOmriss": "<GeoJSON text>"}}` with every
//! level optional; the embedded text is parsed into structured geometry
//! before use.

pub mod controller;
pub mod error;
pub mod lookup;
pub mod outline;
pub mod point;
pub mod state;

#[cfg(feature = "remote")]
pub mod remote;

// Re-export main types at crate root for convenience
pub use controller::{enrich_once, EnrichedPoint, EnrichmentController};
pub use error::{LookupError, Result};
pub use lookup::{point_elevation, BuildingLookup, ElevationLookup, ElevationSample};
pub use point::Coordinate;
pub use state::{ElevationDisplay, EnrichmentState, Phase};
