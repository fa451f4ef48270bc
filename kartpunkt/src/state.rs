//! Display state owned by the enrichment controller.

use geojson::Geometry;

use crate::point::Coordinate;

/// Elevation readout for the active click point.
///
/// The three variants are deliberately distinguishable so a view can render
/// "still fetching", "fetch failed", and an actual value of `0` differently.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ElevationDisplay {
    /// The lookup for the active coordinate has not settled yet.
    #[default]
    Pending,
    /// The lookup failed, or returned no sample at this point.
    Unavailable,
    /// Authoritative elevation in meters.
    Meters(f64),
}

impl std::fmt::Display for ElevationDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElevationDisplay::Pending => write!(f, "Loading elevation..."),
            ElevationDisplay::Unavailable => write!(f, "No elevation data"),
            ElevationDisplay::Meters(meters) => write!(f, "{meters:.0} m"),
        }
    }
}

/// Per-click lookup lifecycle.
///
/// A new click at any phase transitions back to [`Phase::PendingBoth`] with a
/// new coordinate. In-flight requests for the old coordinate are abandoned,
/// not cancelled; their results are discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No click has happened yet.
    #[default]
    Idle,
    /// Both lookups are in flight for the active coordinate.
    PendingBoth,
    /// The outline has settled; the elevation lookup is still in flight.
    PendingElevation,
    /// The elevation has settled; the outline lookup is still in flight.
    PendingOutline,
    /// Both lookups have settled for the active coordinate.
    Settled,
}

/// Snapshot of the overlay state derived from the most recent click.
///
/// Owned and mutated exclusively by the controller. Views receive read-only
/// clones through [`subscribe`](crate::controller::EnrichmentController::subscribe);
/// the displayed `elevation` and `outline` always correspond to `active`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichmentState {
    /// The most recently clicked coordinate, if any.
    pub active: Option<Coordinate>,
    /// Elevation readout for `active`.
    pub elevation: ElevationDisplay,
    /// Building footprint overlay for `active`, when one exists.
    pub outline: Option<Geometry>,
}
