//! Point-enrichment orchestration.
//!
//! [`EnrichmentController`] converts map clicks into two concurrent lookup
//! requests and reconciles their completions into consistent overlay state.
//! Every completion is tagged with the coordinate it was issued for; a
//! completion whose coordinate no longer matches the active click is
//! discarded. That staleness check is the sole mechanism keeping displayed
//! state aligned with the most recent click: no ordering is guaranteed
//! between the two lookups, nor between the lookups of different clicks.
//!
//! Superseded requests are abandoned rather than cancelled. They are
//! idempotent, read-only and short-lived, so letting them complete and
//! dropping their results avoids cancellation-token plumbing entirely.

use geojson::Geometry;
use tokio::sync::{mpsc, watch};

use crate::error::Result;
use crate::lookup::{point_elevation, BuildingLookup, ElevationLookup, ElevationSample};
use crate::outline;
use crate::point::Coordinate;
use crate::state::{ElevationDisplay, EnrichmentState, Phase};

/// A settled lookup, tagged with the coordinate it was issued for.
#[derive(Debug)]
enum LookupOutcome {
    Elevation {
        issued_for: Coordinate,
        result: Result<Vec<ElevationSample>>,
    },
    Outline {
        issued_for: Coordinate,
        result: Result<Option<String>>,
    },
}

impl LookupOutcome {
    fn issued_for(&self) -> Coordinate {
        match self {
            LookupOutcome::Elevation { issued_for, .. }
            | LookupOutcome::Outline { issued_for, .. } => *issued_for,
        }
    }
}

/// Converts map clicks into concurrent lookups and consistent overlay state.
///
/// The controller owns the current click coordinate, in-flight lookup
/// bookkeeping, and the derived display values. All mutation happens through
/// `&mut self` on the owning task; spawned lookup tasks communicate only by
/// sending tagged outcome messages back over a channel, so the controller
/// runs correctly on any tokio runtime flavor without locking.
///
/// # Example
///
/// ```ignore
/// let mut controller = EnrichmentController::new(elevation, buildings);
///
/// controller.handle_click(Coordinate::new(10.4, 63.4));
/// controller.settle().await;
///
/// println!("{}", controller.state().elevation);
/// ```
pub struct EnrichmentController<E, B> {
    elevation: E,
    buildings: B,
    state: EnrichmentState,
    phase: Phase,
    /// Lookups spawned but not yet received, across all clicks.
    in_flight: usize,
    outcome_tx: mpsc::UnboundedSender<LookupOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<LookupOutcome>,
    snapshot_tx: watch::Sender<EnrichmentState>,
}

impl<E, B> EnrichmentController<E, B>
where
    E: ElevationLookup,
    B: BuildingLookup,
{
    /// Create a controller over the two lookup collaborators.
    ///
    /// The state starts empty: no active coordinate, no outline.
    pub fn new(elevation: E, buildings: B) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(EnrichmentState::default());
        Self {
            elevation,
            buildings,
            state: EnrichmentState::default(),
            phase: Phase::Idle,
            in_flight: 0,
            outcome_tx,
            outcome_rx,
            snapshot_tx,
        }
    }

    /// Current overlay state.
    pub fn state(&self) -> &EnrichmentState {
        &self.state
    }

    /// Current per-click lookup phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Subscribe to read-only state snapshots.
    ///
    /// A snapshot is published after every state change, including the
    /// synchronous one performed by [`handle_click`](Self::handle_click).
    pub fn subscribe(&self) -> watch::Receiver<EnrichmentState> {
        self.snapshot_tx.subscribe()
    }

    /// Handle a map click.
    ///
    /// Synchronously replaces the active coordinate, clears the displayed
    /// outline, resets the elevation readout to pending, and spawns both
    /// lookups as independent non-blocking tasks. Neither lookup waits on
    /// the other; results arrive through the controller's message loop.
    /// In-flight requests for a previous click keep running; their results
    /// are discarded on arrival.
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle_click(&mut self, coordinate: Coordinate) {
        tracing::debug!(lon = coordinate.lon, lat = coordinate.lat, "map click");

        self.state.active = Some(coordinate);
        // A building from the previous point must not linger while the new
        // lookup is pending.
        self.state.outline = None;
        self.state.elevation = ElevationDisplay::Pending;
        self.phase = Phase::PendingBoth;
        self.publish();

        let elevation = self.elevation.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = elevation.elevation_at(coordinate).await;
            let _ = tx.send(LookupOutcome::Elevation {
                issued_for: coordinate,
                result,
            });
        });

        let buildings = self.buildings.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = buildings.footprint_at(coordinate).await;
            let _ = tx.send(LookupOutcome::Outline {
                issued_for: coordinate,
                result,
            });
        });

        self.in_flight += 2;
    }

    /// Process completions until no lookup is in flight for any click.
    ///
    /// Superseded completions are received and discarded along the way, so
    /// after this returns the displayed state reflects the most recent click
    /// with both of its lookups settled.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.outcome_rx.recv().await {
                Some(outcome) => self.apply(outcome),
                None => break,
            }
        }
    }

    /// Run the controller as an actor over a channel of clicks.
    ///
    /// Multiplexes incoming clicks against lookup completions until the
    /// click channel closes, then drains the remaining completions. Consumes
    /// the controller; observe state through [`subscribe`](Self::subscribe).
    pub async fn run(mut self, mut clicks: mpsc::Receiver<Coordinate>) {
        loop {
            tokio::select! {
                click = clicks.recv() => match click {
                    Some(coordinate) => self.handle_click(coordinate),
                    None => break,
                },
                Some(outcome) = self.outcome_rx.recv() => self.apply(outcome),
            }
        }
        self.settle().await;
    }

    /// Apply one completion, discarding it when superseded.
    fn apply(&mut self, outcome: LookupOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        // Reconciliation: a late completion for a superseded click must never
        // overwrite state belonging to a newer click. Expected under rapid
        // re-clicking, so never logged as an error.
        if self.state.active != Some(outcome.issued_for()) {
            tracing::debug!(
                lon = outcome.issued_for().lon,
                lat = outcome.issued_for().lat,
                "discarding superseded lookup result"
            );
            return;
        }

        match outcome {
            LookupOutcome::Elevation { result, .. } => {
                self.state.elevation = match result {
                    Ok(samples) => match point_elevation(&samples) {
                        Some(meters) => ElevationDisplay::Meters(meters),
                        None => ElevationDisplay::Unavailable,
                    },
                    Err(error) => {
                        tracing::warn!(error = %error, "elevation lookup failed");
                        ElevationDisplay::Unavailable
                    }
                };
                self.phase = match self.phase {
                    Phase::PendingBoth => Phase::PendingOutline,
                    Phase::PendingElevation => Phase::Settled,
                    other => other,
                };
            }
            LookupOutcome::Outline { result, .. } => {
                self.state.outline = footprint_geometry(result);
                self.phase = match self.phase {
                    Phase::PendingBoth => Phase::PendingElevation,
                    Phase::PendingOutline => Phase::Settled,
                    other => other,
                };
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.clone());
    }
}

/// A fully merged enrichment result for a single coordinate.
///
/// Produced by [`enrich_once`] for surfaces where there is exactly one click
/// per invocation (CLI queries, HTTP requests) and supersession cannot occur.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPoint {
    /// The queried coordinate.
    pub coordinate: Coordinate,
    /// Authoritative point elevation in meters, when the lookup produced a
    /// sample.
    pub elevation: Option<f64>,
    /// Building footprint at the point, when one exists.
    pub outline: Option<Geometry>,
}

/// Enrich a single coordinate with both lookups running concurrently.
///
/// Applies the same merging policy as the controller: the first elevation
/// sample wins, and footprint failures degrade to an absent outline. Lookup
/// failures are absorbed, never propagated.
pub async fn enrich_once<E, B>(elevation: &E, buildings: &B, coordinate: Coordinate) -> EnrichedPoint
where
    E: ElevationLookup,
    B: BuildingLookup,
{
    let (samples, footprint) = tokio::join!(
        elevation.elevation_at(coordinate),
        buildings.footprint_at(coordinate),
    );

    let meters = match samples {
        Ok(samples) => point_elevation(&samples),
        Err(error) => {
            tracing::warn!(error = %error, "elevation lookup failed");
            None
        }
    };

    EnrichedPoint {
        coordinate,
        elevation: meters,
        outline: footprint_geometry(footprint),
    }
}

/// Map an outline lookup result to renderable geometry.
///
/// The footprint is supplementary: failures and unparseable payloads are
/// absorbed as "no outline available" rather than surfaced to the user.
fn footprint_geometry(result: Result<Option<String>>) -> Option<Geometry> {
    let text = match result {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(error = %error, "building lookup failed");
            return None;
        }
    };

    match outline::parse_footprint(&text) {
        Ok(geometry) => Some(geometry),
        Err(error) => {
            tracing::debug!(error = %error, "unusable footprint payload");
            None
        }
    }
}
