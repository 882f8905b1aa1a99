//! Event-driven driver for the map screen.
//!
//! Wires the location tracker, places client, and directions client to
//! the state controller. UI actions arrive as method calls; route
//! fetches run as spawned tasks and come back as completion events the
//! caller pumps through [`MapScreen::route_completion`]. All state
//! mutation happens on the caller's task, so the controller needs no
//! locking.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::controller::{MapStateController, RouteOutcome, RouteRequest};
use crate::directions::RouteError;
use crate::geo::GeoPoint;
use crate::location::{LocationError, LocationTracker};
use crate::places::{PlaceCandidate, SearchError};
use crate::polyline::RoutePath;
use crate::traits::{DirectionsProvider, PlacesProvider};

/// Tunables for the screen driver.
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    /// Search radius around the origin, in meters.
    pub search_radius_m: u32,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            search_radius_m: 100_000,
        }
    }
}

/// Completion notification delivered back to the screen task.
#[derive(Debug)]
pub enum ScreenEvent {
    RouteResolved {
        request: RouteRequest,
        result: Result<RoutePath, RouteError>,
    },
}

/// Failure surfaced by a screen action.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// No position fix has been acquired yet; searching and routing
    /// both need one.
    #[error("no position fix acquired yet")]
    OriginUnavailable,

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Owns the screen state and the service clients behind it.
pub struct MapScreen {
    state: MapStateController,
    tracker: LocationTracker,
    places: Arc<dyn PlacesProvider>,
    directions: Arc<dyn DirectionsProvider>,
    options: ScreenOptions,
    events_tx: mpsc::UnboundedSender<ScreenEvent>,
    events_rx: mpsc::UnboundedReceiver<ScreenEvent>,
}

impl MapScreen {
    pub fn new(
        tracker: LocationTracker,
        places: Arc<dyn PlacesProvider>,
        directions: Arc<dyn DirectionsProvider>,
    ) -> Self {
        Self::with_options(tracker, places, directions, ScreenOptions::default())
    }

    pub fn with_options(
        tracker: LocationTracker,
        places: Arc<dyn PlacesProvider>,
        directions: Arc<dyn DirectionsProvider>,
        options: ScreenOptions,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: MapStateController::new(),
            tracker,
            places,
            directions,
            options,
            events_tx,
            events_rx,
        }
    }

    /// Acquires the position fix that anchors the screen.
    ///
    /// Failure here is terminal for the screen's primary function: with
    /// no origin there is nothing to search around or route from, so
    /// the error propagates instead of being recorded away.
    pub async fn start(&mut self) -> Result<GeoPoint, ScreenError> {
        let fix = self.tracker.acquire().await?;
        self.state.apply_fix(fix);
        Ok(fix)
    }

    /// Runs a place search around the origin and applies the outcome.
    ///
    /// Returns the candidate count on success. On failure the candidate
    /// list empties, the failure is recorded on the state, and the
    /// typed error also returns to the caller.
    pub async fn submit_search(&mut self, query: &str) -> Result<usize, ScreenError> {
        let Some(origin) = self.state.origin() else {
            return Err(ScreenError::OriginUnavailable);
        };

        match self
            .places
            .search(query, origin, self.options.search_radius_m)
            .await
        {
            Ok(results) => {
                let count = results.len();
                self.state.set_search_results(results);
                Ok(count)
            }
            Err(error) => {
                tracing::warn!(query, %error, "place search failed");
                self.state.record_search_failure(&error);
                Err(error.into())
            }
        }
    }

    /// Selects a searched place as the destination and starts its route
    /// fetch.
    pub fn choose_place(&mut self, place: &PlaceCandidate) -> Result<(), ScreenError> {
        self.select_destination(place.location)
    }

    /// Selects a manually dragged pin position as the destination and
    /// starts its route fetch.
    pub fn drop_pin(&mut self, position: GeoPoint) -> Result<(), ScreenError> {
        self.select_destination(position)
    }

    fn select_destination(&mut self, destination: GeoPoint) -> Result<(), ScreenError> {
        let Some(request) = self.state.select_destination(destination) else {
            return Err(ScreenError::OriginUnavailable);
        };

        tracing::debug!(
            generation = request.generation,
            latitude = destination.latitude,
            longitude = destination.longitude,
            "destination selected, fetching route"
        );

        let directions = Arc::clone(&self.directions);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = directions
                .fetch_route(request.origin, request.destination)
                .await;
            // The receiver only closes when the screen is dropped, at
            // which point the completion has no consumer anyway.
            let _ = events.send(ScreenEvent::RouteResolved { request, result });
        });

        Ok(())
    }

    /// Awaits the next route completion and applies it to the state.
    ///
    /// [`RouteOutcome::Stale`] means the completion belonged to a
    /// superseded selection; callers typically keep pumping. Returns
    /// `None` only if the event channel closes, which cannot happen
    /// while the screen holds its sender.
    pub async fn route_completion(&mut self) -> Option<RouteOutcome> {
        let ScreenEvent::RouteResolved { request, result } = self.events_rx.recv().await?;
        Some(self.state.apply_route(&request, result))
    }

    /// Read access to the reconciled screen state.
    pub fn state(&self) -> &MapStateController {
        &self.state
    }
}
