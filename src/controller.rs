//! Map screen state reconciliation.
//!
//! All mutable screen state lives here: origin fix, viewport, search
//! results, selected destination, decoded route, and the route phase.
//! Every trigger (position fix, search outcome, destination selection,
//! route completion) funnels through one method on
//! [`MapStateController`], so no two pieces of state can drift apart.
//! The controller is pure and synchronous; I/O belongs to the callers.

use crate::directions::RouteError;
use crate::geo::{GeoPoint, Viewport};
use crate::places::{PlaceCandidate, SearchError};
use crate::polyline::RoutePath;

/// Where the current destination's route stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoutePhase {
    /// No destination selected.
    #[default]
    Idle,
    /// A destination is selected and its directions request is in
    /// flight.
    Pending,
    /// The route decoded and is displayed.
    Ready,
    /// The directions request failed; no route is displayed until the
    /// next selection.
    Failed,
}

/// Tag for one issued route request.
///
/// Carries the generation the request was made under. A completion is
/// applied only while that generation is still current, so the latest
/// selection wins regardless of arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub generation: u64,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

/// What applying a route completion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The completion matched the current selection; the route is live.
    Ready,
    /// The completion matched the current selection but carried a
    /// failure.
    Failed,
    /// The completion belonged to a superseded selection and was
    /// discarded without touching any state.
    Stale,
}

/// Single source of truth for the map screen.
#[derive(Debug, Default)]
pub struct MapStateController {
    origin: Option<GeoPoint>,
    viewport: Option<Viewport>,
    search_results: Vec<PlaceCandidate>,
    destination: Option<GeoPoint>,
    route: RoutePath,
    phase: RoutePhase,
    route_error: Option<RouteError>,
    search_error: Option<String>,
    generation: u64,
}

impl MapStateController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a resolved position fix.
    ///
    /// The fix becomes the route origin. The viewport recenters on it
    /// at the focus span unless a destination is already selected; a
    /// selected destination keeps viewport precedence.
    pub fn apply_fix(&mut self, fix: GeoPoint) {
        self.origin = Some(fix);
        if self.destination.is_none() {
            self.viewport = Some(Viewport::focused_on(fix));
        }
    }

    /// Replaces the search-result list wholesale and clears any
    /// recorded search failure.
    pub fn set_search_results(&mut self, results: Vec<PlaceCandidate>) {
        self.search_results = results;
        self.search_error = None;
    }

    /// Records a failed search: the candidate list empties and a
    /// display summary of the failure is kept.
    pub fn record_search_failure(&mut self, error: &SearchError) {
        self.search_results.clear();
        self.search_error = Some(error.to_string());
    }

    /// Selects a destination, from a search tap or a dragged pin.
    ///
    /// Returns `None` without touching any state when no origin fix
    /// exists, since there is nothing to route from. Otherwise the
    /// selection applies atomically: stale search results drop, the
    /// viewport recenters on the destination, any displayed route
    /// clears, and the returned request tags the route fetch the caller
    /// must now issue.
    pub fn select_destination(&mut self, destination: GeoPoint) -> Option<RouteRequest> {
        let origin = self.origin?;

        self.search_results.clear();
        self.destination = Some(destination);
        self.viewport = Some(Viewport::focused_on(destination));
        self.route = RoutePath::default();
        self.route_error = None;
        self.phase = RoutePhase::Pending;
        self.generation += 1;

        Some(RouteRequest {
            generation: self.generation,
            origin,
            destination,
        })
    }

    /// Applies a route fetch completion.
    ///
    /// A completion whose request generation no longer matches the
    /// current one belongs to a superseded selection and is discarded
    /// whole, success or failure alike: the last selection wins by
    /// request order, not completion order. Route completions never
    /// move the viewport.
    pub fn apply_route(
        &mut self,
        request: &RouteRequest,
        result: Result<RoutePath, RouteError>,
    ) -> RouteOutcome {
        if request.generation != self.generation {
            tracing::debug!(
                stale = request.generation,
                current = self.generation,
                "discarding route completion for superseded destination"
            );
            return RouteOutcome::Stale;
        }

        match result {
            Ok(path) => {
                tracing::debug!(points = path.len(), "route applied");
                self.route = path;
                self.phase = RoutePhase::Ready;
                self.route_error = None;
                RouteOutcome::Ready
            }
            Err(error) => {
                tracing::warn!(%error, "route request failed");
                self.route = RoutePath::default();
                self.phase = RoutePhase::Failed;
                self.route_error = Some(error);
                RouteOutcome::Failed
            }
        }
    }

    pub fn origin(&self) -> Option<GeoPoint> {
        self.origin
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        self.destination
    }

    pub fn search_results(&self) -> &[PlaceCandidate] {
        &self.search_results
    }

    /// The displayed route. Empty whenever the phase is not
    /// [`RoutePhase::Ready`].
    pub fn route(&self) -> &RoutePath {
        &self.route
    }

    pub fn phase(&self) -> RoutePhase {
        self.phase
    }

    /// The failure behind a [`RoutePhase::Failed`] phase, if any.
    pub fn last_route_error(&self) -> Option<&RouteError> {
        self.route_error.as_ref()
    }

    /// Display summary of the most recent search failure. Cleared by
    /// the next successful search.
    pub fn last_search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }
}
