//! Service seams for the map screen core.
//!
//! These are intentionally minimal. The HTTP clients in this crate
//! implement the remote seams; a platform shell implements the position
//! seam; tests substitute any of them.

use async_trait::async_trait;

use crate::directions::RouteError;
use crate::geo::GeoPoint;
use crate::location::LocationError;
use crate::places::{PlaceCandidate, SearchError};
use crate::polyline::RoutePath;

/// Outcome of a platform location-permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
}

/// Produces a device position fix on demand.
///
/// The permission prompt and the underlying platform service both live
/// behind this seam; [`crate::location::LocationTracker`] only sequences
/// the two calls.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Asks for foreground location permission.
    async fn request_permission(&self) -> PermissionDecision;

    /// Resolves one position fix.
    async fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

/// Searches a places service for candidate destinations near a point.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Free-text search around `near`, bounded by `radius_m` meters.
    /// An empty query is passed through unchanged; what it returns is
    /// the service's affair.
    async fn search(
        &self,
        query: &str,
        near: GeoPoint,
        radius_m: u32,
    ) -> Result<Vec<PlaceCandidate>, SearchError>;
}

/// Fetches a driving route between two points from a directions
/// service.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Requests the best route from `origin` to `destination`, decoded
    /// into path order.
    async fn fetch_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RoutePath, RouteError>;
}
