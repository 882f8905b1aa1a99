//! Device position acquisition.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::geo::GeoPoint;
use crate::traits::{PermissionDecision, PositionSource};

/// Failure to obtain a position fix.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user declined the location permission prompt.
    #[error("location permission denied")]
    PermissionDenied,

    /// Permission was granted but no fix could be resolved.
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
}

/// Obtains the device position once and holds on to it.
///
/// One-shot: the screen acquires its origin at startup and every route
/// request reuses that fix. Re-acquisition is the caller's affair.
pub struct LocationTracker {
    source: Arc<dyn PositionSource>,
    last_fix: Option<GeoPoint>,
}

impl LocationTracker {
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self {
            source,
            last_fix: None,
        }
    }

    /// Requests permission, then a single fix.
    ///
    /// Fails with [`LocationError::PermissionDenied`] when the user
    /// declines and [`LocationError::PositionUnavailable`] when the
    /// platform cannot produce a fix.
    pub async fn acquire(&mut self) -> Result<GeoPoint, LocationError> {
        if self.source.request_permission().await == PermissionDecision::Denied {
            return Err(LocationError::PermissionDenied);
        }

        let fix = self.source.current_position().await?;
        tracing::debug!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            "position fix acquired"
        );
        self.last_fix = Some(fix);
        Ok(fix)
    }

    /// The most recent successful fix, if any.
    pub fn last_fix(&self) -> Option<GeoPoint> {
        self.last_fix
    }
}

/// Position source pinned to a preset coordinate.
///
/// Always grants permission and always resolves. Serves desktop shells
/// and tests, where no platform location service exists.
#[derive(Debug, Clone)]
pub struct FixedPosition {
    position: GeoPoint,
}

impl FixedPosition {
    pub fn new(position: GeoPoint) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionSource for FixedPosition {
    async fn request_permission(&self) -> PermissionDecision {
        PermissionDecision::Granted
    }

    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        Ok(self.position)
    }
}
