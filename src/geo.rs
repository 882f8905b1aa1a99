//! Geographic value types shared across the crate.
//!
//! Coordinates are WGS-84 degrees. Everything here is plain data;
//! nothing talks to the network or the platform.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Span applied to both viewport axes when centering on a position fix
/// or a freshly selected destination, in degrees.
pub const FOCUS_SPAN_DEG: f64 = 0.007;

/// A geographic position in WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the point lies inside the valid WGS-84 range
    /// (latitude within ±90°, longitude within ±180°).
    pub fn in_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    /// Renders as `lat,lng`, the form the remote map services accept in
    /// query parameters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// The visible map extent: a center plus an angular span per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

impl Viewport {
    pub fn new(center: GeoPoint, latitude_span: f64, longitude_span: f64) -> Self {
        Self {
            center,
            latitude_span,
            longitude_span,
        }
    }

    /// Viewport centered on `center` at the fixed focus span.
    pub fn focused_on(center: GeoPoint) -> Self {
        Self::new(center, FOCUS_SPAN_DEG, FOCUS_SPAN_DEG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_accepts_extremes() {
        assert!(GeoPoint::new(90.0, 180.0).in_bounds());
        assert!(GeoPoint::new(-90.0, -180.0).in_bounds());
        assert!(GeoPoint::new(0.0, 0.0).in_bounds());
    }

    #[test]
    fn test_in_bounds_rejects_out_of_range() {
        assert!(!GeoPoint::new(90.1, 0.0).in_bounds());
        assert!(!GeoPoint::new(0.0, -180.5).in_bounds());
    }

    #[test]
    fn test_display_is_comma_separated() {
        let point = GeoPoint::new(37.0, -122.0);
        assert_eq!(point.to_string(), "37,-122");

        let point = GeoPoint::new(36.9644, -122.0177);
        assert_eq!(point.to_string(), "36.9644,-122.0177");
    }

    #[test]
    fn test_focused_on_uses_fixed_span() {
        let center = GeoPoint::new(37.0, -122.0);
        let viewport = Viewport::focused_on(center);

        assert_eq!(viewport.center, center);
        assert_eq!(viewport.latitude_span, FOCUS_SPAN_DEG);
        assert_eq!(viewport.longitude_span, FOCUS_SPAN_DEG);
    }
}
