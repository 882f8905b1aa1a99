//! Shared fixtures for ride-map tests.
//!
//! Coordinates sit around the Monterey Bay area. The encoded geometry
//! is the reference vector published with the polyline scheme, so its
//! decoded points are known exactly.

#![allow(dead_code)]

use ride_map::geo::GeoPoint;
use ride_map::places::PlaceCandidate;

// ============================================================================
// Locations
// ============================================================================

/// Rider's position when the screen opens.
pub const RIDER: GeoPoint = GeoPoint {
    latitude: 37.0,
    longitude: -122.0,
};

pub const HARBOR: GeoPoint = GeoPoint {
    latitude: 36.9626,
    longitude: -122.0019,
};

pub const BOARDWALK: GeoPoint = GeoPoint {
    latitude: 36.9644,
    longitude: -122.0177,
};

pub const WHARF: GeoPoint = GeoPoint {
    latitude: 36.9617,
    longitude: -122.0247,
};

// ============================================================================
// Route geometry
// ============================================================================

/// Reference encoded polyline; decodes to [`geometry_points`].
pub const GEOMETRY: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

/// The three points [`GEOMETRY`] encodes.
pub fn geometry_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(38.5, -120.2),
        GeoPoint::new(40.7, -120.95),
        GeoPoint::new(43.252, -126.453),
    ]
}

// ============================================================================
// Builders
// ============================================================================

pub fn candidate(id: &str, name: &str, location: GeoPoint) -> PlaceCandidate {
    PlaceCandidate {
        id: id.to_string(),
        name: name.to_string(),
        address: format!("{name}, Santa Cruz, CA"),
        location,
    }
}

pub fn assert_points_close(actual: &[GeoPoint], expected: &[GeoPoint]) {
    assert_eq!(actual.len(), expected.len(), "point count mismatch");
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a.latitude - e.latitude).abs() < 1e-6 && (a.longitude - e.longitude).abs() < 1e-6,
            "point {a} != {e}"
        );
    }
}
