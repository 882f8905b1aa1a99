//! ride-map core
//!
//! Route acquisition and map-state synchronization for a ride-hailing
//! map screen: position fix, place search, destination selection,
//! directions fetch, polyline decode, and one reconciled screen state.

pub mod geo;
pub mod polyline;
pub mod traits;
pub mod location;
pub mod places;
pub mod directions;
pub mod controller;
pub mod screen;
