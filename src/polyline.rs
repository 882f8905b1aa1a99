//! Encoded-polyline codec and the decoded route geometry type.
//!
//! Route geometries arrive from the directions service as compact ASCII
//! strings: latitude/longitude deltas scaled by 1e5, zig-zag signed,
//! split into 5-bit chunks carried least-significant-first in bytes
//! offset by 63, with bit 0x20 marking a continuation. Decoding happens
//! here at the boundary; the rest of the crate works on [`GeoPoint`]
//! sequences.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;

/// Grid resolution of the encoding (1e-5 degrees).
const SCALE: f64 = 1e5;

/// Printable offset added to every encoded byte.
const OFFSET: u8 = 63;

/// Highest byte the encoding can produce (`OFFSET + 0x3f`).
const MAX_BYTE: u8 = 126;

/// Bit marking "more chunks follow" within a decoded chunk.
const CONTINUATION: u64 = 0x20;

/// Payload bits of each chunk.
const CHUNK_MASK: u64 = 0x1f;

/// Highest chunk shift a real coordinate delta can need. A value still
/// continuing past this is treated as corruption rather than decoded
/// into a nonsense coordinate.
const MAX_SHIFT: u32 = 30;

/// Failure while decoding an encoded polyline.
///
/// The decoder consumes untrusted network bytes; truncation, foreign
/// bytes, and runaway continuation runs all surface here instead of
/// producing garbage points.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPolyline {
    /// Input ended while the current value still had its continuation
    /// bit set (or mid coordinate pair).
    #[error("polyline ends mid-value at byte {offset}")]
    UnexpectedEnd { offset: usize },

    /// A byte outside the `?`..=`~` alphabet of the encoding.
    #[error("byte {byte:#04x} at offset {offset} is outside the polyline alphabet")]
    InvalidByte { offset: usize, byte: u8 },

    /// A single value ran past any plausible coordinate delta.
    #[error("oversized coordinate value starting at byte {offset}")]
    Oversized { offset: usize },
}

/// Decodes an encoded polyline into its coordinate sequence, in path
/// order.
///
/// Yields exactly the points the input encodes and performs no range
/// validation on them; callers wanting strict WGS-84 bounds check
/// [`GeoPoint::in_bounds`] themselves. The empty string decodes to an
/// empty sequence.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, MalformedPolyline> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut cursor = 0usize;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while cursor < bytes.len() {
        lat += next_delta(bytes, &mut cursor)?;
        lng += next_delta(bytes, &mut cursor)?;
        points.push(GeoPoint::new(lat as f64 / SCALE, lng as f64 / SCALE));
    }

    Ok(points)
}

/// Reads one zig-zag varint starting at `*cursor`, advancing the cursor
/// past the consumed bytes.
fn next_delta(bytes: &[u8], cursor: &mut usize) -> Result<i64, MalformedPolyline> {
    let start = *cursor;
    let mut shift = 0u32;
    let mut value = 0u64;

    loop {
        let Some(&byte) = bytes.get(*cursor) else {
            return Err(MalformedPolyline::UnexpectedEnd { offset: *cursor });
        };
        if !(OFFSET..=MAX_BYTE).contains(&byte) {
            return Err(MalformedPolyline::InvalidByte {
                offset: *cursor,
                byte,
            });
        }
        if shift > MAX_SHIFT {
            return Err(MalformedPolyline::Oversized { offset: start });
        }
        *cursor += 1;

        let chunk = (byte - OFFSET) as u64;
        value |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    // Zig-zag: even values fold back to positive, odd to negative.
    if value & 1 == 0 {
        Ok((value >> 1) as i64)
    } else {
        Ok(!((value >> 1) as i64))
    }
}

/// Encodes a coordinate sequence into the compact polyline form.
///
/// Exact inverse of [`decode`] for coordinates on the 1e-5 degree grid;
/// coordinates off the grid are rounded onto it first.
pub fn encode(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for point in points {
        let lat = (point.latitude * SCALE).round() as i64;
        let lng = (point.longitude * SCALE).round() as i64;
        push_delta(&mut out, lat - prev_lat);
        push_delta(&mut out, lng - prev_lng);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Appends one delta as a zig-zag varint in 5-bit chunks,
/// least-significant-first.
fn push_delta(out: &mut String, delta: i64) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= CONTINUATION {
        out.push((((value & CHUNK_MASK) | CONTINUATION) as u8 + OFFSET) as char);
        value >>= 5;
    }
    out.push((value as u8 + OFFSET) as char);
}

/// A decoded route geometry: the path's coordinates in travel order,
/// origin end first.
///
/// An empty path means "no route displayed". The path is only ever
/// replaced wholesale, never partially rewritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    points: Vec<GeoPoint>,
}

impl RoutePath {
    /// Creates a path from already-decoded coordinate points.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Decodes `encoded` into a path.
    pub fn from_encoded(encoded: &str) -> Result<Self, MalformedPolyline> {
        decode(encoded).map(Self::new)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Consumes the path and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
