//! # Distance Computation
//!
//! Decoding of degree-encoded integer location codes and the planar
//! distance between positions.
//!
//! The metric is deliberately planar Euclidean over decoded degrees, not
//! geodesic. The encoding packs both coordinates into one integer so a
//! single ciphertext covers the whole location.

use crate::domain::GeoPoint;

/// Factor separating latitude from longitude in a location code.
const LOCATION_ENCODING_FACTOR: u64 = 10_000;

/// Decode an integer location code into a position.
///
/// `lat = floor(code / 10000)`, `lng = code mod 10000`.
pub fn decode_location(code: u64) -> GeoPoint {
    GeoPoint {
        lat: (code / LOCATION_ENCODING_FACTOR) as f64,
        lng: (code % LOCATION_ENCODING_FACTOR) as f64,
    }
}

/// Planar Euclidean distance between two positions.
pub fn planar_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_diff = a.lat - b.lat;
    let lng_diff = a.lng - b.lng;
    (lat_diff.powi(2) + lng_diff.powi(2)).sqrt()
}

/// Distance from the current position to a decoded location code.
pub fn distance_to_code(current: &GeoPoint, code: u64) -> f64 {
    planar_distance(current, &decode_location(code))
}
