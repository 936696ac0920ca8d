// src/model/geo.rs

//! Flat-Earth distance approximation and nearest-facility lookup.

use crate::model::network::Position;

/// Approximate kilometers per degree at the equator.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Euclidean distance in degree space scaled to kilometers.
///
/// Not geodesically accurate, but consistent for coarse assignment decisions.
pub fn distance(a: &Position, b: &Position) -> f64 {
    let d_lat = a.lat - b.lat;
    let d_lon = a.lon - b.lon;
    (d_lat * d_lat + d_lon * d_lon).sqrt() * KM_PER_DEGREE
}

/// Index and distance of the facility closest to `from`.
///
/// Ties go to the first minimal index. Returns `None` if `facilities` is empty.
pub fn nearest_facility(from: &Position, facilities: &[Position]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, facility) in facilities.iter().enumerate() {
        let d = distance(from, facility);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((idx, d)),
        }
    }
    best
}
