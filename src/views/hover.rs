//! Nearest-point lookup for map hover tooltips
//!
//! A linear scan per pointer event; fine for a single ride, a spatial index
//! would be the next step for much larger tracks.

use serde::Serialize;

use crate::constants::EARTH_RADIUS_METERS;
use crate::models::GpsPoint;

/// Great-circle distance in metres
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Point found under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverHit {
    pub point: GpsPoint,
    pub distance_m: f64,
}

/// Closest point to `(lat, lon)`, if it lies within `radius_m`
///
/// Ties go to the earliest point.
pub fn nearest_point(
    points: impl IntoIterator<Item = GpsPoint>,
    lat: f64,
    lon: f64,
    radius_m: f64,
) -> Option<HoverHit> {
    let mut best: Option<HoverHit> = None;

    for point in points {
        let distance_m = haversine_meters(lat, lon, point.lat, point.lon);
        if best.is_none_or(|hit| distance_m < hit.distance_m) {
            best = Some(HoverHit { point, distance_m });
        }
    }

    best.filter(|hit| hit.distance_m < radius_m)
}
