//! Great-circle distance between coordinates.

use geo::{Distance, Haversine};
use poimerge_types::GeoCoordinate;

/// Mean Earth radius in meters, the radius `geo`'s haversine metric uses.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Haversine distance in meters.
///
/// # Examples
///
/// ```rust
/// use poimerge::compute::distance::haversine_distance;
/// use poimerge_types::GeoCoordinate;
///
/// let oslo = GeoCoordinate::new(59.9139, 10.7522);
/// let bergen = GeoCoordinate::new(60.3913, 5.3221);
/// let dist = haversine_distance(&oslo, &bergen);
/// assert!(dist > 300_000.0 && dist < 310_000.0);
/// ```
#[inline]
pub fn haversine_distance(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    Haversine.distance(a.to_point(), b.to_point())
}

/// Coordinate `meters` due north of `origin` on the haversine sphere.
///
/// Used to construct pairs at an exact separation.
pub fn offset_north(origin: &GeoCoordinate, meters: f64) -> GeoCoordinate {
    let delta_deg = (meters / EARTH_RADIUS_METERS).to_degrees();
    GeoCoordinate::new(origin.latitude() + delta_deg, origin.longitude())
}
