use geo::Point;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
///
/// Backed by a `geo::Point`, so `x` is longitude and `y` is latitude.
///
/// # Examples
///
/// ```
/// use poimerge_types::point::GeoCoordinate;
///
/// let bergen = GeoCoordinate::new(60.3913, 5.3221);
/// assert_eq!(bergen.latitude(), 60.3913);
/// assert_eq!(bergen.longitude(), 5.3221);
/// assert_eq!(bergen.to_point().x(), 5.3221);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    point: Point<f64>,
}

impl GeoCoordinate {
    /// Create a coordinate from latitude and longitude (in that order).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            point: Point::new(longitude, latitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    /// The underlying `geo` point (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point<f64> {
        self.point
    }
}

impl From<Point<f64>> for GeoCoordinate {
    fn from(point: Point<f64>) -> Self {
        Self { point }
    }
}

impl From<GeoCoordinate> for Point<f64> {
    fn from(coord: GeoCoordinate) -> Self {
        coord.point
    }
}
