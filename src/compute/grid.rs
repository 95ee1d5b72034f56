//! Cell-bucketed spatial index over coordinates.
//!
//! The plane is cut into rows of fixed latitude height and, within each row,
//! columns of fixed longitude width. Both are sized from the duplicate
//! threshold `T` so that any point within `T` meters of a query lies in the
//! query's cell or one of the eight around it:
//!
//! ```text
//! latitude step  = T / 110_540                       (degrees)
//! longitude step = T / (111_320 * cos(latitude))     (degrees, per row)
//! ```
//!
//! The longitude step of a row is evaluated at the most poleward latitude of
//! the row and its two neighbours, then widened to the exact spherical bound
//! `2 * asin(sin(T / 2R) / cos(latitude))` when that is larger, and rounded
//! up so that a whole number of columns spans 360 degrees. Columns wrap at
//! the antimeridian and rows near a pole collapse into a single column, so
//! the 3x3 block stays a superset of the true neighbourhood everywhere.
//!
//! The grid stores indices into its owner's array, never the values, and it
//! is only a filter: every candidate must still pass an exact distance check.

use crate::config::validate_threshold;
use crate::compute::distance::EARTH_RADIUS_METERS;
use crate::error::Result;
use poimerge_types::GeoCoordinate;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::f64::consts::FRAC_PI_2;

/// Meters per degree of latitude used to size rows.
pub const METERS_PER_DEGREE_LAT: f64 = 110_540.0;

/// Meters per degree of longitude at the equator used to size columns.
pub const METERS_PER_DEGREE_LON: f64 = 111_320.0;

/// Relative widening applied to the column width to absorb rounding.
const STEP_SLACK: f64 = 1e-9;

/// `(row, column)` of a grid cell.
pub type CellKey = (i64, i64);

type Bucket = SmallVec<[usize; 4]>;

/// Fixed-cell spatial index mapping cells to array indices.
///
/// # Examples
///
/// ```
/// use poimerge::compute::grid::SpatialGrid;
/// use poimerge_types::GeoCoordinate;
///
/// let mut grid = SpatialGrid::new(50.0)?;
/// grid.insert(0, &GeoCoordinate::new(61.0, 8.0));
/// grid.insert(1, &GeoCoordinate::new(61.0002, 8.0));
/// grid.insert(2, &GeoCoordinate::new(62.0, 9.0));
///
/// let near = grid.candidates_near(&GeoCoordinate::new(61.0001, 8.0));
/// assert_eq!(near, vec![0, 1]);
/// # Ok::<(), poimerge::PoiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    threshold_meters: f64,
    lat_step_deg: f64,
    buckets: FxHashMap<CellKey, Bucket>,
    /// Cell each stored index lives in, so removal does not need coordinates.
    cells: FxHashMap<usize, CellKey>,
}

impl SpatialGrid {
    /// Create an empty grid sized for `threshold_meters`.
    ///
    /// Fails with `InvalidThreshold` unless the threshold is finite and positive.
    pub fn new(threshold_meters: f64) -> Result<Self> {
        validate_threshold(threshold_meters)?;
        Ok(Self::with_valid_threshold(threshold_meters))
    }

    pub(crate) fn with_valid_threshold(threshold_meters: f64) -> Self {
        Self {
            threshold_meters,
            lat_step_deg: threshold_meters / METERS_PER_DEGREE_LAT,
            buckets: FxHashMap::default(),
            cells: FxHashMap::default(),
        }
    }

    pub fn threshold_meters(&self) -> f64 {
        self.threshold_meters
    }

    /// Height of every row in degrees of latitude.
    pub fn lat_step_deg(&self) -> f64 {
        self.lat_step_deg
    }

    /// Number of indices stored.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains_key(&index)
    }

    /// Cell a coordinate falls into.
    pub fn cell_key(&self, coord: &GeoCoordinate) -> CellKey {
        let row = self.row_of(coord.latitude());
        let (_, col) = self.column_in_row(row, coord.longitude());
        (row, col)
    }

    /// Width of the columns in `row`, in degrees of longitude.
    pub fn lon_step_deg(&self, row: i64) -> f64 {
        360.0 / self.columns_in_row(row) as f64
    }

    /// Add `index` at `coord`. An index already present is moved.
    pub fn insert(&mut self, index: usize, coord: &GeoCoordinate) {
        if self.cells.contains_key(&index) {
            self.remove(index);
        }
        let key = self.cell_key(coord);
        self.buckets.entry(key).or_default().push(index);
        self.cells.insert(index, key);
    }

    /// Drop `index` from its bucket. Returns false if it was not stored.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(key) = self.cells.remove(&index) else {
            return false;
        };

        if let Some(bucket) = self.buckets.get_mut(&key) {
            if let Some(pos) = bucket.iter().position(|&i| i == index) {
                bucket.swap_remove(pos);
            }
            if bucket.is_empty() {
                self.buckets.remove(&key);
            }
        }
        true
    }

    /// Every index in the 3x3 block of cells around `coord`, ascending.
    ///
    /// This over-approximates the set of points within the threshold; callers
    /// must confirm each candidate with an exact distance check.
    pub fn candidates_near(&self, coord: &GeoCoordinate) -> Vec<usize> {
        let mut found = Vec::new();
        for key in self.neighbourhood(coord) {
            if let Some(bucket) = self.buckets.get(&key) {
                found.extend_from_slice(bucket);
            }
        }
        found.sort_unstable();
        found
    }

    /// Remove everything, keeping the cell size.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.cells.clear();
    }

    pub fn stats(&self) -> GridStats {
        GridStats {
            cell_count: self.buckets.len(),
            entry_count: self.cells.len(),
            largest_bucket: self.buckets.values().map(|b| b.len()).max().unwrap_or(0),
        }
    }

    /// The distinct cells of the 3x3 block around `coord`.
    fn neighbourhood(&self, coord: &GeoCoordinate) -> SmallVec<[CellKey; 9]> {
        let row = self.row_of(coord.latitude());
        let mut keys: SmallVec<[CellKey; 9]> = SmallVec::new();

        // Tiny thresholds push row numbers to the ends of the i64 range.
        for r in row.saturating_sub(1)..=row.saturating_add(1) {
            // Column widths differ between rows, so the query's column is
            // recomputed in each neighbouring row.
            let (columns, col) = self.column_in_row(r, coord.longitude());
            for dc in -1..=1 {
                let key = (r, col.saturating_add(dc).rem_euclid(columns));
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    fn row_of(&self, latitude: f64) -> i64 {
        (latitude / self.lat_step_deg).floor() as i64
    }

    /// Column count of `row` and the column holding `longitude`.
    fn column_in_row(&self, row: i64, longitude: f64) -> (i64, i64) {
        let columns = self.columns_in_row(row);
        let width = 360.0 / columns as f64;
        let col = ((longitude + 180.0) / width).floor() as i64;
        (columns, col.rem_euclid(columns))
    }

    /// Number of equal-width columns covering 360 degrees in `row`.
    fn columns_in_row(&self, row: i64) -> i64 {
        let south = row as f64 * self.lat_step_deg;
        let north = south + self.lat_step_deg;
        // Most poleward latitude reachable from this row or its neighbours.
        let edge = (south - self.lat_step_deg)
            .abs()
            .max((north + self.lat_step_deg).abs())
            .min(90.0);
        let cos_lat = edge.to_radians().cos();

        let planar = self.threshold_meters / (METERS_PER_DEGREE_LON * cos_lat);

        let half_angle = self.threshold_meters / (2.0 * EARTH_RADIUS_METERS);
        let spherical = if half_angle >= FRAC_PI_2 {
            f64::INFINITY
        } else {
            let ratio = half_angle.sin() / cos_lat;
            if ratio >= 1.0 {
                f64::INFINITY
            } else {
                2.0 * ratio.asin().to_degrees()
            }
        };

        let step = planar.max(spherical) * (1.0 + STEP_SLACK);
        if !step.is_finite() || step >= 360.0 {
            return 1;
        }
        ((360.0 / step).floor() as i64).max(1)
    }
}

/// Occupancy figures for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    /// Non-empty cells
    pub cell_count: usize,
    /// Stored indices
    pub entry_count: usize,
    /// Size of the fullest cell
    pub largest_bucket: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::distance::{haversine_distance, offset_north};

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(SpatialGrid::new(0.0).is_err());
        assert!(SpatialGrid::new(-10.0).is_err());
        assert!(SpatialGrid::new(f64::NAN).is_err());
    }

    #[test]
    fn test_insert_and_query() {
        let mut grid = SpatialGrid::new(50.0).unwrap();
        let base = GeoCoordinate::new(61.5, 8.5);

        grid.insert(0, &base);
        grid.insert(1, &offset_north(&base, 30.0));
        grid.insert(2, &GeoCoordinate::new(40.0, -74.0));

        let candidates = grid.candidates_near(&base);
        assert!(candidates.contains(&0));
        assert!(candidates.contains(&1));
        assert!(!candidates.contains(&2));
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_candidates_sorted() {
        let mut grid = SpatialGrid::new(100.0).unwrap();
        let base = GeoCoordinate::new(10.0, 10.0);
        for i in (0..20).rev() {
            grid.insert(i, &offset_north(&base, i as f64));
        }
        let candidates = grid.candidates_near(&base);
        assert_eq!(candidates, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_remove() {
        let mut grid = SpatialGrid::new(50.0).unwrap();
        let p = GeoCoordinate::new(1.0, 1.0);
        grid.insert(7, &p);
        assert!(grid.contains(7));

        assert!(grid.remove(7));
        assert!(!grid.remove(7));
        assert!(grid.candidates_near(&p).is_empty());
        assert_eq!(grid.stats().cell_count, 0);
    }

    #[test]
    fn test_reinsert_moves_index() {
        let mut grid = SpatialGrid::new(50.0).unwrap();
        let here = GeoCoordinate::new(1.0, 1.0);
        let there = GeoCoordinate::new(2.0, 2.0);

        grid.insert(3, &here);
        grid.insert(3, &there);

        assert_eq!(grid.len(), 1);
        assert!(grid.candidates_near(&here).is_empty());
        assert_eq!(grid.candidates_near(&there), vec![3]);
    }

    #[test]
    fn test_cell_edges_cover_threshold() {
        let grid = SpatialGrid::new(50.0).unwrap();
        assert!(grid.lat_step_deg() * 111_195.0 >= 50.0);

        for lat in [0.0_f64, 30.0, 60.0, 80.0] {
            let row = grid.cell_key(&GeoCoordinate::new(lat, 0.0)).0;
            let step = grid.lon_step_deg(row);
            let cos = lat.to_radians().cos();
            assert!(step * 111_320.0 * cos >= 50.0, "lat {} step {}", lat, step);
        }
    }

    #[test]
    fn test_every_point_within_threshold_is_a_candidate() {
        let threshold = 50.0;
        let mut grid = SpatialGrid::new(threshold).unwrap();
        let origin = GeoCoordinate::new(59.9, 10.75);

        // Ring of points just inside the threshold in every direction.
        let mut ring = Vec::new();
        for k in 0..72 {
            let bearing = (k as f64 * 5.0).to_radians();
            let d = threshold * 0.999;
            let dlat = (d * bearing.cos() / EARTH_RADIUS_METERS).to_degrees();
            let dlon = (d * bearing.sin()
                / (EARTH_RADIUS_METERS * origin.latitude().to_radians().cos()))
            .to_degrees();
            let p = GeoCoordinate::new(origin.latitude() + dlat, origin.longitude() + dlon);
            if haversine_distance(&origin, &p) < threshold {
                ring.push(p);
            }
        }
        assert!(!ring.is_empty());

        for (i, p) in ring.iter().enumerate() {
            grid.insert(i, p);
        }
        let candidates = grid.candidates_near(&origin);
        assert_eq!(candidates.len(), ring.len());
    }

    #[test]
    fn test_wraps_at_antimeridian() {
        let mut grid = SpatialGrid::new(50.0).unwrap();
        let west = GeoCoordinate::new(10.0, 179.9999);
        let east = GeoCoordinate::new(10.0, -179.9999);
        assert!(haversine_distance(&west, &east) < 50.0);

        grid.insert(0, &west);
        assert_eq!(grid.candidates_near(&east), vec![0]);
    }

    #[test]
    fn test_single_column_near_pole() {
        let grid = SpatialGrid::new(50.0).unwrap();
        let row = grid.cell_key(&GeoCoordinate::new(90.0, 0.0)).0;
        assert_eq!(grid.lon_step_deg(row), 360.0);

        let mut grid = grid;
        grid.insert(0, &GeoCoordinate::new(89.9999, 0.0));
        let across = GeoCoordinate::new(89.9999, 180.0);
        assert!(grid.candidates_near(&across).contains(&0));
    }

    #[test]
    fn test_huge_threshold_collapses_to_few_cells() {
        let mut grid = SpatialGrid::new(30_000_000.0).unwrap();
        grid.insert(0, &GeoCoordinate::new(-80.0, -170.0));
        grid.insert(1, &GeoCoordinate::new(80.0, 170.0));
        assert_eq!(
            grid.candidates_near(&GeoCoordinate::new(0.0, 0.0)),
            vec![0, 1]
        );
    }

    #[test]
    fn test_stats() {
        let mut grid = SpatialGrid::new(50.0).unwrap();
        let p = GeoCoordinate::new(5.0, 5.0);
        grid.insert(0, &p);
        grid.insert(1, &p);
        grid.insert(2, &GeoCoordinate::new(6.0, 6.0));

        let stats = grid.stats();
        assert_eq!(stats.cell_count, 2);
        assert_eq!(stats.entry_count, 3);
        assert_eq!(stats.largest_bucket, 2);

        grid.clear();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_tiny_threshold_saturates_without_overflow() {
        let mut grid = SpatialGrid::new(1e-13).unwrap();
        let coords = [
            GeoCoordinate::new(61.0, 8.0),
            GeoCoordinate::new(-89.5, -179.9),
            GeoCoordinate::new(90.0, 180.0),
        ];
        for (i, c) in coords.iter().enumerate() {
            grid.insert(i, c);
        }

        for (i, c) in coords.iter().enumerate() {
            assert!(grid.candidates_near(c).contains(&i));
        }
        assert_eq!(grid.len(), 3);
    }
}
