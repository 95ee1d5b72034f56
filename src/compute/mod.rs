//! Geometry used by the deduplication engine.
//!
//! - Coordinate and record validation
//! - Haversine distance
//! - The cell-bucketed `SpatialGrid`

pub mod distance;
pub mod grid;
pub mod validation;

pub use distance::haversine_distance;
pub use grid::{GridStats, SpatialGrid};
