//! # poimerge-types
//!
//! Plain data types exchanged between the poimerge engine and its
//! collaborators (file decoders, exporters, elevation services).
//!
//! - **Identity**: `PoiId`
//! - **Coordinates**: `GeoCoordinate`
//! - **Import records**: `PoiRecord`
//!
//! Nothing here validates ranges; records are checked when they enter the
//! engine.
//!
//! ```rust
//! use poimerge_types::record::PoiRecord;
//!
//! let record = PoiRecord::new("Fannaråki", 61.5167, 7.9333)
//!     .with_elevation(2068.0)
//!     .with_symbol("Summit");
//! assert_eq!(record.elevation, Some(2068.0));
//! ```

pub mod point;
pub mod record;

pub use point::GeoCoordinate;
pub use record::{PoiId, PoiRecord};
