//! Read-only export of collection contents.

#[cfg(feature = "geojson")]
pub mod geojson;

#[cfg(feature = "geojson")]
pub use self::geojson::{to_feature, to_feature_collection, to_geojson_string};
