//! Duplicate detection and merging for collections of geographic points of interest.
//!
//! Two POIs are duplicates when their names match case-insensitively or when
//! they lie closer than a distance threshold (50 m by default). Imports merge
//! duplicates into existing entries; `dedupe` drops duplicates already inside
//! a collection. Large collections use a spatial grid to find candidates.
//!
//! ```rust
//! use poimerge::{PoiCollection, PoiRecord};
//!
//! let mut pois = PoiCollection::new();
//! pois.add(vec![
//!     PoiRecord::new("Glitterheim", 61.6603, 8.5647),
//!     PoiRecord::new("Spiterstulen", 61.6206, 8.3997),
//! ]);
//!
//! let summary = pois.add(vec![
//!     PoiRecord::new("GLITTERHEIM", 61.6603, 8.5647).with_description("DNT lodge, 1384 m"),
//!     PoiRecord::new("Juvasshytta", 61.6772, 8.3697),
//! ]);
//!
//! assert_eq!((summary.added, summary.merged), (1, 1));
//! assert_eq!(pois.len(), 3);
//! assert_eq!(pois[0].description(), "DNT lodge, 1384 m");
//! ```

pub mod collection;
pub mod compute;
pub mod config;
pub mod dedup;
pub mod enrich;
pub mod error;
pub mod export;
pub mod poi;

#[cfg(feature = "sync")]
pub mod sync;

pub use collection::PoiCollection;
pub use config::DedupConfig;
pub use dedup::{DeduplicationEngine, ImportSummary, MatchIndex, Strategy};
pub use error::{PoiError, Result};
pub use poi::Poi;

pub use compute::{SpatialGrid, haversine_distance};

pub use enrich::{
    DeviceProfile, ElevationLookup, ElevationProvider, ElevationRequest, suggest_symbol,
};

pub use poimerge_types::{GeoCoordinate, PoiId, PoiRecord};

#[cfg(feature = "sync")]
pub use sync::SyncCollection;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{PoiCollection, PoiError, Result};

    pub use crate::{DedupConfig, DeduplicationEngine, ImportSummary, Strategy};

    pub use crate::{GeoCoordinate, Poi, PoiId, PoiRecord};

    pub use crate::{ElevationLookup, ElevationProvider, ElevationRequest};

    #[cfg(feature = "sync")]
    pub use crate::SyncCollection;
}
