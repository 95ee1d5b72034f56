//! Enrichment around the core collection.
//!
//! - Elevation: the request/response boundary for an external elevation
//!   service. The service itself (network, retries, chunking) lives with
//!   the caller.
//! - Symbols: keyword-based symbol suggestions.
//! - Device preparation: shortened copies of POIs for GPS units.

pub mod device;
pub mod symbols;

pub use device::DeviceProfile;
pub use symbols::suggest_symbol;

use crate::error::Result;
use crate::poi::Poi;
use poimerge_types::PoiId;
use serde::{Deserialize, Serialize};

/// One POI that needs an elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationRequest {
    pub id: PoiId,
    pub latitude: f64,
    pub longitude: f64,
}

impl ElevationRequest {
    pub fn for_poi(poi: &Poi) -> Self {
        Self {
            id: poi.id(),
            latitude: poi.latitude(),
            longitude: poi.longitude(),
        }
    }
}

/// Answer for one requested id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ElevationLookup {
    /// Elevation in meters
    Found(f64),
    Unavailable,
}

impl From<Option<f64>> for ElevationLookup {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(meters) => ElevationLookup::Found(meters),
            None => ElevationLookup::Unavailable,
        }
    }
}

/// A source of elevations, typically a remote lookup service.
///
/// Implementations may answer a subset of the requests, in any order; ids
/// that are missing from the answer are left untouched.
pub trait ElevationProvider {
    fn lookup(&mut self, requests: &[ElevationRequest]) -> Result<Vec<(PoiId, ElevationLookup)>>;
}

impl<F> ElevationProvider for F
where
    F: FnMut(&ElevationRequest) -> Option<f64>,
{
    fn lookup(&mut self, requests: &[ElevationRequest]) -> Result<Vec<(PoiId, ElevationLookup)>> {
        Ok(requests
            .iter()
            .map(|request| (request.id, self(request).into()))
            .collect())
    }
}
