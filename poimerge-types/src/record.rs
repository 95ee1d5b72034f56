use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::point::GeoCoordinate;

/// Opaque identifier of a point of interest.
///
/// Minted once when a record becomes a POI and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(Uuid);

impl PoiId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PoiId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A decoded waypoint as handed over by an import collaborator.
///
/// Coordinates are plain numbers here; range checks happen when the record
/// is validated into a POI. A record carrying an `id` (for example one
/// re-read from an earlier export) keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    #[serde(default)]
    pub id: Option<PoiId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Raw extension blob, carried verbatim.
    #[serde(default)]
    pub extension: Option<Vec<u8>>,
}

impl PoiRecord {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            latitude,
            longitude,
            elevation: None,
            symbol: None,
            link: None,
            extension: None,
        }
    }

    pub fn with_id(mut self, id: PoiId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<Vec<u8>>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}
