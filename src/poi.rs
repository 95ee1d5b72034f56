//! The validated point-of-interest value.

use crate::compute::validation::{validate_coordinate, validate_name, validate_record};
use crate::error::Result;
use bytes::Bytes;
use geo::Point;
use poimerge_types::{GeoCoordinate, PoiId, PoiRecord};
use std::hash::{Hash, Hasher};

/// A named place with coordinates and descriptive metadata.
///
/// A `Poi` can only be built from values that passed validation, so its
/// latitude is always within [-90, 90] and its longitude within [-180, 180].
/// Equality and hashing look at the `id` alone; use [`Poi::content_eq`] to
/// compare everything else.
///
/// # Examples
///
/// ```rust
/// use poimerge::Poi;
///
/// let hut = Poi::new("Gjendebu", 61.4822, 8.6286)?
///     .with_description("DNT staffed lodge")
///     .with_elevation(995.0);
///
/// assert_eq!(hut.elevation(), Some(995.0));
/// assert!(Poi::new("Nowhere", 95.0, 0.0).is_err());
/// # Ok::<(), poimerge::PoiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Poi {
    id: PoiId,
    name: String,
    /// Trimmed, case-folded name used by the duplicate predicate and the name index.
    name_key: String,
    description: String,
    coordinate: GeoCoordinate,
    elevation: Option<f64>,
    symbol: Option<String>,
    link: Option<String>,
    extension: Option<Bytes>,
}

impl Poi {
    /// Create a POI with a fresh id.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        let name = name.into();
        validate_coordinate(latitude, longitude)?;
        validate_name(&name)?;
        Ok(Self::from_parts(
            PoiId::new(),
            name,
            GeoCoordinate::new(latitude, longitude),
        ))
    }

    /// Validate an import record. The record's id is kept when present.
    pub fn from_record(record: PoiRecord) -> Result<Self> {
        validate_record(&record)?;

        let PoiRecord {
            id,
            name,
            description,
            latitude,
            longitude,
            elevation,
            symbol,
            link,
            extension,
        } = record;

        let mut poi = Self::from_parts(
            id.unwrap_or_default(),
            name,
            GeoCoordinate::new(latitude, longitude),
        );
        poi.description = description;
        poi.elevation = elevation.filter(|e| e.is_finite());
        poi.symbol = symbol;
        poi.link = link;
        poi.extension = extension.map(Bytes::from);
        Ok(poi)
    }

    fn from_parts(id: PoiId, name: String, coordinate: GeoCoordinate) -> Self {
        Self {
            id,
            name_key: name_key(&name),
            name,
            description: String::new(),
            coordinate,
            elevation: None,
            symbol: None,
            link: None,
            extension: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set a known elevation. Non-finite values leave it unknown.
    pub fn with_elevation(mut self, meters: f64) -> Self {
        self.elevation = Some(meters).filter(|e| e.is_finite());
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

    /// Attach an opaque extension payload. It is never parsed.
    pub fn with_extension(mut self, payload: impl Into<Bytes>) -> Self {
        self.extension = Some(payload.into());
        self
    }

    pub fn id(&self) -> PoiId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_key(&self) -> &str {
        &self.name_key
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude()
    }

    pub fn coordinate(&self) -> &GeoCoordinate {
        &self.coordinate
    }

    /// Position as a `geo` point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        self.coordinate.to_point()
    }

    /// Elevation in meters; `None` means unknown, not zero.
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn extension(&self) -> Option<&Bytes> {
        self.extension.as_ref()
    }

    /// True when every field except `id` matches.
    pub fn content_eq(&self, other: &Poi) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.coordinate == other.coordinate
            && self.elevation == other.elevation
            && self.symbol == other.symbol
            && self.link == other.link
            && self.extension == other.extension
    }

    /// Export view of this POI, id included.
    pub fn to_record(&self) -> PoiRecord {
        PoiRecord {
            id: Some(self.id),
            name: self.name.clone(),
            description: self.description.clone(),
            latitude: self.latitude(),
            longitude: self.longitude(),
            elevation: self.elevation,
            symbol: self.symbol.clone(),
            link: self.link.clone(),
            extension: self.extension.as_ref().map(|b| b.to_vec()),
        }
    }

    // Field replacements below keep the id; they back merging, elevation
    // updates and device preparation.

    /// Same value under a newly minted id.
    pub(crate) fn with_fresh_id(mut self) -> Self {
        self.id = PoiId::new();
        self
    }

    pub(crate) fn replace_name(mut self, name: String) -> Self {
        self.name_key = name_key(&name);
        self.name = name;
        self
    }

    pub(crate) fn replace_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub(crate) fn replace_elevation(mut self, elevation: Option<f64>) -> Self {
        self.elevation = elevation;
        self
    }

    pub(crate) fn set_elevation(&mut self, elevation: Option<f64>) {
        self.elevation = elevation;
    }

    pub(crate) fn replace_symbol(mut self, symbol: Option<String>) -> Self {
        self.symbol = symbol;
        self
    }

    pub(crate) fn replace_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    pub(crate) fn replace_extension(mut self, extension: Option<Bytes>) -> Self {
        self.extension = extension;
        self
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl PartialEq for Poi {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Poi {}

impl Hash for Poi {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl TryFrom<PoiRecord> for Poi {
    type Error = crate::error::PoiError;

    fn try_from(record: PoiRecord) -> Result<Self> {
        Poi::from_record(record)
    }
}

impl From<&Poi> for PoiRecord {
    fn from(poi: &Poi) -> Self {
        poi.to_record()
    }
}
