//! GeoJSON export for POIs.
//!
//! Each POI becomes a `Point` feature with `[lon, lat]` coordinates, or
//! `[lon, lat, ele]` when the elevation is known. The feature id is the POI
//! id. Extension payloads are opaque and never exported.

use crate::error::Result;
use crate::poi::Poi;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

/// Convert one POI to a GeoJSON feature.
pub fn to_feature(poi: &Poi) -> Feature {
    let mut coords = vec![poi.longitude(), poi.latitude()];
    if let Some(elevation) = poi.elevation() {
        coords.push(elevation);
    }

    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), JsonValue::from(poi.name()));
    if !poi.description().is_empty() {
        properties.insert(
            "description".to_string(),
            JsonValue::from(poi.description()),
        );
    }
    if let Some(symbol) = poi.symbol() {
        properties.insert("symbol".to_string(), JsonValue::from(symbol));
    }
    if let Some(link) = poi.link() {
        properties.insert("link".to_string(), JsonValue::from(link));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(coords))),
        id: Some(Id::String(poi.id().to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Convert a slice of POIs, in order, to a feature collection.
pub fn to_feature_collection(pois: &[Poi]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: pois.iter().map(to_feature).collect(),
        foreign_members: None,
    }
}

/// Serialize POIs as a GeoJSON `FeatureCollection` string.
///
/// ```rust
/// use poimerge::{PoiCollection, PoiRecord, export::to_geojson_string};
///
/// let mut pois = PoiCollection::new();
/// pois.add(vec![PoiRecord::new("Juvasshytta", 61.6772, 8.3697).with_elevation(1841.0)]);
///
/// let json = to_geojson_string(pois.as_slice())?;
/// assert!(json.contains("\"FeatureCollection\""));
/// assert!(json.contains("Juvasshytta"));
/// # Ok::<(), poimerge::PoiError>(())
/// ```
pub fn to_geojson_string(pois: &[Poi]) -> Result<String> {
    let collection = to_feature_collection(pois);
    Ok(serde_json::to_string(&collection)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_without_elevation() {
        let poi = Poi::new("Bessheim", 61.5, 8.8).unwrap();
        let feature = to_feature(&poi);

        match feature.geometry.map(|g| g.value) {
            Some(Value::Point(coords)) => assert_eq!(coords, vec![8.8, 61.5]),
            other => panic!("expected point, got {:?}", other),
        }
        assert_eq!(feature.id, Some(Id::String(poi.id().to_string())));

        let properties = feature.properties.unwrap();
        assert_eq!(properties["name"], JsonValue::from("Bessheim"));
        assert!(!properties.contains_key("description"));
        assert!(!properties.contains_key("symbol"));
    }

    #[test]
    fn test_point_with_elevation_and_metadata() {
        let poi = Poi::new("Memurubu", 61.55, 8.58)
            .unwrap()
            .with_elevation(1008.0)
            .with_description("By the lake")
            .with_symbol("Lodge")
            .with_link("https://example.org/memurubu")
            .with_extension(b"<gpxx/>".to_vec());
        let feature = to_feature(&poi);

        match feature.geometry.map(|g| g.value) {
            Some(Value::Point(coords)) => assert_eq!(coords, vec![8.58, 61.55, 1008.0]),
            other => panic!("expected point, got {:?}", other),
        }

        let properties = feature.properties.unwrap();
        assert_eq!(properties["description"], JsonValue::from("By the lake"));
        assert_eq!(properties["symbol"], JsonValue::from("Lodge"));
        assert_eq!(
            properties["link"],
            JsonValue::from("https://example.org/memurubu")
        );
        assert_eq!(properties.len(), 4);
    }

    #[test]
    fn test_collection_string_parses() {
        let pois = vec![
            Poi::new("A", 1.0, 2.0).unwrap(),
            Poi::new("B", 3.0, 4.0).unwrap(),
        ];
        let json = to_geojson_string(&pois).unwrap();
        let parsed: FeatureCollection = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.features.len(), 2);
        assert_eq!(
            parsed.features[1].id,
            Some(Id::String(pois[1].id().to_string()))
        );
    }
}
