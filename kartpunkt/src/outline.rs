//! Building footprint payload parsing.
//!
//! The building collaborator returns footprints as GeoJSON *text* embedded in
//! its response; the text must be parsed into structured geometry before it
//! can be rendered. Payloads in the wild may be a bare geometry, a feature,
//! or a feature collection, so all three are accepted.

use std::str::FromStr;

use geojson::{Feature, GeoJson, Geometry, Value};

use crate::error::{LookupError, Result};

/// Parse a footprint payload into renderable geometry.
///
/// Accepts a bare `Geometry`, a `Feature`, or a `FeatureCollection` (first
/// feature wins). Only Polygon and MultiPolygon geometries are accepted;
/// anything else is an error so the caller can treat the footprint as absent.
///
/// # Example
///
/// ```
/// use kartpunkt::outline::parse_footprint;
///
/// let text = r#"{"type":"Polygon","coordinates":
///     [[[10.0,63.0],[10.001,63.0],[10.001,63.001],[10.0,63.0]]]}"#;
/// let geometry = parse_footprint(text).unwrap();
/// assert_eq!(kartpunkt::outline::vertex_count(&geometry), 3);
/// ```
pub fn parse_footprint(text: &str) -> Result<Geometry> {
    let geometry = match GeoJson::from_str(text)? {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature_geometry(feature)?,
        GeoJson::FeatureCollection(collection) => {
            let feature = collection
                .features
                .into_iter()
                .next()
                .ok_or(LookupError::UnsupportedGeometry("empty feature collection"))?;
            feature_geometry(feature)?
        }
    };

    match geometry.value {
        Value::Polygon(_) | Value::MultiPolygon(_) => Ok(geometry),
        ref other => Err(LookupError::UnsupportedGeometry(geometry_type_name(other))),
    }
}

/// Count the exterior-ring vertices of a footprint geometry.
///
/// GeoJSON rings repeat the first position as the last; the closing duplicate
/// is not counted. Multipolygons report the sum over their member polygons.
/// Non-areal geometry counts as zero.
pub fn vertex_count(geometry: &Geometry) -> usize {
    match &geometry.value {
        Value::Polygon(rings) => exterior_vertex_count(rings),
        Value::MultiPolygon(polygons) => polygons.iter().map(|p| exterior_vertex_count(p)).sum(),
        _ => 0,
    }
}

fn exterior_vertex_count(rings: &[Vec<Vec<f64>>]) -> usize {
    let Some(exterior) = rings.first() else {
        return 0;
    };
    match (exterior.first(), exterior.last()) {
        (Some(first), Some(last)) if exterior.len() > 1 && first == last => exterior.len() - 1,
        _ => exterior.len(),
    }
}

fn feature_geometry(feature: Feature) -> Result<Geometry> {
    feature
        .geometry
        .ok_or(LookupError::UnsupportedGeometry("feature without geometry"))
}

fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 4-vertex (closed 5-position ring) square around a Trondheim block.
    const SQUARE: &str = r#"{
        "type": "Polygon",
        "coordinates": [[
            [10.405, 63.415],
            [10.406, 63.415],
            [10.406, 63.416],
            [10.405, 63.416],
            [10.405, 63.415]
        ]]
    }"#;

    #[test]
    fn test_parse_bare_geometry() {
        let geometry = parse_footprint(SQUARE).unwrap();
        assert!(matches!(geometry.value, Value::Polygon(_)));
        assert_eq!(vertex_count(&geometry), 4);
    }

    #[test]
    fn test_parse_feature_payload() {
        let text = format!(r#"{{"type":"Feature","properties":{{}},"geometry":{SQUARE}}}"#);
        let geometry = parse_footprint(&text).unwrap();
        assert_eq!(vertex_count(&geometry), 4);
    }

    #[test]
    fn test_parse_feature_collection_first_feature_wins() {
        let text = format!(
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","properties":{{}},"geometry":{SQUARE}}}
            ]}}"#
        );
        let geometry = parse_footprint(&text).unwrap();
        assert_eq!(vertex_count(&geometry), 4);
    }

    #[test]
    fn test_rejects_non_areal_geometry() {
        let text = r#"{"type":"Point","coordinates":[10.4,63.4]}"#;
        let err = parse_footprint(text).unwrap_err();
        assert!(matches!(err, LookupError::UnsupportedGeometry("Point")));
    }

    #[test]
    fn test_rejects_garbage_text() {
        assert!(matches!(
            parse_footprint("not geojson at all"),
            Err(LookupError::InvalidGeoJson(_))
        ));
    }

    #[test]
    fn test_rejects_empty_feature_collection() {
        let text = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(parse_footprint(text).is_err());
    }

    #[test]
    fn test_vertex_count_unclosed_ring() {
        // Rings without the closing duplicate are invalid GeoJSON but occur
        // in the wild; they still report their vertex count.
        let text = r#"{
            "type": "Polygon",
            "coordinates": [[
                [10.405, 63.415],
                [10.406, 63.415],
                [10.406, 63.416],
                [10.405, 63.416]
            ]]
        }"#;
        let geometry = parse_footprint(text).unwrap();
        assert_eq!(vertex_count(&geometry), 4);
    }

    #[test]
    fn test_vertex_count_multipolygon() {
        let text = r#"{"type":"MultiPolygon","coordinates":[
            [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]],
            [[[2.0,2.0],[3.0,2.0],[3.0,3.0],[2.0,3.0],[2.0,2.0]]]
        ]}"#;
        let geometry = parse_footprint(text).unwrap();
        // 3-vertex triangle + 4-vertex square
        assert_eq!(vertex_count(&geometry), 7);
    }
}
