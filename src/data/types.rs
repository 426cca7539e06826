//! JSON records served under `<base>/data/`

use crate::{core::geo::LatLng, layers::vector::ShapeStyle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// POI identifier; the data files use both strings and integers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoiId {
    Int(i64),
    Text(String),
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoiId::Int(id) => write!(f, "{id}"),
            PoiId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for PoiId {
    fn from(id: i64) -> Self {
        PoiId::Int(id)
    }
}

impl From<i32> for PoiId {
    fn from(id: i32) -> Self {
        PoiId::Int(id.into())
    }
}

impl From<&str> for PoiId {
    fn from(id: &str) -> Self {
        PoiId::Text(id.to_string())
    }
}

impl From<String> for PoiId {
    fn from(id: String) -> Self {
        PoiId::Text(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: PoiId,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marker icon URL; the default POI icon is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Poi {
    pub fn new(id: impl Into<PoiId>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: None,
            latitude,
            longitude,
            description: None,
            icon: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lng: f64,
}

impl From<PathPoint> for LatLng {
    fn from(point: PathPoint) -> Self {
        LatLng::new(point.lat, point.lng)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub opacity: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<PathPoint>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub style: Option<PathStyle>,
}

impl Path {
    pub fn points(&self) -> Vec<LatLng> {
        self.coordinates.iter().copied().map(LatLng::from).collect()
    }

    /// Trail stroke; unset fields fall back to blue, 3px, 0.7
    pub fn shape_style(&self) -> ShapeStyle {
        let style = self.style.clone().unwrap_or_default();
        ShapeStyle {
            color: style.color.unwrap_or_else(|| "blue".to_string()),
            weight: style.weight.unwrap_or(3.0),
            opacity: style.opacity.unwrap_or(0.7),
            ..ShapeStyle::line()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub fill_color: Option<String>,
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub opacity: Option<f32>,
    #[serde(default)]
    pub fill_opacity: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Outer ring followed by holes
    pub coordinates: Vec<Vec<PathPoint>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub style: Option<AreaStyle>,
}

impl Area {
    pub fn rings(&self) -> Vec<Vec<LatLng>> {
        self.coordinates
            .iter()
            .map(|ring| ring.iter().copied().map(LatLng::from).collect())
            .collect()
    }

    /// Polygon style; unset fields fall back to a red outline with 0.3 fill
    pub fn shape_style(&self) -> ShapeStyle {
        let style = self.style.clone().unwrap_or_default();
        ShapeStyle {
            color: style.color.unwrap_or_else(|| "red".to_string()),
            weight: style.weight.unwrap_or(2.0),
            opacity: style.opacity.unwrap_or(0.8),
            fill_color: Some(style.fill_color.unwrap_or_else(|| "red".to_string())),
            fill_opacity: style.fill_opacity.unwrap_or(0.3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poi_ids_accept_strings_and_numbers() {
        let pois: Vec<Poi> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Hut", "type": "hut", "latitude": -41.1, "longitude": 174.9},
                {"id": "summit-7", "name": "Peak", "latitude": -41.2, "longitude": 175.0,
                 "description": "Trig", "category": "summit"}
            ]"#,
        )
        .unwrap();

        assert_eq!(pois[0].id, PoiId::Int(1));
        assert_eq!(pois[0].kind.as_deref(), Some("hut"));
        assert_eq!(pois[1].id, PoiId::Text("summit-7".to_string()));
        assert_eq!(pois[1].category.as_deref(), Some("summit"));
        assert_eq!(pois[1].id.to_string(), "summit-7");
    }

    #[test]
    fn test_poi_serializes_kind_as_type() {
        let mut poi = Poi::new(3, "Bivvy", -42.0, 172.0);
        poi.kind = Some("shelter".to_string());
        let json = serde_json::to_value(&poi).unwrap();
        assert_eq!(json["type"], "shelter");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_path_style_defaults() {
        let path: Path = serde_json::from_str(
            r#"{"id": "p1", "name": "Track", "type": "trail",
                "coordinates": [{"lat": -41.0, "lng": 174.0}, {"lat": -41.1, "lng": 174.1}],
                "style": {"color": "green"}}"#,
        )
        .unwrap();

        let style = path.shape_style();
        assert_eq!(style.color, "green");
        assert_eq!(style.weight, 3.0);
        assert_eq!(style.opacity, 0.7);
        assert_eq!(path.points()[1], LatLng::new(-41.1, 174.1));
    }

    #[test]
    fn test_area_style_reads_camel_case() {
        let area: Area = serde_json::from_str(
            r#"{"id": "a1", "name": "Reserve", "type": "park",
                "coordinates": [[{"lat": 0.0, "lng": 0.0}, {"lat": 1.0, "lng": 0.0}, {"lat": 1.0, "lng": 1.0}]],
                "style": {"fillColor": "yellow", "fillOpacity": 0.1}}"#,
        )
        .unwrap();

        let style = area.shape_style();
        assert_eq!(style.fill_color.as_deref(), Some("yellow"));
        assert_eq!(style.fill_opacity, 0.1);
        assert_eq!(style.color, "red");
        assert_eq!(area.rings()[0].len(), 3);
    }
}
