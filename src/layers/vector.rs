//! Vector overlays: accuracy circles, trail polylines and area polygons

use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{LayerProperties, LayerTrait, LayerType},
};
use serde::{Deserialize, Serialize};

/// Stroke and fill styling shared by all vector shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub color: String,
    pub weight: f32,
    pub opacity: f32,
    pub fill_color: Option<String>,
    pub fill_opacity: f32,
}

impl ShapeStyle {
    /// Default line style: blue, 5px, 0.7 opacity
    pub fn line() -> Self {
        Self {
            color: "blue".to_string(),
            weight: 5.0,
            opacity: 0.7,
            fill_color: None,
            fill_opacity: 0.0,
        }
    }

    /// Default polygon style: red outline and fill
    pub fn area() -> Self {
        Self {
            color: "red".to_string(),
            weight: 2.0,
            opacity: 0.8,
            fill_color: Some("red".to_string()),
            fill_opacity: 0.5,
        }
    }

    /// Accuracy circle drawn around the user position
    pub fn accuracy() -> Self {
        Self {
            color: "#136AEC".to_string(),
            weight: 2.0,
            opacity: 0.6,
            fill_color: Some("#136AEC".to_string()),
            fill_opacity: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { center: LatLng, radius_m: f64 },
    Polyline { points: Vec<LatLng> },
    /// Outer ring first, holes after
    Polygon { rings: Vec<Vec<LatLng>> },
}

impl Shape {
    fn bounds(&self) -> Option<LatLngBounds> {
        match self {
            Shape::Circle { center, radius_m } => {
                let dlat = (radius_m / 111_320.0).abs();
                let dlng = dlat / center.lat.to_radians().cos().abs().max(1e-6);
                Some(LatLngBounds::from_coords(
                    center.lat - dlat,
                    center.lng - dlng,
                    center.lat + dlat,
                    center.lng + dlng,
                ))
            }
            Shape::Polyline { points } => LatLngBounds::from_points(points),
            Shape::Polygon { rings } => LatLngBounds::from_points(rings.iter().flatten()),
        }
    }
}

pub struct VectorLayer {
    properties: LayerProperties,
    shape: Shape,
    style: ShapeStyle,
    popup_html: Option<String>,
}

impl VectorLayer {
    pub fn new(id: String, shape: Shape, style: ShapeStyle) -> Self {
        let name = match shape {
            Shape::Circle { .. } => "Circle",
            Shape::Polyline { .. } => "Polyline",
            Shape::Polygon { .. } => "Polygon",
        };
        Self {
            properties: LayerProperties::new(id, name.to_string(), LayerType::Vector),
            shape,
            style,
            popup_html: None,
        }
    }

    pub fn circle(id: String, center: LatLng, radius_m: f64, style: ShapeStyle) -> Self {
        Self::new(id, Shape::Circle { center, radius_m }, style)
    }

    pub fn with_popup(mut self, html: String) -> Self {
        self.popup_html = Some(html);
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup_html.as_deref()
    }

    /// Moves a circle; no-op for other shapes
    pub fn set_center(&mut self, position: LatLng) {
        if let Shape::Circle { center, .. } = &mut self.shape {
            *center = position;
        }
    }

    /// Resizes a circle; no-op for other shapes
    pub fn set_radius(&mut self, radius: f64) {
        if let Shape::Circle { radius_m, .. } = &mut self.shape {
            *radius_m = radius;
        }
    }

    pub fn radius(&self) -> Option<f64> {
        match self.shape {
            Shape::Circle { radius_m, .. } => Some(radius_m),
            _ => None,
        }
    }
}

impl LayerTrait for VectorLayer {
    crate::impl_layer_trait!(VectorLayer, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        self.shape.bounds()
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "shape": self.shape,
            "style": self.style,
            "popup": self.popup_html
        })
    }
}
