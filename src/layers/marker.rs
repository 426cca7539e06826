use crate::{
    core::{
        constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, POI_ICON_URL},
        geo::{LatLng, LatLngBounds},
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
};
use serde::{Deserialize, Serialize};

/// Image used to draw a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub url: String,
    pub size: (u32, u32),
    /// Hot-spot inside the image that sits on the marker position
    pub anchor: (u32, u32),
}

impl Icon {
    pub fn new(url: impl Into<String>, size: (u32, u32), anchor: (u32, u32)) -> Self {
        Self {
            url: url.into(),
            size,
            anchor,
        }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self::new(POI_ICON_URL, MARKER_ICON_SIZE, MARKER_ICON_ANCHOR)
    }
}

pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    icon: Icon,
    title: Option<String>,
    popup_html: Option<String>,
}

impl Marker {
    pub fn new(id: String, position: LatLng) -> Self {
        let properties = LayerProperties::new(id, "Marker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            icon: Icon::default(),
            title: None,
            popup_html: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_popup(mut self, html: String) -> Self {
        self.popup_html = Some(html);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup_html.as_deref()
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(Marker, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "icon": self.icon,
            "title": self.title,
            "popup": self.popup_html
        })
    }
}
