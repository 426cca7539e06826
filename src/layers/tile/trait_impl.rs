//! LayerTrait implementation for TileLayer

use super::TileLayer;
use crate::{core::geo::LatLngBounds, layers::base::LayerTrait};

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        self.options.bounds.clone()
    }

    fn on_add(&mut self) {
        self.attached = true;
    }

    fn on_remove(&mut self) {
        if !self.tiles.is_empty() {
            log::debug!(
                "detaching tile layer '{}', dropping {} tile handlers",
                self.properties.id,
                self.tiles.len()
            );
        }
        self.attached = false;
        self.tiles.clear();
        self.tile_zoom = None;
    }

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(&self.options).unwrap_or(serde_json::Value::Null)
    }
}
