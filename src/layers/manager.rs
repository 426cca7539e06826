use crate::{
    layers::base::LayerTrait,
    prelude::HashMap,
    traits::RejectedLayer,
    MapError, Result,
};

/// Owns the attached layers of a map, keeping them in z-index order
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs for rendering (sorted by z-index, then insertion)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer to the manager and notifies it via `on_add`
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.try_add_layer(layer).map_err(|(_, error)| error)
    }

    /// Like [`add_layer`](Self::add_layer), but a refused layer is handed back
    pub fn try_add_layer(
        &mut self,
        mut layer: Box<dyn LayerTrait>,
    ) -> std::result::Result<(), RejectedLayer> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            let error = MapError::Layer(format!("layer '{layer_id}' is already attached"));
            return Err((layer, error));
        }
        let z_index = layer.z_index();

        layer.on_add();
        self.layers.insert(layer_id.clone(), layer);

        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer from the manager, calling `on_remove` before handing it back
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        let mut layer = self.layers.remove(layer_id)?;
        layer.on_remove();
        Some(layer)
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    pub fn get_layer_mut(&mut self, layer_id: &str) -> Option<&mut (dyn LayerTrait + 'static)> {
        self.layers.get_mut(layer_id).map(|l| l.as_mut())
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, layers::marker::Marker};

    fn marker(id: &str, z_index: i32) -> Box<dyn LayerTrait> {
        let mut marker = Marker::new(id.to_string(), LatLng::new(-41.0, 174.0));
        marker.set_z_index(z_index);
        Box::new(marker)
    }

    #[test]
    fn test_render_order_follows_z_index() {
        let mut manager = LayerManager::new();
        manager.add_layer(marker("top", 10)).unwrap();
        manager.add_layer(marker("bottom", 0)).unwrap();
        manager.add_layer(marker("middle", 5)).unwrap();

        let ids: Vec<&str> = manager.layers().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["bottom", "middle", "top"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut manager = LayerManager::new();
        manager.add_layer(marker("a", 0)).unwrap();
        assert!(matches!(manager.add_layer(marker("a", 0)), Err(MapError::Layer(_))));
        assert_eq!(manager.len(), 1);

        let (layer, error) = manager.try_add_layer(marker("a", 3)).unwrap_err();
        assert_eq!(layer.id(), "a");
        assert_eq!(layer.z_index(), 3);
        assert!(matches!(error, MapError::Layer(_)));
    }

    #[test]
    fn test_remove_returns_layer() {
        let mut manager = LayerManager::new();
        manager.add_layer(marker("a", 0)).unwrap();
        let removed = manager.remove_layer("a").unwrap();
        assert_eq!(removed.id(), "a");
        assert!(manager.is_empty());
        assert!(manager.remove_layer("a").is_none());
    }
}
