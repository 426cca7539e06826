//! Trail and area overlays built from `paths.json` / `areas.json`

use crate::{
    core::geo::LatLngBounds,
    data::types::{Area, Path},
    layers::{
        base::LayerTrait,
        vector::{Shape, VectorLayer},
    },
    traits::MapSurface,
    ui::popup,
};

pub fn path_layer(path: &Path) -> VectorLayer {
    let layer = VectorLayer::new(
        format!("path-{}", path.id),
        Shape::Polyline {
            points: path.points(),
        },
        path.shape_style(),
    );
    match &path.description {
        Some(description) => layer.with_popup(popup::titled(&path.name, Some(description))),
        None => layer,
    }
}

pub fn area_layer(area: &Area) -> VectorLayer {
    let layer = VectorLayer::new(
        format!("area-{}", area.id),
        Shape::Polygon {
            rings: area.rings(),
        },
        area.shape_style(),
    );
    match &area.description {
        Some(description) => layer.with_popup(popup::titled(&area.name, Some(description))),
        None => layer,
    }
}

/// The overlays currently attached to the surface
#[derive(Debug, Default)]
pub struct OverlaySet {
    layer_ids: Vec<String>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all overlays. Paths are drawn above areas.
    pub fn load(&mut self, surface: &mut dyn MapSurface, paths: &[Path], areas: &[Area]) -> usize {
        self.clear(surface);

        let layers = areas
            .iter()
            .map(area_layer)
            .chain(paths.iter().map(path_layer));
        for layer in layers {
            let id = layer.id().to_string();
            match surface.add_layer(Box::new(layer)) {
                Ok(()) => self.layer_ids.push(id),
                Err(e) => log::error!("skipping overlay {id}: {e}"),
            }
        }

        log::info!(
            "attached {} overlays ({} paths, {} areas)",
            self.layer_ids.len(),
            paths.len(),
            areas.len()
        );
        self.layer_ids.len()
    }

    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        for id in self.layer_ids.drain(..) {
            surface.remove_layer(&id);
        }
    }

    pub fn layer_ids(&self) -> &[String] {
        &self.layer_ids
    }

    /// Combined bounds of every attached overlay
    pub fn bounds(&self, surface: &dyn MapSurface) -> Option<LatLngBounds> {
        self.layer_ids
            .iter()
            .filter_map(|id| surface.layer(id).and_then(|l| l.bounds()))
            .reduce(|acc, b| acc.union(&b))
    }

    /// Fits the view to all overlays; does nothing when there are none
    pub fn fit(&self, surface: &mut dyn MapSurface) -> bool {
        match self.bounds(surface) {
            Some(bounds) => {
                surface.fit_bounds(&bounds);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{geo::LatLng, map::Map},
        data::types::PathPoint,
    };

    fn track() -> Path {
        Path {
            id: "p1".to_string(),
            name: "Skyline Track".to_string(),
            kind: "trail".to_string(),
            coordinates: vec![
                PathPoint { lat: -41.25, lng: 174.70 },
                PathPoint { lat: -41.20, lng: 174.75 },
            ],
            description: Some("Ridge walk".to_string()),
            style: None,
        }
    }

    fn reserve() -> Area {
        Area {
            id: "a1".to_string(),
            name: "Reserve".to_string(),
            kind: "park".to_string(),
            coordinates: vec![vec![
                PathPoint { lat: -41.30, lng: 174.80 },
                PathPoint { lat: -41.28, lng: 174.80 },
                PathPoint { lat: -41.28, lng: 174.82 },
            ]],
            description: None,
            style: None,
        }
    }

    #[test]
    fn test_path_layer_popup_and_style() {
        let layer = path_layer(&track());
        assert_eq!(layer.id(), "path-p1");
        assert_eq!(layer.popup(), Some("<b>Skyline Track</b><br>Ridge walk"));
        assert_eq!(layer.style().weight, 3.0);
        assert!(area_layer(&reserve()).popup().is_none());
    }

    #[test]
    fn test_load_replaces_and_fits() {
        let mut map = Map::default();
        let mut overlays = OverlaySet::new();

        assert_eq!(overlays.load(&mut map, &[track()], &[reserve()]), 2);
        assert_eq!(map.list_layers(), vec!["area-a1", "path-p1"]);

        assert!(overlays.fit(&mut map));
        let bounds = overlays.bounds(&map).unwrap();
        assert!(bounds.contains(&LatLng::new(-41.25, 174.70)));
        assert!(bounds.contains(&LatLng::new(-41.30, 174.82)));

        assert_eq!(overlays.load(&mut map, &[], &[]), 0);
        assert!(map.layers().is_empty());
        assert!(!overlays.fit(&mut map));
    }
}
