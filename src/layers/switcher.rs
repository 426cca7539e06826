//! Switching between the local topo layer and OpenStreetMap.
//!
//! Exactly one base layer is attached to the surface; the other one is parked
//! inside the [`LayerSwitcher`] until the next toggle.

use crate::{
    core::{constants::OSM_MAX_ZOOM, geo::LatLng},
    layers::{base::LayerTrait, tile::TileLayer},
    tiles::{
        manager::{LOCAL_LAYER_ID, OSM_LAYER_ID},
        manifest::ResolvedZoomConfig,
    },
    traits::MapSurface,
    ui::controls::ControlButton,
    MapError, Result,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Local,
    Osm,
}

impl LayerKind {
    pub fn other(self) -> Self {
        match self {
            LayerKind::Local => LayerKind::Osm,
            LayerKind::Osm => LayerKind::Local,
        }
    }

    pub fn layer_id(self) -> &'static str {
        match self {
            LayerKind::Local => LOCAL_LAYER_ID,
            LayerKind::Osm => OSM_LAYER_ID,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayerKind::Local => "local",
            LayerKind::Osm => "osm",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSwitchEvent {
    pub from: LayerKind,
    pub to: LayerKind,
    pub center: LatLng,
    pub zoom: f64,
}

pub struct LayerSwitcher {
    current: LayerKind,
    parked: Option<Box<dyn LayerTrait>>,
    local_zoom: ResolvedZoomConfig,
    last_event: Option<LayerSwitchEvent>,
}

impl LayerSwitcher {
    /// Starts on the local layer with `osm` parked
    pub fn new(osm: Box<dyn LayerTrait>, local_zoom: ResolvedZoomConfig) -> Self {
        Self {
            current: LayerKind::Local,
            parked: Some(osm),
            local_zoom,
            last_event: None,
        }
    }

    /// Starts on the local layer with the standard OpenStreetMap layer parked
    pub fn with_openstreetmap(local_zoom: ResolvedZoomConfig) -> Self {
        Self::new(
            Box::new(TileLayer::openstreetmap(OSM_LAYER_ID.to_string())),
            local_zoom,
        )
    }

    pub fn current(&self) -> LayerKind {
        self.current
    }

    pub fn last_event(&self) -> Option<&LayerSwitchEvent> {
        self.last_event.as_ref()
    }

    fn ceiling(&self, kind: LayerKind) -> f64 {
        match kind {
            LayerKind::Local => {
                ResolvedZoomConfig::display_max_for(self.local_zoom.max_native_zoom) as f64
            }
            LayerKind::Osm => OSM_MAX_ZOOM as f64,
        }
    }

    /// Swaps the attached base layer, keeping center and zoom.
    ///
    /// Returning to the local layer from a zoom above its ceiling leaves the
    /// map at the ceiling; a second toggle does not restore the deeper zoom.
    pub fn toggle(&mut self, surface: &mut dyn MapSurface) -> Result<LayerKind> {
        let from = self.current;
        let to = from.other();

        if !surface.has_layer(from.layer_id()) {
            return Err(MapError::Layer(format!(
                "active layer '{}' is not attached",
                from.layer_id()
            )));
        }
        if surface.has_layer(to.layer_id()) {
            return Err(MapError::Layer(format!(
                "layer '{}' is already attached",
                to.layer_id()
            )));
        }
        match &self.parked {
            Some(layer) if layer.id() == to.layer_id() => {}
            _ => {
                return Err(MapError::Layer(format!(
                    "no parked '{}' layer to switch to",
                    to.layer_id()
                )))
            }
        }

        let center = surface.center();
        let zoom = surface.zoom();

        let Some(detached) = surface.remove_layer(from.layer_id()) else {
            return Err(MapError::Layer(format!(
                "failed to detach '{}'",
                from.layer_id()
            )));
        };
        let Some(incoming) = self.parked.take() else {
            return Err(MapError::Layer(format!("no parked '{}' layer", to.layer_id())));
        };
        if let Err((incoming, e)) = surface.try_add_layer(incoming) {
            log::error!("attaching '{}' failed, restoring '{}': {e}", to.layer_id(), from);
            self.parked = Some(incoming);
            surface.add_layer(detached)?;
            return Err(e);
        }
        self.parked = Some(detached);
        self.current = to;

        surface.set_max_zoom(self.ceiling(to));
        surface.set_view(center, zoom);

        let event = LayerSwitchEvent {
            from,
            to,
            center,
            zoom,
        };
        log::info!(
            "layer switched {} -> {} at ({:.5}, {:.5}) z{}",
            event.from,
            event.to,
            event.center.lat,
            event.center.lng,
            event.zoom
        );
        self.last_event = Some(event);

        Ok(to)
    }

    /// The switch button for the current state
    pub fn button(&self) -> ControlButton {
        match self.current {
            LayerKind::Local => {
                ControlButton::new("🗺️", "Switch to OpenStreetMap", "Switch map layer")
            }
            LayerKind::Osm => ControlButton::new("🏠", "Switch to Local Map", "Switch map layer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{geo::LatLngBounds, map::Map},
        tiles::{manager::TileLayerManager, manifest::TileManifest},
        traits::RejectedLayer,
        ui::notice::Notice,
    };

    fn setup() -> (Map, LayerSwitcher) {
        let mut map = Map::default();
        let mut tiles = TileLayerManager::default();
        tiles.initialize_with(&mut map, None).unwrap();
        let switcher = LayerSwitcher::with_openstreetmap(tiles.setup().zoom);
        (map, switcher)
    }

    #[test]
    fn test_toggle_swaps_layers_and_ceiling() {
        let (mut map, mut switcher) = setup();
        map.set_view(LatLng::new(-41.29, 174.78), 12.0);

        assert_eq!(switcher.toggle(&mut map).unwrap(), LayerKind::Osm);
        assert!(map.has_layer(OSM_LAYER_ID));
        assert!(!map.has_layer(LOCAL_LAYER_ID));
        assert_eq!(map.max_zoom(), 19.0);
        assert_eq!(map.zoom(), 12.0);
        assert_eq!(switcher.button().label, "🏠");

        assert_eq!(switcher.toggle(&mut map).unwrap(), LayerKind::Local);
        assert!(map.has_layer(LOCAL_LAYER_ID));
        assert!(!map.has_layer(OSM_LAYER_ID));
        assert_eq!(map.max_zoom(), 17.0);
        assert_eq!(map.center(), LatLng::new(-41.29, 174.78));
        assert_eq!(map.zoom(), 12.0);
        assert_eq!(switcher.button().title, "Switch to OpenStreetMap");
    }

    #[test]
    fn test_zoom_is_clamped_returning_to_local() {
        let (mut map, mut switcher) = setup();
        switcher.toggle(&mut map).unwrap();
        map.set_view(LatLng::new(-41.29, 174.78), 19.0);

        switcher.toggle(&mut map).unwrap();
        assert_eq!(map.zoom(), 17.0);
        assert_eq!(switcher.last_event().unwrap().zoom, 19.0);
    }

    #[test]
    fn test_precondition_failure_changes_nothing() {
        let (mut map, mut switcher) = setup();
        map.remove_layer(LOCAL_LAYER_ID);

        assert!(matches!(switcher.toggle(&mut map), Err(MapError::Layer(_))));
        assert_eq!(switcher.current(), LayerKind::Local);
        assert!(!map.has_layer(OSM_LAYER_ID));
        assert!(switcher.last_event().is_none());
    }

    #[test]
    fn test_round_trips_across_manifests() {
        let manifests = [
            (None, 17.0),
            (Some(r#"{"availableZooms": [5, 6, 7, 8, 9, 10, 11]}"#), 14.0),
            (Some(r#"{"minZoom": 8, "maxZoom": 16}"#), 18.0),
        ];
        let views = [
            (LatLng::new(-41.29, 174.78), 6.0),
            (LatLng::new(-43.53, 172.63), 11.0),
            (LatLng::new(-36.85, 174.76), 14.0),
        ];

        for (json, local_ceiling) in manifests {
            let mut map = Map::default();
            let mut tiles = TileLayerManager::default();
            let manifest = json.map(|json| TileManifest::from_slice(json.as_bytes()).unwrap());
            tiles.initialize_with(&mut map, manifest).unwrap();
            let mut switcher = LayerSwitcher::with_openstreetmap(tiles.setup().zoom);
            assert_eq!(map.max_zoom(), local_ceiling);

            for (center, zoom) in views {
                map.set_view(center, zoom);
                let zoom = map.zoom();

                switcher.toggle(&mut map).unwrap();
                assert_eq!(map.max_zoom(), 19.0, "{json:?}");
                assert_eq!((map.center(), map.zoom()), (center, zoom));

                switcher.toggle(&mut map).unwrap();
                assert_eq!(map.max_zoom(), local_ceiling, "{json:?}");
                assert_eq!((map.center(), map.zoom()), (center, zoom));
                assert_eq!(switcher.current(), LayerKind::Local);
            }
        }
    }

    /// A surface that refuses to attach one layer id
    struct Refusing {
        inner: Map,
        refused: &'static str,
    }

    impl MapSurface for Refusing {
        fn center(&self) -> LatLng {
            self.inner.center()
        }
        fn zoom(&self) -> f64 {
            self.inner.zoom()
        }
        fn set_view(&mut self, center: LatLng, zoom: f64) {
            self.inner.set_view(center, zoom)
        }
        fn fit_bounds(&mut self, bounds: &LatLngBounds) {
            self.inner.fit_bounds(bounds)
        }
        fn min_zoom(&self) -> f64 {
            self.inner.min_zoom()
        }
        fn max_zoom(&self) -> f64 {
            self.inner.max_zoom()
        }
        fn set_min_zoom(&mut self, zoom: f64) {
            self.inner.set_min_zoom(zoom)
        }
        fn set_max_zoom(&mut self, zoom: f64) {
            self.inner.set_max_zoom(zoom)
        }
        fn try_add_layer(
            &mut self,
            layer: Box<dyn LayerTrait>,
        ) -> std::result::Result<(), RejectedLayer> {
            if layer.id() == self.refused {
                let error = MapError::Layer(format!("'{}' refused", self.refused));
                return Err((layer, error));
            }
            self.inner.try_add_layer(layer)
        }
        fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
            self.inner.remove_layer(layer_id)
        }
        fn has_layer(&self, layer_id: &str) -> bool {
            self.inner.has_layer(layer_id)
        }
        fn layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
            self.inner.layer(layer_id)
        }
        fn layer_mut(&mut self, layer_id: &str) -> Option<&mut (dyn LayerTrait + 'static)> {
            self.inner.layer_mut(layer_id)
        }
        fn alert(&mut self, message: &str) {
            self.inner.alert(message)
        }
        fn show_notice(&mut self, notice: Notice) -> bool {
            self.inner.show_notice(notice)
        }
        fn dismiss_notice(&mut self, notice_id: &str) {
            self.inner.dismiss_notice(notice_id)
        }
    }

    #[test]
    fn test_refused_attach_keeps_switcher_usable() {
        let (map, mut switcher) = setup();
        let mut surface = Refusing {
            inner: map,
            refused: OSM_LAYER_ID,
        };
        surface.set_view(LatLng::new(-41.29, 174.78), 12.0);

        for _ in 0..2 {
            assert!(matches!(switcher.toggle(&mut surface), Err(MapError::Layer(_))));
            assert_eq!(switcher.current(), LayerKind::Local);
            assert!(surface.has_layer(LOCAL_LAYER_ID));
            assert!(!surface.has_layer(OSM_LAYER_ID));
            assert_eq!(surface.max_zoom(), 17.0);
        }

        surface.refused = "";
        assert_eq!(switcher.toggle(&mut surface).unwrap(), LayerKind::Osm);
        assert!(surface.has_layer(OSM_LAYER_ID));
        assert_eq!(surface.zoom(), 12.0);
    }

    #[test]
    fn test_switch_event_recorded() {
        let (mut map, mut switcher) = setup();
        map.set_view(LatLng::new(-43.53, 172.63), 10.0);
        switcher.toggle(&mut map).unwrap();

        let event = switcher.last_event().unwrap();
        assert_eq!(event.from, LayerKind::Local);
        assert_eq!(event.to, LayerKind::Osm);
        assert_eq!(event.zoom, 10.0);
    }
}
