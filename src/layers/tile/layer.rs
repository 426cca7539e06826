//! Core TileLayer implementation

use super::{
    hooks::{NoPlaceholder, PlaceholderPolicy, TileLoadHook},
    types::{TileErrorOutcome, TileLayerOptions, TileRequest, TileState, TileStatus},
};
use crate::{
    core::{
        constants::{DEFAULT_TILE_URL, OSM_ATTRIBUTION, OSM_MAX_ZOOM},
        geo::{LatLngBounds, TileCoord},
    },
    layers::base::{LayerProperties, LayerType},
    prelude::HashMap,
    tiles::{
        manifest::ResolvedZoomConfig,
        source::{OpenStreetMapSource, TileSource, UrlTemplateSource},
    },
};

pub struct TileLayer {
    pub(crate) properties: LayerProperties,
    pub(crate) options: TileLayerOptions,
    pub(crate) tile_source: Box<dyn TileSource>,
    pub(crate) hook: Box<dyn TileLoadHook>,
    /// Live tiles of the current zoom level, keyed by display address
    pub(crate) tiles: HashMap<TileCoord, TileState>,
    /// Zoom level the tracked tiles belong to
    pub(crate) tile_zoom: Option<u8>,
    pub(crate) attached: bool,
}

impl TileLayer {
    pub fn new(
        id: String,
        name: String,
        tile_source: Box<dyn TileSource>,
        options: TileLayerOptions,
    ) -> Self {
        let mut properties = LayerProperties::new(id, name, LayerType::Tile);
        properties.opacity = options.opacity;
        properties.z_index = options.z_index;
        properties.interactive = false;

        let hook: Box<dyn TileLoadHook> = match &options.error_tile_url {
            Some(url) => Box::new(PlaceholderPolicy::new(url.clone())),
            None => Box::new(NoPlaceholder),
        };

        Self {
            properties,
            options,
            tile_source,
            hook,
            tiles: HashMap::default(),
            tile_zoom: None,
            attached: false,
        }
    }

    /// Replace the load hook chosen from `error_tile_url`
    pub fn with_hook(mut self, hook: Box<dyn TileLoadHook>) -> Self {
        self.hook = hook;
        self
    }

    /// The local topo layer, configured from a resolved zoom range
    pub fn local(
        id: String,
        template: &str,
        zoom: &ResolvedZoomConfig,
        tile_size: u32,
        attribution: Option<String>,
        placeholder_url: Option<&str>,
    ) -> Self {
        let options = TileLayerOptions {
            tile_size,
            min_zoom: zoom.min_native_zoom,
            max_zoom: zoom.display_max_zoom,
            max_native_zoom: Some(zoom.max_native_zoom),
            attribution,
            error_tile_url: Some(placeholder_url.unwrap_or(DEFAULT_TILE_URL).to_string()),
            ..Default::default()
        };
        let source = UrlTemplateSource::new(template).with_tms(options.tms);
        Self::new(id, "Local Topo".to_string(), Box::new(source), options)
    }

    /// The public OpenStreetMap layer
    pub fn openstreetmap(id: String) -> Self {
        let options = TileLayerOptions {
            max_zoom: OSM_MAX_ZOOM,
            attribution: Some(OSM_ATTRIBUTION.to_string()),
            ..Default::default()
        };
        Self::new(
            id,
            "OpenStreetMap".to_string(),
            Box::new(OpenStreetMapSource::new()),
            options,
        )
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Computes the request for a display tile without recording it
    pub fn plan_tile(&self, coord: TileCoord) -> Option<TileRequest> {
        if coord.z < self.options.min_zoom || coord.z > self.options.max_zoom {
            return None;
        }
        if !coord.is_valid() {
            return None;
        }
        if let Some(bounds) = &self.options.bounds {
            if !bounds.intersects(&coord.bounds()) {
                return None;
            }
        }

        let native_z = self.options.native_zoom_for(coord.z);
        let levels = coord.z - native_z;
        let native = coord.ancestor(levels)?;
        let offset = (
            coord.x - (native.x << levels),
            coord.y - (native.y << levels),
        );

        Some(TileRequest {
            display: coord,
            native,
            url: self.tile_source.url(native),
            scale: 1u32 << levels,
            offset,
        })
    }

    /// Requests a display tile. Only attached layers issue requests.
    pub fn request_tile(&mut self, coord: TileCoord) -> Option<TileRequest> {
        if !self.attached {
            return None;
        }
        let request = self.plan_tile(coord)?;
        if self.tile_zoom != Some(coord.z) {
            // a new zoom level retires every tile of the previous one
            let retired = self.tiles.len();
            self.tiles.clear();
            self.tile_zoom = Some(coord.z);
            if retired > 0 {
                log::debug!(
                    "tile layer '{}' moved to z{}, released {retired} tiles",
                    self.properties.id,
                    coord.z
                );
            }
        }
        self.hook.on_tile_requested(&request);
        self.tiles.insert(coord, TileState::new(request.clone()));
        Some(request)
    }

    /// Marks a requested tile as loaded
    pub fn tile_loaded(&mut self, coord: TileCoord) {
        if let Some(state) = self.tiles.get_mut(&coord) {
            if state.status == TileStatus::Pending {
                state.status = TileStatus::Loaded;
            }
        }
    }

    /// Reports a load failure for a requested tile.
    ///
    /// The error handler for a tile runs at most once: the first failure may
    /// substitute the placeholder, every later failure (including the
    /// placeholder itself failing) is ignored.
    pub fn tile_failed(&mut self, coord: TileCoord) -> TileErrorOutcome {
        let Some(state) = self.tiles.get_mut(&coord) else {
            return TileErrorOutcome::Ignored;
        };
        state.error_count += 1;

        if !state.error_handler_attached {
            state.status = TileStatus::Failed;
            return TileErrorOutcome::Ignored;
        }
        state.error_handler_attached = false;

        match self.hook.on_tile_error(coord) {
            Some(url) => {
                state.status = TileStatus::Placeholder(url.clone());
                TileErrorOutcome::Substitute(url)
            }
            None => {
                state.status = TileStatus::Failed;
                TileErrorOutcome::Failed
            }
        }
    }

    /// Releases a tile that left the view. Returns whether it was tracked.
    pub fn tile_unloaded(&mut self, coord: TileCoord) -> bool {
        self.tiles.remove(&coord).is_some()
    }

    /// Releases every tracked tile outside `visible`; returns how many went
    pub fn prune_tiles(&mut self, visible: &LatLngBounds) -> usize {
        let before = self.tiles.len();
        self.tiles.retain(|coord, _| visible.intersects(&coord.bounds()));
        before - self.tiles.len()
    }

    pub fn tile_state(&self, coord: &TileCoord) -> Option<&TileState> {
        self.tiles.get(coord)
    }

    /// Number of tiles currently showing the placeholder
    pub fn placeholder_count(&self) -> usize {
        self.tiles
            .values()
            .filter(|t| matches!(t.status, TileStatus::Placeholder(_)))
            .count()
    }

    /// Number of tiles with live load/error handling
    pub fn tracked_tiles(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::base::LayerTrait;

    fn local_layer() -> TileLayer {
        let zoom = ResolvedZoomConfig::new(6, 14);
        let mut layer = TileLayer::local(
            "local".to_string(),
            "assets/tiles/{z}/{x}/{y}.png",
            &zoom,
            256,
            None,
            None,
        );
        layer.on_add();
        layer
    }

    #[test]
    fn test_local_layer_options() {
        let layer = local_layer();
        let options = layer.tile_options();
        assert_eq!(options.min_zoom, 6);
        assert_eq!(options.max_zoom, 17);
        assert_eq!(options.max_native_zoom, Some(14));
        assert_eq!(options.error_tile_url.as_deref(), Some("assets/tiles/default.png"));
    }

    #[test]
    fn test_requests_outside_zoom_range_are_refused() {
        let mut layer = local_layer();
        assert!(layer.request_tile(TileCoord::new(0, 0, 5)).is_none());
        assert!(layer.request_tile(TileCoord::new(0, 0, 18)).is_none());
        assert!(layer.request_tile(TileCoord::new(64, 64, 6)).is_none());
        assert_eq!(layer.tracked_tiles(), 0);
    }

    #[test]
    fn test_native_request_at_or_below_ceiling() {
        let mut layer = local_layer();
        let request = layer.request_tile(TileCoord::new(16210, 10484, 14)).unwrap();
        assert_eq!(request.native, request.display);
        assert_eq!(request.scale, 1);
        assert_eq!(request.offset, (0, 0));
        assert_eq!(request.url, "assets/tiles/14/16210/10484.png");
    }

    #[test]
    fn test_overzoom_fetches_native_ancestor() {
        let mut layer = local_layer();
        let display = TileCoord::new(129685, 83877, 17);
        let request = layer.request_tile(display).unwrap();

        assert_eq!(request.native, TileCoord::new(16210, 10484, 14));
        assert_eq!(request.url, "assets/tiles/14/16210/10484.png");
        assert_eq!(request.scale, 8);
        assert_eq!(request.offset, (5, 5));
        assert!(request.is_overzoomed());
    }

    #[test]
    fn test_single_placeholder_per_failed_tile() {
        let mut layer = local_layer();
        let coord = TileCoord::new(63, 40, 7);
        layer.request_tile(coord).unwrap();

        assert_eq!(
            layer.tile_failed(coord),
            TileErrorOutcome::Substitute("assets/tiles/default.png".to_string())
        );
        assert_eq!(layer.placeholder_count(), 1);

        // The placeholder image itself failing must not re-enter the handler
        assert_eq!(layer.tile_failed(coord), TileErrorOutcome::Ignored);
        assert_eq!(layer.tile_failed(coord), TileErrorOutcome::Ignored);

        let state = layer.tile_state(&coord).unwrap();
        assert_eq!(state.status, TileStatus::Failed);
        assert!(!state.error_handler_attached);
        assert_eq!(state.error_count, 3);
    }

    #[test]
    fn test_osm_failures_have_no_placeholder() {
        let mut layer = TileLayer::openstreetmap("osm".to_string());
        layer.on_add();
        let coord = TileCoord::new(1, 1, 1);
        layer.request_tile(coord).unwrap();
        assert_eq!(layer.tile_failed(coord), TileErrorOutcome::Failed);
        assert_eq!(layer.tile_failed(coord), TileErrorOutcome::Ignored);
    }

    #[test]
    fn test_detached_layer_drops_handlers() {
        let mut layer = local_layer();
        let coord = TileCoord::new(63, 40, 7);
        layer.request_tile(coord).unwrap();
        layer.on_remove();

        assert_eq!(layer.tracked_tiles(), 0);
        assert_eq!(layer.tile_failed(coord), TileErrorOutcome::Ignored);
        assert!(layer.request_tile(coord).is_none());
    }
    #[test]
    fn test_zoom_change_releases_previous_level() {
        let mut layer = local_layer();
        for x in 60..64 {
            layer.request_tile(TileCoord::new(x, 40, 7)).unwrap();
        }
        assert_eq!(layer.tracked_tiles(), 4);

        layer.request_tile(TileCoord::new(126, 80, 8)).unwrap();
        assert_eq!(layer.tracked_tiles(), 1);
        assert!(layer.tile_state(&TileCoord::new(60, 40, 7)).is_none());
    }

    #[test]
    fn test_panning_releases_tiles_out_of_view() {
        let mut layer = local_layer();
        let here = TileCoord::new(1013, 655, 11);
        let far = TileCoord::new(1020, 640, 11);
        layer.request_tile(here).unwrap();
        layer.request_tile(far).unwrap();
        layer.request_tile(TileCoord::new(1014, 655, 11)).unwrap();

        assert_eq!(layer.prune_tiles(&here.bounds()), 1);
        assert!(layer.tile_state(&far).is_none());
        assert_eq!(layer.tracked_tiles(), 2);

        assert!(layer.tile_unloaded(here));
        assert!(!layer.tile_unloaded(here));
        assert_eq!(layer.tile_failed(here), TileErrorOutcome::Ignored);
        assert_eq!(layer.tracked_tiles(), 1);
    }

    #[derive(Default)]
    struct Recorder {
        requested: std::sync::Arc<std::sync::Mutex<Vec<TileCoord>>>,
    }

    impl TileLoadHook for Recorder {
        fn on_tile_requested(&mut self, request: &TileRequest) {
            self.requested.lock().unwrap().push(request.native);
        }
    }

    #[test]
    fn test_custom_hook_sees_native_requests() {
        let recorder = Recorder::default();
        let requested = recorder.requested.clone();
        let mut layer = local_layer().with_hook(Box::new(recorder));

        layer.request_tile(TileCoord::new(129685, 83877, 17)).unwrap();
        assert_eq!(
            *requested.lock().unwrap(),
            vec![TileCoord::new(16210, 10484, 14)]
        );
        // without a placeholder policy a failure has nothing to substitute
        assert_eq!(
            layer.tile_failed(TileCoord::new(129685, 83877, 17)),
            TileErrorOutcome::Failed
        );
    }
}
