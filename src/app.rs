//! Application entry point wiring the viewer components to one surface.

use crate::{
    core::{
        config::MapAppConfig,
        geo::{LatLngBounds, TileCoord},
        map::Map,
        viewport::Viewport,
    },
    data::{
        fetch::Fetcher,
        service::DataService,
        types::{Poi, PoiId},
    },
    layers::{
        switcher::{LayerKind, LayerSwitcher},
        tile::TileLayer,
    },
    location::{
        control::{check_secure_origin, LocateControl},
        geolocator::{Geolocator, LocationFix},
    },
    overlays::OverlaySet,
    poi::PoiStore,
    tiles::{
        cache::TileCache,
        loader::{TileLoad, TileLoader},
        manager::TileLayerManager,
    },
    traits::MapSurface,
    MapError, Result,
};
use reqwest::Url;
use std::sync::Arc;

/// The map viewer: one surface, one instance of each component, and the
/// collaborators they were given at construction.
pub struct MapApp<S: MapSurface> {
    surface: S,
    config: MapAppConfig,
    data: DataService,
    tiles: TileLayerManager,
    loader: TileLoader,
    switcher: Option<LayerSwitcher>,
    pois: PoiStore,
    overlays: OverlaySet,
    locate: LocateControl,
    geolocator: Option<Arc<dyn Geolocator>>,
    origin: Option<Url>,
}

impl MapApp<Map> {
    /// An app drawing on the headless [`Map`], configured from `config`
    pub fn headless(fetcher: Arc<dyn Fetcher>, config: MapAppConfig) -> Self {
        let surface = Map::with_options(Viewport::default(), config.map_options());
        Self::new(surface, fetcher, config)
    }
}

impl<S: MapSurface> MapApp<S> {
    pub fn new(surface: S, fetcher: Arc<dyn Fetcher>, config: MapAppConfig) -> Self {
        let data = DataService::new(Arc::clone(&fetcher))
            .with_base_path(config.data_base_path.clone())
            .with_manifest_path(config.tiles.manifest_path.clone());
        let tiles = TileLayerManager::new(
            config.tiles.tile_template.clone(),
            config.tiles.placeholder_url.clone(),
        );
        let loader = TileLoader::with_cache(fetcher, TileCache::new(config.tiles.cache_size));

        Self {
            surface,
            config,
            data,
            tiles,
            loader,
            switcher: None,
            pois: PoiStore::new(),
            overlays: OverlaySet::new(),
            locate: LocateControl::new(),
            geolocator: None,
            origin: None,
        }
    }

    pub fn with_geolocator(mut self, geolocator: Arc<dyn Geolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    /// Origin the viewer is served from; enables the secure-context advisory
    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Resolves the manifest, attaches the local layer, prepares the
    /// OpenStreetMap layer and loads the POIs
    pub async fn init(&mut self) -> Result<()> {
        self.tiles.initialize(&mut self.surface, &self.data).await?;
        self.switcher = Some(LayerSwitcher::with_openstreetmap(self.tiles.setup().zoom));

        if let Some(origin) = &self.origin {
            check_secure_origin(&mut self.surface, origin);
        }

        let pois = self.data.fetch_pois().await;
        if pois.is_empty() {
            log::info!("no POIs found");
        } else {
            self.pois.load(&mut self.surface, pois);
        }

        log::info!("map application initialized");
        Ok(())
    }

    pub fn toggle_layer(&mut self) -> Result<LayerKind> {
        let switcher = self
            .switcher
            .as_mut()
            .ok_or_else(|| MapError::Layer("map application is not initialized".to_string()))?;
        switcher.toggle(&mut self.surface)
    }

    pub fn current_layer(&self) -> LayerKind {
        self.switcher
            .as_ref()
            .map_or(LayerKind::Local, LayerSwitcher::current)
    }

    pub fn switcher(&self) -> Option<&LayerSwitcher> {
        self.switcher.as_ref()
    }

    pub async fn locate(&mut self) -> Result<LocationFix> {
        self.locate
            .locate(
                &mut self.surface,
                self.geolocator.as_deref(),
                self.origin.as_ref(),
            )
            .await
    }

    pub fn locate_control(&self) -> &LocateControl {
        &self.locate
    }

    pub fn add_poi(&mut self, poi: Poi) {
        self.pois.add(&mut self.surface, poi);
    }

    /// Removes every POI with `id`; returns how many were removed
    pub fn remove_poi(&mut self, id: &PoiId) -> usize {
        self.pois.remove(&mut self.surface, id)
    }

    pub fn all_pois(&self) -> Vec<Poi> {
        self.pois.get_all()
    }

    pub fn pois(&self) -> &PoiStore {
        &self.pois
    }

    /// Fetches paths and areas and replaces the overlays with them
    pub async fn load_overlays(&mut self) -> usize {
        let (paths, areas) = futures::join!(self.data.fetch_paths(), self.data.fetch_areas());
        self.overlays.load(&mut self.surface, &paths, &areas)
    }

    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    /// Returns to the manifest bounds, or the fallback view
    pub fn fit_to_bounds(&mut self) {
        self.tiles.restore_bounds(&mut self.surface);
    }

    /// Loads a display tile of the active base layer
    pub async fn load_tile(&mut self, coord: TileCoord) -> Option<TileLoad> {
        let layer_id = self.current_layer().layer_id();
        let layer = self
            .surface
            .layer_mut(layer_id)?
            .as_any_mut()
            .downcast_mut::<TileLayer>()?;
        self.loader.load(layer, coord).await
    }

    /// Releases a display tile of the active base layer that left the view
    pub fn unload_tile(&mut self, coord: TileCoord) -> bool {
        self.active_tile_layer_mut()
            .is_some_and(|layer| layer.tile_unloaded(coord))
    }

    /// Releases every tile of the active base layer outside `visible`
    pub fn prune_tiles(&mut self, visible: &LatLngBounds) -> usize {
        self.active_tile_layer_mut()
            .map_or(0, |layer| layer.prune_tiles(visible))
    }

    /// Tiles the active base layer currently tracks
    pub fn tracked_tiles(&self) -> usize {
        self.surface
            .layer(self.current_layer().layer_id())
            .and_then(|layer| layer.as_any().downcast_ref::<TileLayer>())
            .map_or(0, TileLayer::tracked_tiles)
    }

    fn active_tile_layer_mut(&mut self) -> Option<&mut TileLayer> {
        let layer_id = self.current_layer().layer_id();
        self.surface
            .layer_mut(layer_id)?
            .as_any_mut()
            .downcast_mut::<TileLayer>()
    }

    pub fn tiles(&self) -> &TileLayerManager {
        &self.tiles
    }

    pub fn config(&self) -> &MapAppConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Detaches everything this app put on the surface. The app can be
    /// initialized again afterwards.
    pub fn destroy(&mut self) {
        self.pois.clear(&mut self.surface);
        self.overlays.clear(&mut self.surface);
        self.locate.clear_location(&mut self.surface);
        for kind in [LayerKind::Local, LayerKind::Osm] {
            self.surface.remove_layer(kind.layer_id());
        }
        self.switcher = None;
        self.loader.cache().clear();
        log::info!("map application destroyed");
    }
}
