//! Owns the manifest-derived setup and attaches the local tile layer.

use super::manifest::{InitialView, ManifestResolver, TileManifest, TileSetup};
use crate::{
    core::constants::{DEFAULT_TILE_URL, LOCAL_TILE_TEMPLATE},
    data::service::DataService,
    layers::tile::TileLayer,
    traits::MapSurface,
    Result,
};

/// Surface id of the local topo layer
pub const LOCAL_LAYER_ID: &str = "local-tiles";

/// Surface id of the OpenStreetMap layer
pub const OSM_LAYER_ID: &str = "osm-tiles";

#[derive(Debug, Clone)]
pub struct TileLayerManager {
    template: String,
    placeholder_url: String,
    manifest: Option<TileManifest>,
    setup: TileSetup,
}

impl Default for TileLayerManager {
    fn default() -> Self {
        Self::new(LOCAL_TILE_TEMPLATE, DEFAULT_TILE_URL)
    }
}

impl TileLayerManager {
    pub fn new(template: impl Into<String>, placeholder_url: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            placeholder_url: placeholder_url.into(),
            manifest: None,
            setup: ManifestResolver::resolve(None),
        }
    }

    /// Loads the manifest, configures zoom limits and the initial view, and
    /// attaches the local layer. A missing manifest is not an error.
    pub async fn initialize(
        &mut self,
        surface: &mut dyn MapSurface,
        data: &DataService,
    ) -> Result<()> {
        self.manifest = data.fetch_manifest().await;
        self.configure(surface)
    }

    /// Synchronous half of [`initialize`](Self::initialize), for a manifest
    /// obtained elsewhere
    pub fn initialize_with(
        &mut self,
        surface: &mut dyn MapSurface,
        manifest: Option<TileManifest>,
    ) -> Result<()> {
        self.manifest = manifest;
        self.configure(surface)
    }

    fn configure(&mut self, surface: &mut dyn MapSurface) -> Result<()> {
        self.setup = ManifestResolver::resolve(self.manifest.as_ref());
        log::info!(
            "local tiles: native zoom {}..={}, display ceiling {} ({:?})",
            self.setup.zoom.min_native_zoom,
            self.setup.zoom.max_native_zoom,
            self.setup.zoom.display_max_zoom,
            self.setup.origin
        );
        self.setup.apply(surface);
        surface.add_layer(Box::new(self.local_layer()))
    }

    /// A fresh, detached local layer for the current setup
    pub fn local_layer(&self) -> TileLayer {
        TileLayer::local(
            LOCAL_LAYER_ID.to_string(),
            &self.template,
            &self.setup.zoom,
            self.setup.tile_size,
            Some(self.setup.attribution.clone()),
            Some(&self.placeholder_url),
        )
    }

    /// Returns to the manifest bounds, or the fallback view without them
    pub fn restore_bounds(&self, surface: &mut dyn MapSurface) {
        match self.manifest.as_ref().and_then(TileManifest::lat_lng_bounds) {
            Some(bounds) => surface.fit_bounds(&bounds),
            None => InitialView::fallback().apply(surface),
        }
    }

    pub fn manifest(&self) -> Option<&TileManifest> {
        self.manifest.as_ref()
    }

    pub fn setup(&self) -> &TileSetup {
        &self.setup
    }
}
