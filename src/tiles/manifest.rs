//! Tile manifest parsing and zoom/viewport resolution.
//!
//! The manifest is read as loosely as the files found in the wild require
//! (every field optional), then resolved in one step into a [`TileSetup`].
//! Nothing downstream ever sees a half-valid manifest.

use crate::{
    core::{
        constants::{
            DEFAULT_MAX_NATIVE_ZOOM, DEFAULT_MIN_NATIVE_ZOOM, FALLBACK_CENTER, FALLBACK_ZOOM,
            LOCAL_ATTRIBUTION, LOCAL_DISPLAY_ZOOM_CAP, OVERZOOM_LEVELS, TILE_SIZE,
        },
        geo::{LatLng, LatLngBounds},
    },
    traits::MapSurface,
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// `assets/tiles/manifest.json` as written by the tiling pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileManifest {
    /// `[[south, west], [north, east]]`
    #[serde(default)]
    pub bounds: Option<[[f64; 2]; 2]>,
    /// `[lat, lng]`
    #[serde(default)]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub min_zoom: Option<u8>,
    #[serde(default)]
    pub max_zoom: Option<u8>,
    #[serde(default)]
    pub tile_size: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
    /// Zoom levels actually present on disk; authoritative when non-empty
    #[serde(default)]
    pub available_zooms: Option<Vec<u8>>,
}

impl TileManifest {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(MapError::from)
    }

    /// Manifest bounds, if present and well-formed
    pub fn lat_lng_bounds(&self) -> Option<LatLngBounds> {
        let [sw, ne] = self.bounds?;
        let bounds = LatLngBounds::new(LatLng::from(sw), LatLng::from(ne));
        bounds.is_valid().then_some(bounds)
    }

    pub fn center_lat_lng(&self) -> Option<LatLng> {
        self.center.map(LatLng::from).filter(LatLng::is_valid)
    }
}

/// Native and display zoom range of the local tile layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedZoomConfig {
    pub min_native_zoom: u8,
    pub max_native_zoom: u8,
    pub display_max_zoom: u8,
}

impl ResolvedZoomConfig {
    /// Builds the config from a native range; the range must be ordered.
    /// Native zooms above the display cap are clamped to it.
    pub fn new(min_native_zoom: u8, max_native_zoom: u8) -> Self {
        let max_native_zoom = max_native_zoom.min(LOCAL_DISPLAY_ZOOM_CAP);
        let min_native_zoom = min_native_zoom.min(max_native_zoom);
        Self {
            min_native_zoom,
            max_native_zoom,
            display_max_zoom: Self::display_max_for(max_native_zoom),
        }
    }

    /// `min(max_native + 3, 18)`
    pub fn display_max_for(max_native_zoom: u8) -> u8 {
        max_native_zoom
            .saturating_add(OVERZOOM_LEVELS)
            .min(LOCAL_DISPLAY_ZOOM_CAP)
    }
}

impl Default for ResolvedZoomConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_NATIVE_ZOOM, DEFAULT_MAX_NATIVE_ZOOM)
    }
}

/// How the first view is established
#[derive(Debug, Clone, PartialEq)]
pub enum InitialView {
    FitBounds(LatLngBounds),
    Center { center: LatLng, zoom: f64 },
}

impl InitialView {
    pub fn fallback() -> Self {
        InitialView::Center {
            center: LatLng::new(FALLBACK_CENTER.0, FALLBACK_CENTER.1),
            zoom: FALLBACK_ZOOM,
        }
    }

    pub fn apply(&self, surface: &mut dyn MapSurface) {
        match self {
            InitialView::FitBounds(bounds) => surface.fit_bounds(bounds),
            InitialView::Center { center, zoom } => surface.set_view(*center, *zoom),
        }
    }
}

/// Where a [`TileSetup`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOrigin {
    /// Zoom range read from `availableZooms`
    AvailableZooms,
    /// Zoom range read from `minZoom` / `maxZoom`
    ZoomFields,
    /// A manifest was loaded but its zoom range was unusable or absent
    ManifestDefaults,
    /// No manifest at all
    Fallback,
}

/// Everything the local layer and the map need from the manifest
#[derive(Debug, Clone, PartialEq)]
pub struct TileSetup {
    pub zoom: ResolvedZoomConfig,
    pub initial_view: InitialView,
    pub tile_size: u32,
    pub attribution: String,
    pub origin: SetupOrigin,
}

impl TileSetup {
    /// Sets zoom limits and the initial view on the surface
    pub fn apply(&self, surface: &mut dyn MapSurface) {
        surface.set_min_zoom(self.zoom.min_native_zoom as f64);
        surface.set_max_zoom(self.zoom.display_max_zoom as f64);
        self.initial_view.apply(surface);
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == SetupOrigin::Fallback
    }
}

/// Turns an optional manifest into a [`TileSetup`]. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestResolver;

impl ManifestResolver {
    pub fn resolve(manifest: Option<&TileManifest>) -> TileSetup {
        let Some(manifest) = manifest else {
            return TileSetup {
                zoom: ResolvedZoomConfig::default(),
                initial_view: InitialView::fallback(),
                tile_size: TILE_SIZE,
                attribution: LOCAL_ATTRIBUTION.to_string(),
                origin: SetupOrigin::Fallback,
            };
        };

        let (zoom, origin) = Self::resolve_zoom(manifest);

        let initial_view = if let Some(bounds) = manifest.lat_lng_bounds() {
            InitialView::FitBounds(bounds)
        } else if let Some(center) = manifest.center_lat_lng() {
            InitialView::Center {
                center,
                zoom: FALLBACK_ZOOM,
            }
        } else {
            if manifest.bounds.is_some() {
                log::warn!("manifest bounds {:?} are malformed, ignoring", manifest.bounds);
            }
            InitialView::fallback()
        };

        let tile_size = match manifest.tile_size {
            Some(size) if size > 0 => size,
            _ => TILE_SIZE,
        };

        TileSetup {
            zoom,
            initial_view,
            tile_size,
            attribution: manifest
                .attribution
                .clone()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| LOCAL_ATTRIBUTION.to_string()),
            origin,
        }
    }

    fn resolve_zoom(manifest: &TileManifest) -> (ResolvedZoomConfig, SetupOrigin) {
        if let Some(zooms) = manifest.available_zooms.as_deref() {
            if let (Some(min), Some(max)) = (zooms.iter().min(), zooms.iter().max()) {
                return (
                    ResolvedZoomConfig::new(*min, *max),
                    SetupOrigin::AvailableZooms,
                );
            }
        }

        if manifest.min_zoom.is_none() && manifest.max_zoom.is_none() {
            return (ResolvedZoomConfig::default(), SetupOrigin::ManifestDefaults);
        }

        let min = manifest.min_zoom.unwrap_or(DEFAULT_MIN_NATIVE_ZOOM);
        let max = manifest.max_zoom.unwrap_or(DEFAULT_MAX_NATIVE_ZOOM);
        if min > max {
            log::warn!("manifest minZoom {min} > maxZoom {max}, using default zoom range");
            return (ResolvedZoomConfig::default(), SetupOrigin::ManifestDefaults);
        }

        (ResolvedZoomConfig::new(min, max), SetupOrigin::ZoomFields)
    }
}
