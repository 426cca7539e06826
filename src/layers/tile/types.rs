//! Core data types for tile layer functionality

use crate::core::{
    constants::TILE_SIZE,
    geo::{LatLngBounds, TileCoord},
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TileLayerOptions {
    pub tile_size: u32,
    pub min_zoom: u8,
    /// Highest zoom the layer will display
    pub max_zoom: u8,
    /// Highest zoom with real tile data; deeper zooms upscale this level
    pub max_native_zoom: Option<u8>,
    pub attribution: Option<String>,
    pub opacity: f32,
    pub z_index: i32,
    pub error_tile_url: Option<String>,
    pub tms: bool,
    pub bounds: Option<LatLngBounds>,
}

impl TileLayerOptions {
    /// The zoom tile data is requested at for a given display zoom
    pub fn native_zoom_for(&self, zoom: u8) -> u8 {
        match self.max_native_zoom {
            Some(native) if zoom > native => native,
            _ => zoom,
        }
    }
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_zoom: 0,
            max_zoom: 18,
            max_native_zoom: None,
            attribution: None,
            opacity: 1.0,
            z_index: 1,
            error_tile_url: None,
            tms: false,
            bounds: None,
        }
    }
}

/// What to fetch and how to draw it for one display tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRequest {
    /// Address on the display grid
    pub display: TileCoord,
    /// Address actually fetched, never deeper than the native ceiling
    pub native: TileCoord,
    pub url: String,
    /// Upscale factor, `2^(display.z - native.z)`
    pub scale: u32,
    /// Which sub-square of the native tile covers the display tile, in units of
    /// `tile_size / scale`
    pub offset: (u32, u32),
}

impl TileRequest {
    pub fn is_overzoomed(&self) -> bool {
        self.scale > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileStatus {
    Pending,
    Loaded,
    /// The placeholder image replaced the tile
    Placeholder(String),
    /// Neither the tile nor a placeholder could be shown
    Failed,
}

#[derive(Debug, Clone)]
pub struct TileState {
    pub request: TileRequest,
    pub status: TileStatus,
    /// Whether a load failure for this tile will still be handled
    pub error_handler_attached: bool,
    pub error_count: u32,
}

impl TileState {
    pub fn new(request: TileRequest) -> Self {
        Self {
            request,
            status: TileStatus::Pending,
            error_handler_attached: true,
            error_count: 0,
        }
    }
}

/// Result of reporting a tile load failure to the layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileErrorOutcome {
    /// Load this URL in place of the failed tile
    Substitute(String),
    /// The handler ran but had nothing to offer
    Failed,
    /// No handler is attached for this tile anymore
    Ignored,
}
