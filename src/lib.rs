//! # XCAOX Maps
//!
//! Core of a topographic map viewer: a local raster tile set described by a
//! manifest, an OpenStreetMap fallback layer, points of interest, trail and
//! area overlays, and a "locate me" control.
//!
//! Components draw on any [`MapSurface`]; [`core::map::Map`] is the headless
//! surface used by tests and non-graphical hosts. [`MapApp`] wires them
//! together.

pub mod app;
pub mod core;
pub mod data;
pub mod layers;
pub mod location;
pub mod overlays;
pub mod poi;
pub mod prelude;
pub mod tiles;
pub mod traits;
pub mod ui;
pub mod utils;
pub use crate::core::constants;

// Re-export public API
pub use app::MapApp;

pub use crate::core::{
    config::MapAppConfig,
    geo::{LatLng, LatLngBounds, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use data::{DataService, Fetcher, FileFetcher, HttpFetcher, MemoryFetcher, Poi, PoiId};

pub use layers::{
    base::LayerTrait, marker::Marker, switcher::LayerKind, tile::TileLayer, vector::VectorLayer,
};

pub use location::{GeolocationError, Geolocator, LocateControl, LocationFix};

pub use tiles::{ManifestResolver, ResolvedZoomConfig, TileLoad, TileManifest, TileSetup};

pub use traits::MapSurface;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Geolocation error: {0}")]
    Geolocation(#[from] location::geolocator::GeolocationError),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
