//! Prelude module for common xcaox-maps types and traits
//!
//! Re-exports the types most hosts need, for `use xcaox_maps::prelude::*;`

pub use crate::core::{
    config::{MapAppConfig, TileLoadingConfig},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{Map, MapOptions},
    viewport::Viewport,
};

pub use crate::app::MapApp;

pub use crate::data::{
    Area, DataService, Fetcher, FileFetcher, HttpFetcher, MemoryFetcher, Path, Poi, PoiId,
};

pub use crate::layers::{
    base::LayerTrait,
    manager::LayerManager,
    marker::Marker,
    switcher::{LayerKind, LayerSwitcher},
    tile::TileLayer,
    vector::VectorLayer,
};

pub use crate::location::{
    FixedGeolocator, GeolocationError, Geolocator, LocateControl, LocationFix, PositionOptions,
};

pub use crate::poi::PoiStore;

pub use crate::tiles::{
    ManifestResolver, ResolvedZoomConfig, TileLayerManager, TileLoad, TileLoader, TileManifest,
    TileSetup, TileSource,
};

pub use crate::traits::MapSurface;

pub use crate::ui::notice::Notice;

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
