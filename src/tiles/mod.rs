pub mod cache;
pub mod loader;
pub mod manager;
pub mod manifest;
pub mod source;

pub use cache::TileCache;
pub use loader::{TileLoad, TileLoader};
pub use manager::{TileLayerManager, LOCAL_LAYER_ID, OSM_LAYER_ID};
pub use manifest::{InitialView, ManifestResolver, ResolvedZoomConfig, TileManifest, TileSetup};
pub use source::{OpenStreetMapSource, TileSource, UrlTemplateSource};
