pub mod config;
pub mod constants;
pub mod geo;
pub mod map;
pub mod viewport;

pub use config::{MapAppConfig, TileLoadingConfig};
pub use geo::{LatLng, LatLngBounds, Point, TileCoord};
pub use map::{Map, MapOptions};
pub use viewport::Viewport;
