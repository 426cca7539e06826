//! Data access: fetchers and the JSON records the viewer loads

pub mod fetch;
pub mod service;
pub mod types;

pub use fetch::{FileFetcher, Fetcher, HttpFetcher, MemoryFetcher};
pub use service::DataService;
pub use types::{Area, AreaStyle, Path, PathPoint, PathStyle, Poi, PoiId};
