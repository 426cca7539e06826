use super::{
    fetch::Fetcher,
    types::{Area, Path, Poi},
};
use crate::{
    core::constants::{DEFAULT_DATA_BASE_PATH, MANIFEST_PATH},
    tiles::manifest::TileManifest,
    Result,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Loads the viewer's JSON data. Every fetch degrades to "no data" on
/// failure; callers never see an error.
#[derive(Clone)]
pub struct DataService {
    fetcher: Arc<dyn Fetcher>,
    base_path: String,
    manifest_path: String,
}

impl DataService {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            base_path: DEFAULT_DATA_BASE_PATH.to_string(),
            manifest_path: MANIFEST_PATH.to_string(),
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_manifest_path(mut self, manifest_path: impl Into<String>) -> Self {
        self.manifest_path = manifest_path.into();
        self
    }

    pub fn fetcher(&self) -> &Arc<dyn Fetcher> {
        &self.fetcher
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn data_path(&self, file: &str) -> String {
        if self.base_path.is_empty() {
            format!("data/{file}")
        } else {
            format!("{}/data/{file}", self.base_path)
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.fetcher.fetch(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, file: &str, what: &str) -> Vec<T> {
        let path = self.data_path(file);
        match self.fetch_json::<Vec<T>>(&path).await {
            Ok(items) => {
                log::info!("loaded {} {what} from {path}", items.len());
                items
            }
            Err(e) => {
                log::error!("error fetching {what} from {path}: {e}");
                Vec::new()
            }
        }
    }

    pub async fn fetch_pois(&self) -> Vec<Poi> {
        self.fetch_list("pois.json", "POIs").await
    }

    pub async fn fetch_paths(&self) -> Vec<Path> {
        self.fetch_list("paths.json", "paths").await
    }

    pub async fn fetch_areas(&self) -> Vec<Area> {
        self.fetch_list("areas.json", "areas").await
    }

    /// The tile manifest, or `None` if it is missing or unreadable
    pub async fn fetch_manifest(&self) -> Option<TileManifest> {
        match self.fetch_json::<TileManifest>(&self.manifest_path).await {
            Ok(manifest) => {
                log::info!("loaded tile manifest from {}", self.manifest_path);
                Some(manifest)
            }
            Err(e) => {
                log::warn!(
                    "tile manifest {} unavailable, using defaults: {e}",
                    self.manifest_path
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{fetch::MemoryFetcher, types::PoiId};

    #[tokio::test]
    async fn test_fetch_pois_from_default_base() {
        let fetcher = MemoryFetcher::new().with(
            "src/data/pois.json",
            r#"[{"id": 1, "name": "Hut", "latitude": -41.0, "longitude": 174.0}]"#,
        );
        let service = DataService::new(Arc::new(fetcher));

        let pois = service.fetch_pois().await;
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id, PoiId::Int(1));
    }

    #[tokio::test]
    async fn test_failures_yield_empty_lists() {
        let fetcher = MemoryFetcher::new().with("src/data/paths.json", "{not json");
        let service = DataService::new(Arc::new(fetcher));

        assert!(service.fetch_pois().await.is_empty());
        assert!(service.fetch_paths().await.is_empty());
        assert!(service.fetch_areas().await.is_empty());
        assert!(service.fetch_manifest().await.is_none());
    }

    #[tokio::test]
    async fn test_custom_base_path() {
        let fetcher = Arc::new(MemoryFetcher::new().with("static/data/areas.json", "[]"));
        let service = DataService::new(fetcher.clone()).with_base_path("static/");

        assert!(service.fetch_areas().await.is_empty());
        assert_eq!(fetcher.requests(), vec!["static/data/areas.json"]);
    }

    #[tokio::test]
    async fn test_manifest_is_parsed() {
        let fetcher = MemoryFetcher::new().with(
            "assets/tiles/manifest.json",
            r#"{"minZoom": 5, "maxZoom": 12, "tileSize": 256, "format": "png"}"#,
        );
        let service = DataService::new(Arc::new(fetcher));

        let manifest = service.fetch_manifest().await.unwrap();
        assert_eq!(manifest.min_zoom, Some(5));
        assert_eq!(manifest.max_zoom, Some(12));
    }
}
