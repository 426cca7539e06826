//! Fetches tile images for a [`TileLayer`] and applies its error policy.

use super::cache::TileCache;
use crate::{
    core::geo::TileCoord,
    data::fetch::Fetcher,
    layers::tile::{TileErrorOutcome, TileLayer, TileRequest},
    Result,
};
use std::sync::Arc;

/// Outcome of loading one display tile
#[derive(Debug, Clone)]
pub enum TileLoad {
    /// The native image; upscale by `request.scale` when overzoomed
    Native {
        request: TileRequest,
        data: Arc<Vec<u8>>,
    },
    /// The tile failed and the layer's placeholder is shown instead
    Placeholder {
        request: TileRequest,
        url: String,
        data: Arc<Vec<u8>>,
    },
    /// Nothing to show; the tile stays blank
    Unavailable { request: TileRequest },
}

impl TileLoad {
    pub fn request(&self) -> &TileRequest {
        match self {
            TileLoad::Native { request, .. }
            | TileLoad::Placeholder { request, .. }
            | TileLoad::Unavailable { request } => request,
        }
    }

    pub fn data(&self) -> Option<&Arc<Vec<u8>>> {
        match self {
            TileLoad::Native { data, .. } | TileLoad::Placeholder { data, .. } => Some(data),
            TileLoad::Unavailable { .. } => None,
        }
    }
}

pub struct TileLoader {
    fetcher: Arc<dyn Fetcher>,
    cache: TileCache,
}

impl TileLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_cache(fetcher, TileCache::default())
    }

    pub fn with_cache(fetcher: Arc<dyn Fetcher>, cache: TileCache) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    async fn fetch_cached(&self, url: &str) -> Result<Arc<Vec<u8>>> {
        if let Some(data) = self.cache.get(url) {
            return Ok(data);
        }
        let data = Arc::new(self.fetcher.fetch(url).await?);
        self.cache.put(url, Arc::clone(&data));
        Ok(data)
    }

    /// Loads the display tile at `coord`.
    ///
    /// Returns `None` when the layer refuses the request (detached, outside
    /// its zoom range or bounds). A failed image goes through the layer's
    /// error handler exactly once; if the substitute fails as well the tile
    /// is left blank.
    pub async fn load(&self, layer: &mut TileLayer, coord: TileCoord) -> Option<TileLoad> {
        let request = layer.request_tile(coord)?;

        let error = match self.fetch_cached(&request.url).await {
            Ok(data) => {
                layer.tile_loaded(coord);
                return Some(TileLoad::Native { request, data });
            }
            Err(e) => e,
        };
        log::warn!("tile {} failed: {error}", request.url);

        match layer.tile_failed(coord) {
            TileErrorOutcome::Substitute(url) => match self.fetch_cached(&url).await {
                Ok(data) => Some(TileLoad::Placeholder { request, url, data }),
                Err(e) => {
                    log::error!("placeholder {url} failed as well: {e}");
                    layer.tile_failed(coord);
                    Some(TileLoad::Unavailable { request })
                }
            },
            TileErrorOutcome::Failed | TileErrorOutcome::Ignored => {
                Some(TileLoad::Unavailable { request })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::fetch::MemoryFetcher,
        layers::{base::LayerTrait, tile::TileStatus},
        tiles::manifest::ResolvedZoomConfig,
    };

    fn attached_local_layer() -> TileLayer {
        let mut layer = TileLayer::local(
            "local".to_string(),
            "assets/tiles/{z}/{x}/{y}.png",
            &ResolvedZoomConfig::new(0, 14),
            256,
            None,
            None,
        );
        layer.on_add();
        layer
    }

    #[tokio::test]
    async fn test_overzoomed_tiles_share_native_fetch() {
        let fetcher = Arc::new(
            MemoryFetcher::new().with("assets/tiles/14/16210/10484.png", vec![1u8, 2, 3]),
        );
        let loader = TileLoader::new(fetcher.clone());
        let mut layer = attached_local_layer();

        for (x, y) in [(129685, 83877), (129686, 83877), (129685, 83878)] {
            let load = loader
                .load(&mut layer, TileCoord::new(x, y, 17))
                .await
                .unwrap();
            assert!(matches!(load, TileLoad::Native { .. }));
            assert_eq!(load.request().scale, 8);
        }

        assert_eq!(fetcher.request_count("assets/tiles/14/16210/10484.png"), 1);
    }

    #[tokio::test]
    async fn test_missing_tile_gets_placeholder() {
        let fetcher = Arc::new(MemoryFetcher::new().with("assets/tiles/default.png", vec![0u8]));
        let loader = TileLoader::new(fetcher);
        let mut layer = attached_local_layer();
        let coord = TileCoord::new(63, 40, 7);

        let load = loader.load(&mut layer, coord).await.unwrap();
        match load {
            TileLoad::Placeholder { url, .. } => assert_eq!(url, "assets/tiles/default.png"),
            other => panic!("expected placeholder, got {other:?}"),
        }
        assert_eq!(layer.placeholder_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_placeholder_is_fetched_once() {
        let fetcher = Arc::new(MemoryFetcher::new());
        let loader = TileLoader::new(fetcher.clone());
        let mut layer = attached_local_layer();
        let coord = TileCoord::new(63, 40, 7);

        let load = loader.load(&mut layer, coord).await.unwrap();
        assert!(matches!(load, TileLoad::Unavailable { .. }));
        assert_eq!(fetcher.request_count("assets/tiles/default.png"), 1);
        assert_eq!(fetcher.requests().len(), 2);

        let state = layer.tile_state(&coord).unwrap();
        assert_eq!(state.status, TileStatus::Failed);
        assert!(!state.error_handler_attached);
    }

    #[tokio::test]
    async fn test_detached_layer_loads_nothing() {
        let fetcher = Arc::new(MemoryFetcher::new());
        let loader = TileLoader::new(fetcher.clone());
        let mut layer = attached_local_layer();
        layer.on_remove();

        assert!(loader.load(&mut layer, TileCoord::new(0, 0, 1)).await.is_none());
        assert!(fetcher.requests().is_empty());
    }
}
