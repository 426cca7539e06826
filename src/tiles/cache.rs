use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: usize = 512;

/// In-memory image cache keyed by tile URL.
///
/// Overzoomed display tiles share the URL of their native ancestor, so a
/// whole block of display tiles is served from one cached entry.
#[derive(Debug)]
pub struct TileCache {
    cache: Arc<Mutex<LruCache<String, Arc<Vec<u8>>>>>,
}

impl TileCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    pub fn get(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.cache.lock().ok()?.get(url).cloned()
    }

    pub fn put(&self, url: impl Into<String>, data: Arc<Vec<u8>>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(url.into(), data);
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.contains(url))
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for TileCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
