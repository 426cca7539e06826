//! Byte fetchers for manifest, data files and tile images.
//!
//! Everything the viewer loads goes through a [`Fetcher`], so the same
//! components run against a web origin, a directory on disk or an in-memory
//! fixture.

use crate::{prelude::HashMap, MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Url;
use std::{
    path::{Component, PathBuf},
    sync::Mutex,
    time::Duration,
};

/// Shared async HTTP client. Public tile servers reject requests without a
/// descriptive User-Agent.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("xcaox-maps/", env!("CARGO_PKG_VERSION")))
        .tcp_keepalive(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
});

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `path`, relative to the fetcher's origin, or an absolute URL
    async fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}

fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Fetches over HTTP relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base: Url,
}

impl HttpFetcher {
    pub fn new(base: &str) -> Result<Self> {
        let mut base =
            Url::parse(base).map_err(|e| MapError::ParseError(format!("base url {base}: {e}")))?;
        // without a trailing slash `join` would replace the last segment
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        let joined = if is_absolute_url(path) {
            Url::parse(path)
        } else {
            self.base.join(path.trim_start_matches('/'))
        };
        joined.map_err(|e| MapError::ParseError(format!("url {path}: {e}")))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.resolve(path)?;
        log::debug!("GET {url}");
        let response = HTTP_CLIENT.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Reads files below a root directory
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request path into the root; paths escaping the root are refused
    fn local_path(&self, path: &str) -> Result<PathBuf> {
        let relative = std::path::Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(MapError::ParseError(format!("path outside root: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        if is_absolute_url(path) {
            return Err(MapError::ParseError(format!(
                "file fetcher cannot load remote url {path}"
            )));
        }
        let file = self.local_path(path)?;
        Ok(tokio::fs::read(file).await?)
    }
}

/// Serves fixed responses from memory and records every request
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    files: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), body.into());
        }
    }

    pub fn remove(&self, path: &str) {
        if let Ok(mut files) = self.files.lock() {
            files.remove(path);
        }
    }

    /// Paths requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .map(|requests| requests.iter().filter(|r| *r == path).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(path.to_string());
        }
        self.files
            .lock()
            .ok()
            .and_then(|files| files.get(path).cloned())
            .ok_or_else(|| MapError::Status {
                status: 404,
                url: path.to_string(),
            })
    }
}
