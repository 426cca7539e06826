use crate::core::{
    constants::{LOCAL_TILE_TEMPLATE, OSM_TILE_TEMPLATE},
    geo::TileCoord,
};

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Expands a `{z}/{x}/{y}` URL template.
///
/// Supported placeholders: `{z}`, `{x}`, `{y}`, `{-y}` (TMS row) and `{s}`
/// (subdomain, rotated by `x + y`).
#[derive(Debug, Clone)]
pub struct UrlTemplateSource {
    template: String,
    subdomains: Vec<String>,
    tms: bool,
}

impl UrlTemplateSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: Vec::new(),
            tms: false,
        }
    }

    pub fn with_subdomains<I, S>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
        self
    }

    /// Flip `{y}` to the TMS row numbering
    pub fn with_tms(mut self, tms: bool) -> Self {
        self.tms = tms;
        self
    }

    /// The local topo tile tree
    pub fn local() -> Self {
        Self::new(LOCAL_TILE_TEMPLATE)
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        let max_row = (1u64 << coord.z.min(31)) - 1;
        let flipped = max_row.saturating_sub(coord.y as u64);
        let y = if self.tms { flipped } else { coord.y as u64 };

        let mut url = self
            .template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{-y}", &flipped.to_string())
            .replace("{y}", &y.to_string());

        if url.contains("{s}") {
            let sub = if self.subdomains.is_empty() {
                ""
            } else {
                let idx = ((coord.x as u64 + coord.y as u64) % self.subdomains.len() as u64) as usize;
                self.subdomains[idx].as_str()
            };
            url = url.replace("{s}", sub);
        }
        url
    }
}

/// Public OpenStreetMap tile servers.
pub struct OpenStreetMapSource {
    inner: UrlTemplateSource,
}

impl OpenStreetMapSource {
    pub fn new() -> Self {
        Self {
            inner: UrlTemplateSource::new(OSM_TILE_TEMPLATE).with_subdomains(["a", "b", "c"]),
        }
    }
}

impl Default for OpenStreetMapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSource for OpenStreetMapSource {
    fn url(&self, coord: TileCoord) -> String {
        self.inner.url(coord)
    }
}
