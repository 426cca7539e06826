//! Per-tile load hooks.
//!
//! A tile layer does not decide on its own what happens when an image fails;
//! it asks the [`TileLoadHook`] it was built with.

use super::types::TileRequest;
use crate::core::geo::TileCoord;

/// Strategy consulted by a tile layer around each tile load
pub trait TileLoadHook: Send + Sync {
    /// A tile was requested; observe or record it
    fn on_tile_requested(&mut self, _request: &TileRequest) {}

    /// The tile at `coord` failed to load. Return a URL to show instead.
    ///
    /// Called at most once per tile request.
    fn on_tile_error(&mut self, _coord: TileCoord) -> Option<String> {
        None
    }
}

/// Leaves failed tiles blank
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlaceholder;

impl TileLoadHook for NoPlaceholder {}

/// Substitutes a fixed image for any tile that fails to load
#[derive(Debug, Clone)]
pub struct PlaceholderPolicy {
    url: String,
}

impl PlaceholderPolicy {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TileLoadHook for PlaceholderPolicy {
    fn on_tile_error(&mut self, coord: TileCoord) -> Option<String> {
        log::debug!(
            "tile {}/{}/{} failed, substituting {}",
            coord.z,
            coord.x,
            coord.y,
            self.url
        );
        Some(self.url.clone())
    }
}
