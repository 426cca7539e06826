//! Raster tile layers with native/display zoom separation
//!
//! This module provides a tile layer that supports:
//! - URL-template tile sources (local tile tree, OpenStreetMap)
//! - Overzoom: display zooms past the native ceiling reuse upscaled native tiles
//! - Pluggable per-tile load hooks, used for placeholder substitution

pub mod hooks;
pub mod layer;
pub mod trait_impl;
pub mod types;

pub use hooks::{NoPlaceholder, PlaceholderPolicy, TileLoadHook};
pub use layer::TileLayer;
pub use types::{TileErrorOutcome, TileLayerOptions, TileRequest, TileState, TileStatus};
