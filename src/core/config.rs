//! Application configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all) is
//! a valid configuration.

use crate::core::{
    constants::{
        DEFAULT_DATA_BASE_PATH, DEFAULT_TILE_URL, FIT_BOUNDS_PADDING, LOCAL_TILE_TEMPLATE,
        MANIFEST_PATH,
    },
    map::MapOptions,
};
use serde::{Deserialize, Serialize};

/// Where the tile layer and data service read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileLoadingConfig {
    pub tile_template: String,
    pub placeholder_url: String,
    pub manifest_path: String,
    /// Raw tile images kept in the in-memory cache
    pub cache_size: usize,
}

impl Default for TileLoadingConfig {
    fn default() -> Self {
        Self {
            tile_template: LOCAL_TILE_TEMPLATE.to_string(),
            placeholder_url: DEFAULT_TILE_URL.to_string(),
            manifest_path: MANIFEST_PATH.to_string(),
            cache_size: 512,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapAppConfig {
    /// Padding (px) around bounds fitted by the headless map
    pub fit_padding: f64,
    /// Directory that holds `data/pois.json` and friends
    pub data_base_path: String,
    pub tiles: TileLoadingConfig,
}

impl Default for MapAppConfig {
    fn default() -> Self {
        Self {
            fit_padding: FIT_BOUNDS_PADDING,
            data_base_path: DEFAULT_DATA_BASE_PATH.to_string(),
            tiles: TileLoadingConfig::default(),
        }
    }
}

impl MapAppConfig {
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            fit_padding: self.fit_padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: MapAppConfig =
            serde_json::from_str(r#"{"fitPadding": 8.0, "tiles": {"cacheSize": 64}}"#).unwrap();

        assert_eq!(config.fit_padding, 8.0);
        assert_eq!(config.data_base_path, "src");
        assert_eq!(config.tiles.cache_size, 64);
        assert_eq!(config.tiles.tile_template, "assets/tiles/{z}/{x}/{y}.png");
    }

    #[test]
    fn test_map_options_follow_config() {
        let config = MapAppConfig {
            fit_padding: 0.0,
            ..Default::default()
        };
        assert_eq!(config.map_options(), MapOptions { fit_padding: 0.0 });
        assert_eq!(MapAppConfig::default().map_options(), MapOptions::default());
    }
}
