//! Viewer-wide constants: Leaflet-style defaults plus the deployment values of
//! the local topo tile set. Keeping them in a single place makes it easier to
//! tweak engine-wide magic numbers.

use std::time::Duration;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Native zoom ceiling assumed when no manifest says otherwise.
pub const DEFAULT_MAX_NATIVE_ZOOM: u8 = 14;

/// Native zoom floor assumed when no manifest says otherwise.
pub const DEFAULT_MIN_NATIVE_ZOOM: u8 = 0;

/// How many levels past the native ceiling tiles may be upscaled.
pub const OVERZOOM_LEVELS: u8 = 3;

/// Absolute display ceiling for the local tile layer.
pub const LOCAL_DISPLAY_ZOOM_CAP: u8 = 18;

/// Display ceiling of the public web tile layer.
pub const OSM_MAX_ZOOM: u8 = 19;

/// Fallback view used when the manifest has neither bounds nor center.
pub const FALLBACK_CENTER: (f64, f64) = (-41.5, 174.0);

/// Zoom used together with [`FALLBACK_CENTER`] or a manifest center.
pub const FALLBACK_ZOOM: f64 = 8.0;

/// Attribution for the local tile set.
pub const LOCAL_ATTRIBUTION: &str = "NZ Topos by XCAOX";

/// Attribution for the public web tile layer.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Tile URL template for the local tile tree.
pub const LOCAL_TILE_TEMPLATE: &str = "assets/tiles/{z}/{x}/{y}.png";

/// Tile URL template for the public web tile layer.
pub const OSM_TILE_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Placeholder image substituted for tiles that fail to load.
pub const DEFAULT_TILE_URL: &str = "assets/tiles/default.png";

/// Location of the tile manifest.
pub const MANIFEST_PATH: &str = "assets/tiles/manifest.json";

/// Default icon for POI markers.
pub const POI_ICON_URL: &str = "assets/icons/poi-marker.svg";

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);

/// Size and anchor of the user-position dot.
pub const USER_ICON_SIZE: (u32, u32) = (24, 24);
pub const USER_ICON_ANCHOR: (u32, u32) = (12, 12);

/// Geolocation request timeout.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Zoom used when centering on the user, capped by the current ceiling.
pub const LOCATE_MAX_ZOOM: f64 = 15.0;

/// Lifetime of the insecure-context advisory.
pub const GEO_NOTICE_TIMEOUT: Duration = Duration::from_secs(8);

/// Padding (px) applied when fitting bounds.
pub const FIT_BOUNDS_PADDING: f64 = 20.0;

/// Directory holding `data/*.json`.
pub const DEFAULT_DATA_BASE_PATH: &str = "src";

/// Blue dot used for the user-position marker (inline SVG).
pub const USER_ICON_URL: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjQiIGhlaWdodD0iMjQiIHZpZXdCb3g9IjAgMCAyNCAyNCIgZmlsbD0ibm9uZSIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KPGNpcmNsZSBjeD0iMTIiIGN5PSIxMiIgcj0iNCIgZmlsbD0iIzEzNkFFQyIvPgo8Y2lyY2xlIGN4PSIxMiIgY3k9IjEyIiByPSIyIiBmaWxsPSJ3aGl0ZSIvPgo8L3N2Zz4K";
