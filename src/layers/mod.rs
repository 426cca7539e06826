//! Map layers: the common layer trait, tile layers, markers and vector shapes

#[macro_use]
pub mod macros;

pub mod base;
pub mod manager;
pub mod marker;
pub mod switcher;
pub mod tile;
pub mod vector;

pub use base::{LayerProperties, LayerTrait, LayerType};
pub use manager::LayerManager;
pub use marker::{Icon, Marker};
pub use switcher::{LayerKind, LayerSwitchEvent, LayerSwitcher};
pub use tile::TileLayer;
pub use vector::{Shape, ShapeStyle, VectorLayer};
