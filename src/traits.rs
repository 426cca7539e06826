//! Shared trait abstractions for the seams between viewer components
//!
//! Components never talk to a concrete map implementation. They receive a
//! `&mut dyn MapSurface` so the same logic drives the headless [`Map`] used in
//! tests and any real rendering host.
//!
//! [`Map`]: crate::core::map::Map

use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::LayerTrait,
    ui::notice::Notice,
    MapError, Result,
};

/// A layer the surface refused to attach, handed back with the reason
pub type RejectedLayer = (Box<dyn LayerTrait>, MapError);

/// The rendering surface every component draws on
pub trait MapSurface {
    /// Current view center
    fn center(&self) -> LatLng;

    /// Current zoom level
    fn zoom(&self) -> f64;

    /// Moves the view; zoom is clamped to the current limits
    fn set_view(&mut self, center: LatLng, zoom: f64);

    /// Fits the view to the given bounds
    fn fit_bounds(&mut self, bounds: &LatLngBounds);

    fn min_zoom(&self) -> f64;
    fn max_zoom(&self) -> f64;
    fn set_min_zoom(&mut self, zoom: f64);
    fn set_max_zoom(&mut self, zoom: f64);

    /// Attaches a layer. Fails if a layer with the same id is attached.
    fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.try_add_layer(layer).map_err(|(_, error)| error)
    }

    /// Attaches a layer, returning it to the caller if the surface refuses it
    fn try_add_layer(
        &mut self,
        layer: Box<dyn LayerTrait>,
    ) -> std::result::Result<(), RejectedLayer>;

    /// Detaches a layer and hands ownership back to the caller
    fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>>;

    fn has_layer(&self, layer_id: &str) -> bool;

    fn layer(&self, layer_id: &str) -> Option<&dyn LayerTrait>;

    fn layer_mut(&mut self, layer_id: &str) -> Option<&mut (dyn LayerTrait + 'static)>;

    /// Blocking, user-visible error message
    fn alert(&mut self, message: &str);

    /// Shows a notice unless one with the same id is already visible.
    /// Returns whether the notice was added.
    fn show_notice(&mut self, notice: Notice) -> bool;

    fn dismiss_notice(&mut self, notice_id: &str);
}
