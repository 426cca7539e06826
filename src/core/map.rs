//! Headless map surface.
//!
//! Holds the viewport, the attached layers and the user-facing messages
//! (alerts and notices) a rendering host would display. Hosts that draw
//! through their own engine implement [`MapSurface`] themselves.

use crate::{
    core::{
        constants::FIT_BOUNDS_PADDING,
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    layers::{base::LayerTrait, manager::LayerManager},
    traits::{MapSurface, RejectedLayer},
    ui::notice::Notice,
};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Padding (px) used by `fit_bounds`
    pub fit_padding: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            fit_padding: FIT_BOUNDS_PADDING,
        }
    }
}

pub struct Map {
    viewport: Viewport,
    options: MapOptions,
    layers: LayerManager,
    alerts: Vec<String>,
    notices: Vec<Notice>,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::with_options(Viewport::new(center, zoom, size), MapOptions::default())
    }

    pub fn with_options(viewport: Viewport, options: MapOptions) -> Self {
        Self {
            viewport,
            options,
            layers: LayerManager::new(),
            alerts: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Attached layers in z-order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.layers.layers()
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layers.layers().iter().map(|l| l.id().to_string()).collect()
    }

    /// Alerts raised so far, oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drains the alert queue, as a host does after showing them
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Visible notices
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drops notices whose auto-dismiss delay has passed at `now`
    pub fn expire_notices(&mut self, now: Instant) {
        self.notices.retain(|n| {
            let expired = n.is_expired(now);
            if expired {
                log::debug!("notice '{}' auto-dismissed", n.id);
            }
            !expired
        });
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::with_options(Viewport::default(), MapOptions::default())
    }
}

impl MapSurface for Map {
    fn center(&self) -> LatLng {
        self.viewport.center
    }

    fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.viewport.set_view(center, zoom);
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) {
        self.viewport.fit_bounds(bounds, Some(self.options.fit_padding));
    }

    fn min_zoom(&self) -> f64 {
        self.viewport.min_zoom
    }

    fn max_zoom(&self) -> f64 {
        self.viewport.max_zoom
    }

    fn set_min_zoom(&mut self, zoom: f64) {
        self.viewport.set_min_zoom(zoom);
    }

    fn set_max_zoom(&mut self, zoom: f64) {
        self.viewport.set_max_zoom(zoom);
    }

    fn try_add_layer(
        &mut self,
        layer: Box<dyn LayerTrait>,
    ) -> std::result::Result<(), RejectedLayer> {
        self.layers.try_add_layer(layer)
    }

    fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.layers.remove_layer(layer_id)
    }

    fn has_layer(&self, layer_id: &str) -> bool {
        self.layers.contains(layer_id)
    }

    fn layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get_layer(layer_id)
    }

    fn layer_mut(&mut self, layer_id: &str) -> Option<&mut (dyn LayerTrait + 'static)> {
        self.layers.get_layer_mut(layer_id)
    }

    fn alert(&mut self, message: &str) {
        log::warn!("alert: {message}");
        self.alerts.push(message.to_string());
    }

    fn show_notice(&mut self, notice: Notice) -> bool {
        self.expire_notices(Instant::now());
        if self.notices.iter().any(|n| n.id == notice.id) {
            return false;
        }
        self.notices.push(notice);
        true
    }

    fn dismiss_notice(&mut self, notice_id: &str) {
        self.notices.retain(|n| n.id != notice_id || !n.dismissible);
    }
}
