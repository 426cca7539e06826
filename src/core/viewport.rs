use crate::core::{
    constants::TILE_SIZE,
    geo::{LatLng, LatLngBounds, Point},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const EARTH_RADIUS: f64 = 6378137.0;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }

    /// Sets the center of the viewport, clamped to the Mercator world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        );
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the lower zoom limit; the upper limit is raised if needed
    pub fn set_min_zoom(&mut self, min_zoom: f64) {
        self.set_zoom_limits(min_zoom, self.max_zoom.max(min_zoom));
    }

    /// Sets the upper zoom limit; the lower limit is lowered if needed
    pub fn set_max_zoom(&mut self, max_zoom: f64) {
        self.set_zoom_limits(self.min_zoom.min(max_zoom), max_zoom);
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Sets center and zoom in one step
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.set_center(center);
        self.set_zoom(zoom);
    }

    /// Projects a LatLng to world pixel coordinates (EPSG:3857) at the given zoom level
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let lat = LatLng::clamp_lat(lat_lng.lat);
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;

        let pixel_x = (x + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;
        let pixel_y = (-y + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Fits the viewport to contain the given bounds.
    ///
    /// Picks the highest integer zoom within the limits at which the projected
    /// bounds fit inside the padded viewport.
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: Option<f64>) {
        let padding = padding.unwrap_or(crate::core::constants::FIT_BOUNDS_PADDING);
        let available = Point::new(
            (self.size.x - 2.0 * padding).max(1.0),
            (self.size.y - 2.0 * padding).max(1.0),
        );

        let mut best_zoom = self.min_zoom;

        for test_zoom in (self.min_zoom.ceil() as i32)..=(self.max_zoom.floor() as i32) {
            let zoom = test_zoom as f64;

            let nw = self.project(
                &LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
                Some(zoom),
            );
            let se = self.project(
                &LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
                Some(zoom),
            );

            let span = se.subtract(&nw);
            if span.x.abs() <= available.x && span.y.abs() <= available.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        self.set_center(bounds.center());
        self.set_zoom(best_zoom);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(-41.2865, 174.7762),
            10.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.lat, -41.2865);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_max_zoom_clamps_current_zoom() {
        let mut viewport = Viewport::default();
        viewport.set_max_zoom(19.0);
        viewport.set_zoom(19.0);
        viewport.set_max_zoom(17.0);
        assert_eq!(viewport.zoom, 17.0);
        assert_eq!(viewport.max_zoom, 17.0);
    }

    #[test]
    fn test_fit_bounds_centers_and_zooms_in() {
        let mut viewport = Viewport::new(LatLng::default(), 0.0, Point::new(1024.0, 768.0));
        viewport.set_zoom_limits(0.0, 18.0);

        let bounds = LatLngBounds::from_coords(-41.4, 174.6, -41.2, 174.9);
        viewport.fit_bounds(&bounds, None);

        assert_eq!(viewport.center, bounds.center());
        assert!(viewport.zoom >= 10.0, "zoom {} too low", viewport.zoom);
        assert_eq!(viewport.zoom.fract(), 0.0);
    }

    #[test]
    fn test_fit_bounds_respects_max_zoom() {
        let mut viewport = Viewport::new(LatLng::default(), 0.0, Point::new(1024.0, 768.0));
        viewport.set_zoom_limits(0.0, 5.0);

        let tiny = LatLngBounds::from_coords(-41.2866, 174.7761, -41.2864, 174.7763);
        viewport.fit_bounds(&tiny, None);
        assert_eq!(viewport.zoom, 5.0);
    }
}
