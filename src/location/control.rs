//! The "locate me" control: one geolocation request per press, a single
//! user marker with its accuracy circle, and the insecure-origin advisory.

use super::geolocator::{GeolocationError, Geolocator, LocationFix, PositionOptions};
use crate::{
    core::{
        constants::{LOCATE_MAX_ZOOM, USER_ICON_ANCHOR, USER_ICON_SIZE, USER_ICON_URL},
        geo::LatLng,
    },
    layers::{
        marker::{Icon, Marker},
        vector::{ShapeStyle, VectorLayer},
    },
    traits::MapSurface,
    ui::{
        controls::{self, ControlButton},
        notice::Notice,
    },
    MapError, Result,
};
use reqwest::Url;

/// Surface id of the user-position marker
pub const USER_MARKER_ID: &str = "user-location";

/// Surface id of the accuracy circle
pub const ACCURACY_CIRCLE_ID: &str = "user-accuracy";

pub const UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported on this device/browser.";

/// Hosts treated as secure even over plain HTTP
const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

#[derive(Debug, Clone, PartialEq)]
pub enum LocateState {
    Idle,
    AwaitingFix,
    Found(LocationFix),
    Error(GeolocationError),
}

/// Whether the browser would allow geolocation on this origin
pub fn is_secure_origin(origin: &Url) -> bool {
    origin.scheme() == "https"
        || origin
            .host_str()
            .is_some_and(|host| LOOPBACK_HOSTS.contains(&host))
}

/// Shows the geolocation advisory on insecure origins. Returns whether a
/// notice was added; an already visible advisory is left alone.
pub fn check_secure_origin(surface: &mut dyn MapSurface, origin: &Url) -> bool {
    if is_secure_origin(origin) {
        return false;
    }
    log::warn!("geolocation usually requires HTTPS; {origin} is not a secure origin");
    surface.show_notice(Notice::geolocation_insecure())
}

/// "Locate me": centers on the device position and keeps one user marker
/// and one accuracy circle on the surface.
pub struct LocateControl {
    state: LocateState,
    /// Fix behind the marker on the surface; outlives later failed requests
    last_fix: Option<LocationFix>,
    options: PositionOptions,
}

impl Default for LocateControl {
    fn default() -> Self {
        Self::new()
    }
}

impl LocateControl {
    pub fn new() -> Self {
        Self {
            state: LocateState::Idle,
            last_fix: None,
            options: PositionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &LocateState {
        &self.state
    }

    pub fn button(&self) -> ControlButton {
        controls::locate_button()
    }

    pub async fn locate(
        &mut self,
        surface: &mut dyn MapSurface,
        geolocator: Option<&dyn Geolocator>,
        origin: Option<&Url>,
    ) -> Result<LocationFix> {
        let Some(geolocator) = geolocator.filter(|g| g.is_available()) else {
            surface.alert(UNSUPPORTED_MESSAGE);
            return Err(MapError::Geolocation(GeolocationError::new(
                GeolocationError::UNSUPPORTED,
                UNSUPPORTED_MESSAGE,
            )));
        };

        if let Some(origin) = origin {
            check_secure_origin(surface, origin);
        }

        let zoom = LOCATE_MAX_ZOOM.min(surface.max_zoom());
        self.state = LocateState::AwaitingFix;

        let result =
            match tokio::time::timeout(self.options.timeout, geolocator.current_position(&self.options))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(GeolocationError::timeout()),
            };

        match result {
            Ok(fix) => {
                self.on_found(surface, fix, zoom);
                Ok(fix)
            }
            Err(error) => {
                log::error!("location error {}: {}", error.code, error.message);
                surface.alert(&format!("Location error: {}", error.message));
                self.state = LocateState::Error(error.clone());
                Err(MapError::Geolocation(error))
            }
        }
    }

    fn on_found(&mut self, surface: &mut dyn MapSurface, fix: LocationFix, zoom: f64) {
        let position = LatLng::new(fix.latitude, fix.longitude);
        surface.set_view(position, zoom);

        let moved = surface
            .layer_mut(USER_MARKER_ID)
            .and_then(|l| l.as_any_mut().downcast_mut::<Marker>())
            .map(|marker| marker.set_position(position))
            .is_some();
        if !moved {
            let marker = Marker::new(USER_MARKER_ID.to_string(), position)
                .with_icon(Icon::new(USER_ICON_URL, USER_ICON_SIZE, USER_ICON_ANCHOR))
                .with_title("Your location");
            if let Err(e) = surface.add_layer(Box::new(marker)) {
                log::error!("failed to add user marker: {e}");
            }
        }

        let updated = surface
            .layer_mut(ACCURACY_CIRCLE_ID)
            .and_then(|l| l.as_any_mut().downcast_mut::<VectorLayer>())
            .map(|circle| {
                circle.set_center(position);
                circle.set_radius(fix.accuracy);
            })
            .is_some();
        if !updated {
            let circle = VectorLayer::circle(
                ACCURACY_CIRCLE_ID.to_string(),
                position,
                fix.accuracy,
                ShapeStyle::accuracy(),
            );
            if let Err(e) = surface.add_layer(Box::new(circle)) {
                log::error!("failed to add accuracy circle: {e}");
            }
        }

        log::info!(
            "location found: ({:.5}, {:.5}) ±{:.0} m",
            fix.latitude,
            fix.longitude,
            fix.accuracy
        );
        self.last_fix = Some(fix);
        self.state = LocateState::Found(fix);
    }

    /// Position the user marker shows, if any. A failed request after a
    /// fix leaves both the marker and this value in place.
    pub fn current_location(&self) -> Option<LocationFix> {
        self.last_fix
    }

    /// Removes the user marker and accuracy circle
    pub fn clear_location(&mut self, surface: &mut dyn MapSurface) {
        surface.remove_layer(USER_MARKER_ID);
        surface.remove_layer(ACCURACY_CIRCLE_ID);
        self.last_fix = None;
        self.state = LocateState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::map::Map, location::geolocator::FixedGeolocator, ui::notice::GEO_NOTICE_ID};
    use std::time::Duration;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_secure_origins() {
        assert!(is_secure_origin(&url("https://maps.example.com/")));
        assert!(is_secure_origin(&url("http://localhost:3001/")));
        assert!(is_secure_origin(&url("http://127.0.0.1/")));
        assert!(is_secure_origin(&url("http://[::1]:8080/")));
        assert!(!is_secure_origin(&url("http://192.168.1.20:3001/")));
        assert!(!is_secure_origin(&url("http://maps.example.com/")));
    }

    #[test]
    fn test_advisory_shown_once() {
        let mut map = Map::default();
        let origin = url("http://192.168.1.20:3001/");

        assert!(check_secure_origin(&mut map, &origin));
        assert!(!check_secure_origin(&mut map, &origin));
        assert_eq!(map.notices().len(), 1);
        assert_eq!(map.notices()[0].id, GEO_NOTICE_ID);
        assert!(!check_secure_origin(&mut map, &url("https://maps.example.com/")));
    }

    #[tokio::test]
    async fn test_unsupported_alerts_without_request() {
        let mut map = Map::default();
        let mut control = LocateControl::new();

        assert!(control.locate(&mut map, None, None).await.is_err());
        let geolocator = FixedGeolocator::unavailable();
        assert!(control.locate(&mut map, Some(&geolocator), None).await.is_err());

        assert_eq!(map.alerts(), &[UNSUPPORTED_MESSAGE, UNSUPPORTED_MESSAGE]);
        assert_eq!(control.state(), &LocateState::Idle);
    }

    #[tokio::test]
    async fn test_found_creates_then_moves_single_marker() {
        let mut map = Map::default();
        map.set_max_zoom(17.0);
        let mut control = LocateControl::new();

        let first = FixedGeolocator::at(LocationFix::new(-41.29, 174.78, 30.0));
        control.locate(&mut map, Some(&first), None).await.unwrap();
        assert_eq!(map.center(), LatLng::new(-41.29, 174.78));
        assert_eq!(map.zoom(), 15.0);

        let second = FixedGeolocator::at(LocationFix::new(-41.30, 174.79, 12.0));
        control.locate(&mut map, Some(&second), None).await.unwrap();

        let marker = map
            .layer(USER_MARKER_ID)
            .and_then(|l| l.as_any().downcast_ref::<Marker>())
            .unwrap();
        assert_eq!(marker.position(), LatLng::new(-41.30, 174.79));
        assert_eq!(marker.title(), Some("Your location"));

        let circle = map
            .layer(ACCURACY_CIRCLE_ID)
            .and_then(|l| l.as_any().downcast_ref::<VectorLayer>())
            .unwrap();
        assert_eq!(circle.radius(), Some(12.0));
        assert_eq!(map.layers().len(), 2);
        assert_eq!(control.current_location().unwrap().accuracy, 12.0);
    }

    #[tokio::test]
    async fn test_locate_zoom_capped_by_ceiling() {
        let mut map = Map::default();
        map.set_max_zoom(13.0);
        let mut control = LocateControl::new();
        let geolocator = FixedGeolocator::at(LocationFix::new(-41.29, 174.78, 30.0));

        control.locate(&mut map, Some(&geolocator), None).await.unwrap();
        assert_eq!(map.zoom(), 13.0);
    }

    #[tokio::test]
    async fn test_error_alerts_and_leaves_markers() {
        let mut map = Map::default();
        let mut control = LocateControl::new();
        let ok = FixedGeolocator::at(LocationFix::new(-41.29, 174.78, 30.0));
        control.locate(&mut map, Some(&ok), None).await.unwrap();

        let denied = FixedGeolocator::failing(GeolocationError::permission_denied());
        let err = control.locate(&mut map, Some(&denied), None).await.unwrap_err();

        assert!(matches!(err, MapError::Geolocation(ref e) if e.code == 1));
        assert_eq!(map.alerts(), &["Location error: User denied Geolocation"]);
        assert!(map.has_layer(USER_MARKER_ID));
        assert!(map.has_layer(ACCURACY_CIRCLE_ID));
    }

    #[tokio::test]
    async fn test_failed_locate_keeps_shown_position() {
        let mut map = Map::default();
        let mut control = LocateControl::new();
        let ok = FixedGeolocator::at(LocationFix::new(-41.29, 174.78, 30.0));
        control.locate(&mut map, Some(&ok), None).await.unwrap();

        for error in [GeolocationError::permission_denied(), GeolocationError::timeout()] {
            let failing = FixedGeolocator::failing(error.clone());
            control.locate(&mut map, Some(&failing), None).await.unwrap_err();

            assert_eq!(control.state(), &LocateState::Error(error));
            assert!(map.has_layer(USER_MARKER_ID));
            let shown = control.current_location().unwrap();
            assert_eq!((shown.latitude, shown.longitude), (-41.29, 174.78));
        }

        control.clear_location(&mut map);
        assert!(control.current_location().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_times_out_after_ten_seconds() {
        let mut map = Map::default();
        let mut control = LocateControl::new();
        let slow = FixedGeolocator::at(LocationFix::new(0.0, 0.0, 1.0))
            .with_delay(Duration::from_secs(60));

        let err = control.locate(&mut map, Some(&slow), None).await.unwrap_err();
        assert!(matches!(err, MapError::Geolocation(ref e) if e.code == 3));
        assert_eq!(map.alerts(), &["Location error: Timeout expired"]);
        assert!(!map.has_layer(USER_MARKER_ID));
    }

    #[tokio::test]
    async fn test_insecure_origin_notice_does_not_block_request() {
        let mut map = Map::default();
        let mut control = LocateControl::new();
        let geolocator = FixedGeolocator::at(LocationFix::new(-41.29, 174.78, 30.0));
        let origin = url("http://10.0.0.5:3001/");

        control
            .locate(&mut map, Some(&geolocator), Some(&origin))
            .await
            .unwrap();
        control
            .locate(&mut map, Some(&geolocator), Some(&origin))
            .await
            .unwrap();
        assert_eq!(map.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_location() {
        let mut map = Map::default();
        let mut control = LocateControl::new();
        let geolocator = FixedGeolocator::at(LocationFix::new(-41.29, 174.78, 30.0));
        control.locate(&mut map, Some(&geolocator), None).await.unwrap();

        control.clear_location(&mut map);
        assert!(map.layers().is_empty());
        assert!(control.current_location().is_none());
    }
}
