//! Device location: the geolocation capability and the "locate me" control

pub mod control;
pub mod geolocator;

pub use control::{check_secure_origin, is_secure_origin, LocateControl, LocateState};
pub use geolocator::{FixedGeolocator, GeolocationError, Geolocator, LocationFix, PositionOptions};
