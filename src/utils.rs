use crate::core::geo::LatLng;

/// Great-circle distance in meters between two `[lat, lng]` pairs
pub fn calculate_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    LatLng::from(a).distance_to(&LatLng::from(b))
}

/// `"850 m"` below one kilometer, `"1.2 km"` above
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round())
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
