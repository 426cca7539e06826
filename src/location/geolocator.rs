//! The device position capability, as seen by the locate control

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A position report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius of uncertainty in meters
    pub accuracy: f64,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            timestamp: now_millis(),
        }
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct GeolocationError {
    pub code: u16,
    pub message: String,
}

impl GeolocationError {
    pub const UNSUPPORTED: u16 = 0;
    pub const PERMISSION_DENIED: u16 = 1;
    pub const POSITION_UNAVAILABLE: u16 = 2;
    pub const TIMEOUT: u16 = 3;

    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn permission_denied() -> Self {
        Self::new(Self::PERMISSION_DENIED, "User denied Geolocation")
    }

    pub fn unavailable() -> Self {
        Self::new(Self::POSITION_UNAVAILABLE, "Position unavailable")
    }

    pub fn timeout() -> Self {
        Self::new(Self::TIMEOUT, "Timeout expired")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Accept a cached position no older than this
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: crate::core::constants::LOCATE_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Whether the host can provide positions at all
    fn is_available(&self) -> bool {
        true
    }

    /// A single position request. Callers enforce `options.timeout`.
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> std::result::Result<LocationFix, GeolocationError>;
}

/// Answers every request with a preset result, optionally after a delay
#[derive(Debug, Clone)]
pub struct FixedGeolocator {
    result: std::result::Result<LocationFix, GeolocationError>,
    delay: Option<Duration>,
    available: bool,
}

impl FixedGeolocator {
    pub fn at(fix: LocationFix) -> Self {
        Self {
            result: Ok(fix),
            delay: None,
            available: true,
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self {
            result: Err(error),
            delay: None,
            available: true,
        }
    }

    /// A host without a position capability
    pub fn unavailable() -> Self {
        Self {
            result: Err(GeolocationError::new(
                GeolocationError::UNSUPPORTED,
                "Geolocation is not supported",
            )),
            delay: None,
            available: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> std::result::Result<LocationFix, GeolocationError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}
