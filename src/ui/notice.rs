use crate::core::constants::GEO_NOTICE_TIMEOUT;
use std::time::{Duration, Instant};

/// Id of the insecure-context advisory
pub const GEO_NOTICE_ID: &str = "geo-notice";

pub const GEO_NOTICE_MESSAGE: &str =
    "Geolocation needs HTTPS (or localhost). On iOS, HTTP over local Wi\u{2011}Fi is blocked.";

/// A dismissible banner. At most one notice per id is visible at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: String,
    pub message: String,
    pub dismissible: bool,
    pub auto_dismiss: Option<Duration>,
    pub shown_at: Instant,
}

impl Notice {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            dismissible: true,
            auto_dismiss: None,
            shown_at: Instant::now(),
        }
    }

    pub fn with_auto_dismiss(mut self, after: Duration) -> Self {
        self.auto_dismiss = Some(after);
        self
    }

    /// The geolocation advisory shown on plain-HTTP origins
    pub fn geolocation_insecure() -> Self {
        Self::new(GEO_NOTICE_ID, GEO_NOTICE_MESSAGE).with_auto_dismiss(GEO_NOTICE_TIMEOUT)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.auto_dismiss
            .is_some_and(|after| now.saturating_duration_since(self.shown_at) >= after)
    }
}
