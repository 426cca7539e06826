use serde::{Deserialize, Serialize};

/// Corner a control is docked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A single-button map control as a host should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlButton {
    pub label: &'static str,
    pub title: &'static str,
    pub aria_label: &'static str,
    pub position: Position,
}

impl ControlButton {
    pub fn new(label: &'static str, title: &'static str, aria_label: &'static str) -> Self {
        Self {
            label,
            title,
            aria_label,
            position: Position::BottomLeft,
        }
    }
}

/// The locate button
pub fn locate_button() -> ControlButton {
    ControlButton::new("📍", "Locate me", "Locate me")
}
