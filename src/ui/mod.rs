//! Host-independent UI pieces: notices, popup markup and control buttons

pub mod controls;
pub mod notice;
pub mod popup;

pub use controls::{ControlButton, Position};
pub use notice::Notice;
