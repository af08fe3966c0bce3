//! Geteilte Konfiguration zwischen `app` und Host.

pub mod options;

pub use options::EngineOptions;
pub use options::{CAMERA_ANIMATION_MS, DRAG_THRESHOLD_PX};
