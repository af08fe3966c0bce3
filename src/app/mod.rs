//! Application-Layer: Facade, Registry, Reload-Koordination und Drag-Gesten.

pub mod drag;
pub mod events;
pub mod facade;
mod materialize;
pub mod registry;
pub mod shadow_marker;
pub mod style_reload;

pub use drag::{DragGestureController, DragSession, PointerEvent};
pub use events::Listeners;
pub use facade::{MapFacade, SharedMapFacade};
pub use registry::AnnotationRegistry;
pub use shadow_marker::{ShadowMarkerBridge, ShadowMarkers};
pub use style_reload::{ReloadState, StyleReadyCallback, StyleReloadCoordinator};
