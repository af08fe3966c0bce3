//! Map Annotation Engine Library.
//! Z-geordnete Marker, Linien, Polygone und Kreise über einem Layer-Backend,
//! stabil über Style-Reloads hinweg.

pub mod app;
pub mod backend;
pub mod core;
pub mod shared;

pub use app::{MapFacade, PointerEvent, ReloadState, SharedMapFacade};
pub use backend::{BackendCall, BaseStyle, MapBackend, RecordingBackend};
pub use core::{
    AnnotationHandle, AnnotationId, AnnotationKind, BackendError, CameraPosition, CircleHandle,
    CircleOptions, GroupCircleHandle, GroupCircleOptions, LatLng, MarkerCircleHandle,
    MarkerCircleOptions, MarkerHandle, MarkerOptions, OverlayError, PolygonHandle,
    PolygonOptions, PolylineHandle, PolylineOptions, Rgba, ScreenPoint, StyleToken,
};
pub use shared::EngineOptions;
