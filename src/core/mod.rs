//! Core-Domänentypen: Annotationen, Geometrie, Paint, Z-Index-Liste, Kamera.

pub mod annotation;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod icon_cache;
pub mod ids;
pub mod paint;
pub mod spatial;
pub mod zindex_list;

pub use annotation::{
    Annotation, AnnotationBody, AnnotationHandle, AnnotationId, AnnotationKind, Centered,
    CircleHandle, CircleOptions, CircleState, Colored, DEFAULT_MARKER_ICON, GroupCircleHandle,
    GroupCircleOptions, GroupCircleState, LayerSpec, MarkerCircleHandle, MarkerCircleOptions,
    MarkerCircleState, MarkerHandle, MarkerOptions, MarkerState, Patch, PolygonHandle,
    PolygonOptions, PolygonState, PolylineHandle, PolylineOptions, PolylineState, Pointed,
    Stroked, StyleDefaults, Widthed, zip_circles,
};
pub use camera::CameraPosition;
pub use error::{BackendError, OverlayError, Result};
pub use geometry::{CircleShape, Geometry, LatLng, ScreenPoint};
pub use icon_cache::{IconCache, IconKey, icon_from_png};
pub use ids::{FeedId, LayerBinding, LayerId, NativeMarkerId, StyleToken};
pub use paint::{LayerKind, PaintKey, PaintProps, PaintValue, Rgba};
pub use spatial::{ScreenHitIndex, ScreenMatch};
pub use zindex_list::{ZIndexEntry, ZIndexList, ZKey};
