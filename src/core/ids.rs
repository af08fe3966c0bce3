//! Backend-vergebene Kennungen für Layer, Feeds, native Marker und Style-Anfragen.
//!
//! Die Werte sind nur bis zum nächsten Style-Reload gültig; die
//! Annotation-Identität lebt unabhängig davon in `AnnotationId`.

use std::fmt;

/// Kennung eines Render-Layers im Backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// Kennung eines Geometry-Feeds im Backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedId(pub u64);

/// Kennung eines nativen (Shadow-)Markers im Backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeMarkerId(pub u64);

/// Einmal-Ticket einer Style-Anfrage; das Backend reicht es bei `on_style_ready` zurück.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleToken(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-layer-{}", self.0)
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-feed-{}", self.0)
    }
}

/// Ein Layer zusammen mit dem Feed, der ihn speist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerBinding {
    /// Render-Layer
    pub layer: LayerId,
    /// Zugehöriger Geometry-Feed
    pub feed: FeedId,
}
