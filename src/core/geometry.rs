//! Geographische Koordinaten und Geometrie-Daten für Geometry-Feeds.

use serde::{Deserialize, Serialize};

/// Punkt im Screen-Space (Pixel, Ursprung oben links).
pub type ScreenPoint = glam::Vec2;

/// Geographische Koordinate in Grad.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    /// Breitengrad
    pub lat: f64,
    /// Längengrad
    pub lng: f64,
}

impl LatLng {
    /// Erstellt eine neue Koordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Koordinate als `DVec2` (x = Längengrad, y = Breitengrad).
    pub fn as_dvec2(self) -> glam::DVec2 {
        glam::DVec2::new(self.lng, self.lat)
    }

    /// Gegenstück zu [`LatLng::as_dvec2`].
    pub fn from_dvec2(v: glam::DVec2) -> Self {
        Self { lat: v.y, lng: v.x }
    }
}

/// Einzelner Kreis einer Kreisgruppe (Radius in Metern).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    /// Mittelpunkt
    pub center: LatLng,
    /// Radius in Metern
    pub radius_m: f64,
}

/// Vektordaten, die einen Render-Layer speisen.
///
/// Die Umrechnung in Pixel (Kreise in Metern, Projektion) übernimmt das Backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Geometry {
    /// Leerer Feed (Sentinel-Layer)
    #[default]
    Empty,
    /// Einzelner Punkt
    Point(LatLng),
    /// Offener Linienzug
    LineString(Vec<LatLng>),
    /// Polygon mit Außenring und optionalen Löchern
    Polygon {
        /// Außenring (implizit geschlossen)
        outer: Vec<LatLng>,
        /// Innenringe
        holes: Vec<Vec<LatLng>>,
    },
    /// Geographischer Kreis
    Circle(CircleShape),
    /// Aggregat vieler Kreise in einem Feed
    Circles(Vec<CircleShape>),
}

impl Geometry {
    /// Geschlossener Ring aus einer Punktliste (erster Punkt wird angehängt).
    pub fn closed_ring(points: &[LatLng]) -> Self {
        let mut ring = points.to_vec();
        if let (Some(first), Some(last)) = (points.first(), points.last())
            && first != last
        {
            ring.push(*first);
        }
        Self::LineString(ring)
    }
}
