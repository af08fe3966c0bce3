//! Annotation-Datenmodell: Marker, Linien, Polygone und Kreise.
//!
//! Eine `Annotation` hält die zuletzt gesetzten Eigenschaften und überlebt
//! Style-Reloads. Die Backend-Layer (`bindings`) sind während eines Reloads leer
//! und werden beim Replay aus diesen Eigenschaften neu aufgebaut.

mod handles;
mod layer_spec;
mod options;

pub use handles::{
    AnnotationHandle, AnnotationId, AnnotationKind, Centered, CircleHandle, Colored,
    GroupCircleHandle, MarkerCircleHandle, MarkerHandle, PolygonHandle, PolylineHandle, Pointed,
    Stroked, Widthed,
};
pub use layer_spec::{DEFAULT_MARKER_ICON, LayerSpec};
pub use options::{
    CircleOptions, GroupCircleOptions, MarkerCircleOptions, MarkerOptions, PolygonOptions,
    PolylineOptions, zip_circles,
};

use super::geometry::{CircleShape, LatLng};
use super::icon_cache::IconKey;
use super::ids::LayerBinding;
use super::paint::{PaintKey, Rgba};

/// Standardwerte für nicht gesetzte Stil-Felder.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    /// Standard-Z-Index
    pub z_index: i32,
    /// Linienfarbe
    pub line_color: Rgba,
    /// Füllfarbe
    pub fill_color: Rgba,
    /// Umrissfarbe
    pub stroke_color: Rgba,
    /// Linien-/Umrissstärke in Pixeln
    pub stroke_width: f32,
    /// Marker-Ankerpunkt
    pub marker_anchor: [f32; 2],
}

/// Zustand eines Markers
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    /// Position
    pub position: LatLng,
    /// Eigenes Icon (`None` = Standard-Icon)
    pub icon: Option<IconKey>,
    /// Ankerpunkt relativ zur Icon-Größe
    pub anchor: [f32; 2],
    /// Rotation in Grad
    pub rotation: f32,
    /// Deckkraft
    pub alpha: f32,
    /// Titel für das Info-Fenster
    pub title: Option<String>,
    /// Per Long-Press verschiebbar
    pub draggable: bool,
}

/// Zustand eines Linienzugs
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineState {
    /// Stützpunkte
    pub points: Vec<LatLng>,
    /// Linienfarbe
    pub color: Rgba,
    /// Linienstärke
    pub width: f32,
}

/// Zustand eines Polygons
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonState {
    /// Außenring
    pub points: Vec<LatLng>,
    /// Innenringe
    pub holes: Vec<Vec<LatLng>>,
    /// Füllfarbe
    pub fill_color: Rgba,
    /// Umrissfarbe
    pub stroke_color: Rgba,
    /// Umrissstärke
    pub stroke_width: f32,
}

/// Zustand eines geographischen Einzelkreises
#[derive(Debug, Clone, PartialEq)]
pub struct CircleState {
    /// Kreis (Mittelpunkt + Radius in Metern)
    pub shape: CircleShape,
    /// Füllfarbe
    pub fill_color: Rgba,
    /// Umrissfarbe
    pub stroke_color: Rgba,
    /// Umrissstärke
    pub stroke_width: f32,
}

/// Zustand eines Pixel-Kreises
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCircleState {
    /// Mittelpunkt
    pub center: LatLng,
    /// Radius in Pixeln
    pub radius_px: f32,
    /// Kreisfarbe
    pub color: Rgba,
    /// Umrissfarbe
    pub stroke_color: Rgba,
    /// Umrissstärke
    pub stroke_width: f32,
}

/// Zustand einer Kreisgruppe
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCircleState {
    /// Alle Kreise des Aggregat-Feeds
    pub circles: Vec<CircleShape>,
    /// Füllfarbe
    pub fill_color: Rgba,
    /// Umrissfarbe
    pub stroke_color: Rgba,
}

/// Art-spezifischer Teil einer Annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationBody {
    /// Marker
    Marker(MarkerState),
    /// Linienzug
    Polyline(PolylineState),
    /// Polygon
    Polygon(PolygonState),
    /// Geographischer Einzelkreis
    Circle(CircleState),
    /// Pixel-Kreis
    MarkerCircle(MarkerCircleState),
    /// Kreisgruppe
    GroupCircle(GroupCircleState),
}

/// Welche Backend-Daten nach einer Eigenschaftsänderung nachgezogen werden müssen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
    /// Geometrie aller Feeds der Annotation neu schreiben
    Geometry,
    /// Nur die genannten Paint-Properties neu setzen
    Paint(&'static [PaintKey]),
}

/// Lebende Annotation mit Eigenschaften und (optionalen) Backend-Layern.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Stabile Identität
    pub id: AnnotationId,
    /// Z-Index
    pub z_index: i32,
    /// Sichtbarkeit
    pub visible: bool,
    /// Fortlaufende Stapel-Sequenz der letzten Platzierung (Gleichstand bei gleichem Z)
    pub stack_seq: u64,
    /// Art-spezifische Eigenschaften
    pub body: AnnotationBody,
    /// Backend-Layer von unten nach oben; leer während eines Reloads
    pub bindings: Vec<LayerBinding>,
}

impl Annotation {
    /// Erstellt eine noch nicht materialisierte Annotation.
    pub fn new(id: AnnotationId, z_index: i32, visible: bool, body: AnnotationBody) -> Self {
        Self {
            id,
            z_index,
            visible,
            stack_seq: 0,
            body,
            bindings: Vec::new(),
        }
    }

    /// Art der Annotation.
    pub fn kind(&self) -> AnnotationKind {
        match self.body {
            AnnotationBody::Marker(_) => AnnotationKind::Marker,
            AnnotationBody::Polyline(_) => AnnotationKind::Polyline,
            AnnotationBody::Polygon(_) => AnnotationKind::Polygon,
            AnnotationBody::Circle(_) => AnnotationKind::Circle,
            AnnotationBody::MarkerCircle(_) => AnnotationKind::MarkerCircle,
            AnnotationBody::GroupCircle(_) => AnnotationKind::GroupCircle,
        }
    }

    /// Prüft, ob Backend-Layer existieren.
    pub fn is_materialized(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Marker-Zustand (falls Marker).
    pub fn as_marker(&self) -> Option<&MarkerState> {
        match &self.body {
            AnnotationBody::Marker(marker) => Some(marker),
            _ => None,
        }
    }

    /// Veränderbarer Marker-Zustand (falls Marker).
    pub fn as_marker_mut(&mut self) -> Option<&mut MarkerState> {
        match &mut self.body {
            AnnotationBody::Marker(marker) => Some(marker),
            _ => None,
        }
    }

    /// Setzt die Sichtbarkeit (alle Arten).
    pub fn set_visible(&mut self, visible: bool) -> Patch {
        self.visible = visible;
        Patch::Paint(&[PaintKey::Visibility])
    }

    /// Setzt die Hauptfarbe; `None` für Marker.
    pub fn set_color(&mut self, color: Rgba) -> Option<Patch> {
        let key: &'static [PaintKey] = match &mut self.body {
            AnnotationBody::Polyline(line) => {
                line.color = color;
                &[PaintKey::LineColor]
            }
            AnnotationBody::Polygon(polygon) => {
                polygon.fill_color = color;
                &[PaintKey::FillColor]
            }
            AnnotationBody::Circle(circle) => {
                circle.fill_color = color;
                &[PaintKey::FillColor]
            }
            AnnotationBody::MarkerCircle(circle) => {
                circle.color = color;
                &[PaintKey::CircleColor]
            }
            AnnotationBody::GroupCircle(group) => {
                group.fill_color = color;
                &[PaintKey::FillColor]
            }
            AnnotationBody::Marker(_) => return None,
        };
        Some(Patch::Paint(key))
    }

    /// Hauptfarbe (Linie bzw. Füllung).
    pub fn color(&self) -> Option<Rgba> {
        match &self.body {
            AnnotationBody::Polyline(line) => Some(line.color),
            AnnotationBody::Polygon(polygon) => Some(polygon.fill_color),
            AnnotationBody::Circle(circle) => Some(circle.fill_color),
            AnnotationBody::MarkerCircle(circle) => Some(circle.color),
            AnnotationBody::GroupCircle(group) => Some(group.fill_color),
            AnnotationBody::Marker(_) => None,
        }
    }

    /// Setzt die Umrissfarbe.
    pub fn set_stroke_color(&mut self, color: Rgba) -> Option<Patch> {
        let key: &'static [PaintKey] = match &mut self.body {
            AnnotationBody::Polygon(polygon) => {
                polygon.stroke_color = color;
                &[PaintKey::LineColor]
            }
            AnnotationBody::Circle(circle) => {
                circle.stroke_color = color;
                &[PaintKey::LineColor]
            }
            AnnotationBody::MarkerCircle(circle) => {
                circle.stroke_color = color;
                &[PaintKey::CircleStrokeColor]
            }
            AnnotationBody::GroupCircle(group) => {
                group.stroke_color = color;
                &[PaintKey::FillOutlineColor]
            }
            AnnotationBody::Marker(_) | AnnotationBody::Polyline(_) => return None,
        };
        Some(Patch::Paint(key))
    }

    /// Umrissfarbe.
    pub fn stroke_color(&self) -> Option<Rgba> {
        match &self.body {
            AnnotationBody::Polygon(polygon) => Some(polygon.stroke_color),
            AnnotationBody::Circle(circle) => Some(circle.stroke_color),
            AnnotationBody::MarkerCircle(circle) => Some(circle.stroke_color),
            AnnotationBody::GroupCircle(group) => Some(group.stroke_color),
            AnnotationBody::Marker(_) | AnnotationBody::Polyline(_) => None,
        }
    }

    /// Setzt Linien- bzw. Umrissstärke.
    pub fn set_width(&mut self, width: f32) -> Option<Patch> {
        let key: &'static [PaintKey] = match &mut self.body {
            AnnotationBody::Polyline(line) => {
                line.width = width;
                &[PaintKey::LineWidth]
            }
            AnnotationBody::Polygon(polygon) => {
                polygon.stroke_width = width;
                &[PaintKey::LineWidth]
            }
            AnnotationBody::Circle(circle) => {
                circle.stroke_width = width;
                &[PaintKey::LineWidth]
            }
            AnnotationBody::MarkerCircle(circle) => {
                circle.stroke_width = width;
                &[PaintKey::CircleStrokeWidth]
            }
            AnnotationBody::Marker(_) | AnnotationBody::GroupCircle(_) => return None,
        };
        Some(Patch::Paint(key))
    }

    /// Linien- bzw. Umrissstärke.
    pub fn width(&self) -> Option<f32> {
        match &self.body {
            AnnotationBody::Polyline(line) => Some(line.width),
            AnnotationBody::Polygon(polygon) => Some(polygon.stroke_width),
            AnnotationBody::Circle(circle) => Some(circle.stroke_width),
            AnnotationBody::MarkerCircle(circle) => Some(circle.stroke_width),
            AnnotationBody::Marker(_) | AnnotationBody::GroupCircle(_) => None,
        }
    }

    /// Ersetzt die Punktliste (Linienzug bzw. Außenring).
    pub fn set_points(&mut self, points: Vec<LatLng>) -> Option<Patch> {
        match &mut self.body {
            AnnotationBody::Polyline(line) => line.points = points,
            AnnotationBody::Polygon(polygon) => polygon.points = points,
            _ => return None,
        }
        Some(Patch::Geometry)
    }

    /// Punktliste (Linienzug bzw. Außenring).
    pub fn points(&self) -> Option<&[LatLng]> {
        match &self.body {
            AnnotationBody::Polyline(line) => Some(&line.points),
            AnnotationBody::Polygon(polygon) => Some(&polygon.points),
            _ => None,
        }
    }

    /// Ersetzt die Innenringe eines Polygons.
    pub fn set_holes(&mut self, holes: Vec<Vec<LatLng>>) -> Option<Patch> {
        match &mut self.body {
            AnnotationBody::Polygon(polygon) => {
                polygon.holes = holes;
                Some(Patch::Geometry)
            }
            _ => None,
        }
    }

    /// Setzt den Mittelpunkt eines Kreises.
    pub fn set_center(&mut self, center: LatLng) -> Option<Patch> {
        match &mut self.body {
            AnnotationBody::Circle(circle) => circle.shape.center = center,
            AnnotationBody::MarkerCircle(circle) => circle.center = center,
            _ => return None,
        }
        Some(Patch::Geometry)
    }

    /// Mittelpunkt eines Kreises.
    pub fn center(&self) -> Option<LatLng> {
        match &self.body {
            AnnotationBody::Circle(circle) => Some(circle.shape.center),
            AnnotationBody::MarkerCircle(circle) => Some(circle.center),
            _ => None,
        }
    }

    /// Setzt den Radius (Meter für Einzelkreise, Pixel für Pixel-Kreise).
    pub fn set_radius(&mut self, radius: f64) -> Option<Patch> {
        match &mut self.body {
            AnnotationBody::Circle(circle) => {
                circle.shape.radius_m = radius;
                Some(Patch::Geometry)
            }
            AnnotationBody::MarkerCircle(circle) => {
                circle.radius_px = radius as f32;
                Some(Patch::Paint(&[PaintKey::CircleRadius]))
            }
            _ => None,
        }
    }

    /// Radius (Meter für Einzelkreise, Pixel für Pixel-Kreise).
    pub fn radius(&self) -> Option<f64> {
        match &self.body {
            AnnotationBody::Circle(circle) => Some(circle.shape.radius_m),
            AnnotationBody::MarkerCircle(circle) => Some(circle.radius_px as f64),
            _ => None,
        }
    }

    /// Ersetzt alle Kreise einer Kreisgruppe.
    pub fn set_circles(&mut self, circles: Vec<CircleShape>) -> Option<Patch> {
        match &mut self.body {
            AnnotationBody::GroupCircle(group) => {
                group.circles = circles;
                Some(Patch::Geometry)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon() -> Annotation {
        Annotation::new(
            AnnotationId(1),
            0,
            true,
            AnnotationBody::Polygon(PolygonState {
                points: vec![LatLng::default(); 3],
                holes: Vec::new(),
                fill_color: [1.0, 0.0, 0.0, 0.5],
                stroke_color: [0.0, 0.0, 0.0, 1.0],
                stroke_width: 2.0,
            }),
        )
    }

    #[test]
    fn polygon_color_targets_fill_layer() {
        let mut annotation = polygon();
        let patch = annotation.set_color([0.0, 1.0, 0.0, 1.0]);
        assert_eq!(patch, Some(Patch::Paint(&[PaintKey::FillColor])));
        assert_eq!(annotation.color(), Some([0.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn polygon_points_change_geometry() {
        let mut annotation = polygon();
        let patch = annotation.set_points(vec![LatLng::new(1.0, 1.0); 4]);
        assert_eq!(patch, Some(Patch::Geometry));
        assert_eq!(annotation.points().map(<[LatLng]>::len), Some(4));
    }

    #[test]
    fn inapplicable_setters_leave_state_untouched() {
        let mut annotation = polygon();
        let before = annotation.body.clone();
        assert_eq!(annotation.set_center(LatLng::new(5.0, 5.0)), None);
        assert_eq!(annotation.set_circles(Vec::new()), None);
        assert_eq!(annotation.body, before);
    }

    #[test]
    fn marker_circle_radius_is_paint_only() {
        let mut annotation = Annotation::new(
            AnnotationId(2),
            0,
            true,
            AnnotationBody::MarkerCircle(MarkerCircleState {
                center: LatLng::default(),
                radius_px: 4.0,
                color: [1.0; 4],
                stroke_color: [0.0, 0.0, 0.0, 1.0],
                stroke_width: 1.0,
            }),
        );
        assert_eq!(
            annotation.set_radius(9.0),
            Some(Patch::Paint(&[PaintKey::CircleRadius]))
        );
        assert_eq!(annotation.radius(), Some(9.0));
        assert_eq!(annotation.kind(), AnnotationKind::MarkerCircle);
    }
}
