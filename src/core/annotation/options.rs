//! Erstell-Optionen der Annotation-Arten und ihre Validierung.
//!
//! Nicht gesetzte Farben/Stärken werden beim Anlegen aus den
//! [`StyleDefaults`](super::StyleDefaults) der Engine-Optionen ergänzt.

use super::handles::AnnotationKind;
use crate::core::error::OverlayError;
use crate::core::geometry::{CircleShape, LatLng};
use crate::core::paint::Rgba;
use image::RgbaImage;

/// Optionen für `add_marker`.
#[derive(Debug, Clone)]
pub struct MarkerOptions {
    /// Position (Pflichtfeld)
    pub position: Option<LatLng>,
    /// Eigenes Icon; `None` = Standard-Icon des Backends
    pub icon: Option<RgbaImage>,
    /// Ankerpunkt relativ zur Icon-Größe; `None` = Standard
    pub anchor: Option<[f32; 2]>,
    /// Rotation in Grad
    pub rotation: f32,
    /// Deckkraft 0..1
    pub alpha: f32,
    /// Titel für das Info-Fenster
    pub title: Option<String>,
    /// Z-Index; `None` = Standard
    pub z_index: Option<i32>,
    /// Sichtbarkeit
    pub visible: bool,
    /// Per Long-Press verschiebbar
    pub draggable: bool,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            position: None,
            icon: None,
            anchor: None,
            rotation: 0.0,
            alpha: 1.0,
            title: None,
            z_index: None,
            visible: true,
            draggable: false,
        }
    }
}

impl MarkerOptions {
    /// Marker-Optionen an einer Position.
    pub fn at(position: LatLng) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Liefert die Position oder `InvalidOptions`.
    pub fn validated_position(&self) -> Result<LatLng, OverlayError> {
        self.position.ok_or(OverlayError::InvalidOptions {
            kind: AnnotationKind::Marker,
            reason: "Position fehlt",
        })
    }
}

/// Optionen für `add_polyline`.
#[derive(Debug, Clone)]
pub struct PolylineOptions {
    /// Stützpunkte (mindestens zwei)
    pub points: Vec<LatLng>,
    /// Linienfarbe
    pub color: Option<Rgba>,
    /// Linienstärke in Pixeln
    pub width: Option<f32>,
    /// Z-Index
    pub z_index: Option<i32>,
    /// Sichtbarkeit
    pub visible: bool,
}

impl Default for PolylineOptions {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            color: None,
            width: None,
            z_index: None,
            visible: true,
        }
    }
}

impl PolylineOptions {
    /// Linienzug aus Punkten.
    pub fn through(points: Vec<LatLng>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Prüft die Mindestanzahl an Punkten.
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.points.len() < 2 {
            return Err(OverlayError::InvalidOptions {
                kind: AnnotationKind::Polyline,
                reason: "mindestens zwei Punkte erforderlich",
            });
        }
        Ok(())
    }
}

/// Optionen für `add_polygon`.
#[derive(Debug, Clone)]
pub struct PolygonOptions {
    /// Außenring (mindestens drei Punkte)
    pub points: Vec<LatLng>,
    /// Innenringe
    pub holes: Vec<Vec<LatLng>>,
    /// Füllfarbe
    pub fill_color: Option<Rgba>,
    /// Umrissfarbe
    pub stroke_color: Option<Rgba>,
    /// Umrissstärke in Pixeln
    pub stroke_width: Option<f32>,
    /// Z-Index
    pub z_index: Option<i32>,
    /// Sichtbarkeit
    pub visible: bool,
}

impl Default for PolygonOptions {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            holes: Vec::new(),
            fill_color: None,
            stroke_color: None,
            stroke_width: None,
            z_index: None,
            visible: true,
        }
    }
}

impl PolygonOptions {
    /// Polygon aus einem Außenring.
    pub fn with_outline(points: Vec<LatLng>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Prüft die Mindestanzahl an Punkten.
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.points.len() < 3 {
            return Err(OverlayError::InvalidOptions {
                kind: AnnotationKind::Polygon,
                reason: "mindestens drei Punkte erforderlich",
            });
        }
        Ok(())
    }
}

/// Optionen für `add_single_circle`.
#[derive(Debug, Clone)]
pub struct CircleOptions {
    /// Mittelpunkt (Pflichtfeld)
    pub center: Option<LatLng>,
    /// Radius in Metern
    pub radius_m: f64,
    /// Füllfarbe
    pub fill_color: Option<Rgba>,
    /// Umrissfarbe
    pub stroke_color: Option<Rgba>,
    /// Umrissstärke in Pixeln
    pub stroke_width: Option<f32>,
    /// Z-Index
    pub z_index: Option<i32>,
    /// Sichtbarkeit
    pub visible: bool,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            center: None,
            radius_m: 0.0,
            fill_color: None,
            stroke_color: None,
            stroke_width: None,
            z_index: None,
            visible: true,
        }
    }
}

impl CircleOptions {
    /// Kreis um einen Mittelpunkt.
    pub fn around(center: LatLng, radius_m: f64) -> Self {
        Self {
            center: Some(center),
            radius_m,
            ..Self::default()
        }
    }

    /// Liefert den validierten Kreis.
    pub fn validated_shape(&self) -> Result<CircleShape, OverlayError> {
        let center = self.center.ok_or(OverlayError::InvalidOptions {
            kind: AnnotationKind::Circle,
            reason: "Mittelpunkt fehlt",
        })?;
        if !self.radius_m.is_finite() || self.radius_m < 0.0 {
            return Err(OverlayError::InvalidOptions {
                kind: AnnotationKind::Circle,
                reason: "Radius muss endlich und nicht negativ sein",
            });
        }
        Ok(CircleShape {
            center,
            radius_m: self.radius_m,
        })
    }
}

/// Optionen für `add_marker_circle`.
#[derive(Debug, Clone)]
pub struct MarkerCircleOptions {
    /// Mittelpunkt (Pflichtfeld)
    pub center: Option<LatLng>,
    /// Radius in Pixeln
    pub radius_px: f32,
    /// Kreisfarbe
    pub color: Option<Rgba>,
    /// Umrissfarbe
    pub stroke_color: Option<Rgba>,
    /// Umrissstärke in Pixeln
    pub stroke_width: Option<f32>,
    /// Z-Index
    pub z_index: Option<i32>,
    /// Sichtbarkeit
    pub visible: bool,
}

impl Default for MarkerCircleOptions {
    fn default() -> Self {
        Self {
            center: None,
            radius_px: 6.0,
            color: None,
            stroke_color: None,
            stroke_width: None,
            z_index: None,
            visible: true,
        }
    }
}

impl MarkerCircleOptions {
    /// Pixel-Kreis an einem Punkt.
    pub fn at(center: LatLng, radius_px: f32) -> Self {
        Self {
            center: Some(center),
            radius_px,
            ..Self::default()
        }
    }

    /// Liefert den validierten Mittelpunkt.
    pub fn validated_center(&self) -> Result<LatLng, OverlayError> {
        let center = self.center.ok_or(OverlayError::InvalidOptions {
            kind: AnnotationKind::MarkerCircle,
            reason: "Mittelpunkt fehlt",
        })?;
        if !self.radius_px.is_finite() || self.radius_px < 0.0 {
            return Err(OverlayError::InvalidOptions {
                kind: AnnotationKind::MarkerCircle,
                reason: "Radius muss endlich und nicht negativ sein",
            });
        }
        Ok(center)
    }
}

/// Optionen für `add_group_circle`.
#[derive(Debug, Clone)]
pub struct GroupCircleOptions {
    /// Mittelpunkte
    pub centers: Vec<LatLng>,
    /// Radien in Metern (gleiche Länge wie `centers`)
    pub radii: Vec<f64>,
    /// Füllfarbe aller Kreise
    pub fill_color: Option<Rgba>,
    /// Umrissfarbe aller Kreise
    pub stroke_color: Option<Rgba>,
    /// Z-Index
    pub z_index: Option<i32>,
    /// Sichtbarkeit
    pub visible: bool,
}

impl Default for GroupCircleOptions {
    fn default() -> Self {
        Self {
            centers: Vec::new(),
            radii: Vec::new(),
            fill_color: None,
            stroke_color: None,
            z_index: None,
            visible: true,
        }
    }
}

impl GroupCircleOptions {
    /// Kreisgruppe aus parallelen Listen.
    pub fn new(centers: Vec<LatLng>, radii: Vec<f64>) -> Self {
        Self {
            centers,
            radii,
            ..Self::default()
        }
    }
}

/// Zippt Mittelpunkte und Radien.
///
/// `None` bei ungleicher Länge, leerer Eingabe oder einem Radius, der nicht
/// endlich und nicht negativ ist.
pub fn zip_circles(centers: &[LatLng], radii: &[f64]) -> Option<Vec<CircleShape>> {
    if centers.is_empty() || centers.len() != radii.len() {
        return None;
    }
    if radii.iter().any(|radius| !radius.is_finite() || *radius < 0.0) {
        return None;
    }
    Some(
        centers
            .iter()
            .zip(radii)
            .map(|(center, radius_m)| CircleShape {
                center: *center,
                radius_m: *radius_m,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_without_position_is_invalid() {
        let err = MarkerOptions::default()
            .validated_position()
            .expect_err("Fehler erwartet");
        assert!(matches!(
            err,
            OverlayError::InvalidOptions {
                kind: AnnotationKind::Marker,
                ..
            }
        ));
    }

    #[test]
    fn polyline_needs_two_points() {
        assert!(PolylineOptions::through(vec![LatLng::default()])
            .validate()
            .is_err());
        assert!(PolylineOptions::through(vec![LatLng::default(), LatLng::new(1.0, 1.0)])
            .validate()
            .is_ok());
    }

    #[test]
    fn circle_rejects_negative_radius() {
        assert!(CircleOptions::around(LatLng::default(), -1.0)
            .validated_shape()
            .is_err());
        assert!(CircleOptions::around(LatLng::default(), 0.0)
            .validated_shape()
            .is_ok());
    }

    #[test]
    fn zip_circles_requires_matching_non_empty_lists() {
        let centers = vec![LatLng::default(); 3];
        assert!(zip_circles(&centers, &[1.0, 2.0]).is_none());
        assert!(zip_circles(&[], &[]).is_none());
        let circles = zip_circles(&centers, &[1.0, 2.0, 3.0]).expect("Kreise erwartet");
        assert_eq!(circles.len(), 3);
        assert_eq!(circles[2].radius_m, 3.0);
    }

    #[test]
    fn zip_circles_rejects_negative_and_nan_radii() {
        let centers = vec![LatLng::default(); 2];
        assert!(zip_circles(&centers, &[1.0, -2.0]).is_none());
        assert!(zip_circles(&centers, &[f64::NAN, 2.0]).is_none());
        assert!(zip_circles(&centers, &[0.0, f64::INFINITY]).is_none());
        assert!(zip_circles(&centers, &[0.0, 2.0]).is_some());
    }
}
