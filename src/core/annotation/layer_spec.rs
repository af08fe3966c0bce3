//! Übersetzung einer Annotation in Backend-Layer (Art, Geometrie, Paint).

use super::{Annotation, AnnotationBody};
use crate::core::geometry::Geometry;
use crate::core::paint::{LayerKind, PaintKey, PaintProps, PaintValue};

/// Icon-Name für Marker ohne eigenes Bild.
pub const DEFAULT_MARKER_ICON: &str = "overlay-marker-default";

/// Beschreibung eines einzelnen Backend-Layers einer Annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// Layer-Art
    pub kind: LayerKind,
    /// Daten des speisenden Feeds
    pub geometry: Geometry,
    /// Vollständige Paint-Konfiguration
    pub paint: PaintProps,
}

impl LayerSpec {
    fn new(kind: LayerKind, geometry: Geometry, paint: PaintProps) -> Self {
        Self {
            kind,
            geometry,
            paint,
        }
    }
}

impl Annotation {
    /// Layer der Annotation von unten nach oben.
    ///
    /// Polygone und Einzelkreise bestehen aus Fläche und darüberliegendem Umriss;
    /// alle anderen Arten aus genau einem Layer.
    pub fn layer_specs(&self) -> Vec<LayerSpec> {
        let visible = PaintValue::Visible(self.visible);
        match &self.body {
            AnnotationBody::Marker(marker) => {
                let icon = marker
                    .icon
                    .map_or_else(|| DEFAULT_MARKER_ICON.to_string(), |key| key.to_string());
                let paint = PaintProps::new()
                    .with(PaintKey::IconImage, PaintValue::Text(icon))
                    .with(PaintKey::IconRotate, PaintValue::Number(marker.rotation))
                    .with(PaintKey::IconAnchor, PaintValue::Offset(marker.anchor))
                    .with(PaintKey::IconOpacity, PaintValue::Number(marker.alpha))
                    .with(PaintKey::Visibility, visible);
                vec![LayerSpec::new(
                    LayerKind::Symbol,
                    Geometry::Point(marker.position),
                    paint,
                )]
            }
            AnnotationBody::Polyline(line) => {
                let paint = PaintProps::new()
                    .with(PaintKey::LineColor, PaintValue::Color(line.color))
                    .with(PaintKey::LineWidth, PaintValue::Number(line.width))
                    .with(PaintKey::Visibility, visible);
                vec![LayerSpec::new(
                    LayerKind::Line,
                    Geometry::LineString(line.points.clone()),
                    paint,
                )]
            }
            AnnotationBody::Polygon(polygon) => {
                let fill = PaintProps::new()
                    .with(PaintKey::FillColor, PaintValue::Color(polygon.fill_color))
                    .with(PaintKey::Visibility, visible.clone());
                let outline = PaintProps::new()
                    .with(PaintKey::LineColor, PaintValue::Color(polygon.stroke_color))
                    .with(PaintKey::LineWidth, PaintValue::Number(polygon.stroke_width))
                    .with(PaintKey::Visibility, visible);
                vec![
                    LayerSpec::new(
                        LayerKind::Fill,
                        Geometry::Polygon {
                            outer: polygon.points.clone(),
                            holes: polygon.holes.clone(),
                        },
                        fill,
                    ),
                    LayerSpec::new(
                        LayerKind::Line,
                        Geometry::closed_ring(&polygon.points),
                        outline,
                    ),
                ]
            }
            AnnotationBody::Circle(circle) => {
                let fill = PaintProps::new()
                    .with(PaintKey::FillColor, PaintValue::Color(circle.fill_color))
                    .with(PaintKey::Visibility, visible.clone());
                let outline = PaintProps::new()
                    .with(PaintKey::LineColor, PaintValue::Color(circle.stroke_color))
                    .with(PaintKey::LineWidth, PaintValue::Number(circle.stroke_width))
                    .with(PaintKey::Visibility, visible);
                vec![
                    LayerSpec::new(LayerKind::Fill, Geometry::Circle(circle.shape), fill),
                    LayerSpec::new(LayerKind::Line, Geometry::Circle(circle.shape), outline),
                ]
            }
            AnnotationBody::MarkerCircle(circle) => {
                let paint = PaintProps::new()
                    .with(PaintKey::CircleRadius, PaintValue::Number(circle.radius_px))
                    .with(PaintKey::CircleColor, PaintValue::Color(circle.color))
                    .with(
                        PaintKey::CircleStrokeColor,
                        PaintValue::Color(circle.stroke_color),
                    )
                    .with(
                        PaintKey::CircleStrokeWidth,
                        PaintValue::Number(circle.stroke_width),
                    )
                    .with(PaintKey::Visibility, visible);
                vec![LayerSpec::new(
                    LayerKind::Circle,
                    Geometry::Point(circle.center),
                    paint,
                )]
            }
            AnnotationBody::GroupCircle(group) => {
                let paint = PaintProps::new()
                    .with(PaintKey::FillColor, PaintValue::Color(group.fill_color))
                    .with(
                        PaintKey::FillOutlineColor,
                        PaintValue::Color(group.stroke_color),
                    )
                    .with(PaintKey::Visibility, visible);
                vec![LayerSpec::new(
                    LayerKind::Fill,
                    Geometry::Circles(group.circles.clone()),
                    paint,
                )]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{AnnotationId, CircleState, MarkerState};
    use super::*;
    use crate::core::geometry::{CircleShape, LatLng};
    use crate::core::icon_cache::IconKey;

    fn marker(icon: Option<IconKey>) -> Annotation {
        Annotation::new(
            AnnotationId(1),
            0,
            true,
            AnnotationBody::Marker(MarkerState {
                position: LatLng::new(1.0, 2.0),
                icon,
                anchor: [0.5, 1.0],
                rotation: 0.0,
                alpha: 1.0,
                title: None,
                draggable: false,
            }),
        )
    }

    #[test]
    fn marker_without_icon_uses_default_image() {
        let specs = marker(None).layer_specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].kind, LayerKind::Symbol);
        assert_eq!(
            specs[0].paint.get(PaintKey::IconImage),
            Some(&PaintValue::Text(DEFAULT_MARKER_ICON.to_string()))
        );
    }

    #[test]
    fn marker_with_icon_references_icon_key() {
        let specs = marker(Some(IconKey(0xab))).layer_specs();
        assert_eq!(
            specs[0].paint.get(PaintKey::IconImage),
            Some(&PaintValue::Text("overlay-icon-00000000000000ab".to_string()))
        );
    }

    #[test]
    fn circle_has_fill_below_outline() {
        let mut circle = Annotation::new(
            AnnotationId(2),
            3,
            true,
            AnnotationBody::Circle(CircleState {
                shape: CircleShape {
                    center: LatLng::default(),
                    radius_m: 50.0,
                },
                fill_color: [0.0, 0.0, 1.0, 0.3],
                stroke_color: [0.0, 0.0, 1.0, 1.0],
                stroke_width: 2.0,
            }),
        );
        circle.visible = false;

        let specs = circle.layer_specs();
        let kinds: Vec<_> = specs.iter().map(|spec| spec.kind).collect();
        assert_eq!(kinds, vec![LayerKind::Fill, LayerKind::Line]);
        assert!(specs.iter().all(|spec| {
            spec.paint.get(PaintKey::Visibility) == Some(&PaintValue::Visible(false))
        }));
        assert!(specs[0].paint.get(PaintKey::LineColor).is_none());
    }
}
