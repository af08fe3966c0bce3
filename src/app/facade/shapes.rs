//! Linienzüge, Polygone und die art-übergreifenden Stil-Setter.

use super::MapFacade;
use crate::backend::MapBackend;
use crate::core::{
    Annotation, AnnotationBody, AnnotationKind, Colored, LatLng, OverlayError, Pointed,
    PolygonHandle, PolygonOptions, PolygonState, PolylineHandle, PolylineOptions, PolylineState,
    Rgba, Stroked, Widthed,
};

impl<B: MapBackend> MapFacade<B> {
    /// Legt einen Linienzug an (mindestens zwei Punkte).
    pub fn add_polyline(
        &mut self,
        options: PolylineOptions,
    ) -> Result<PolylineHandle, OverlayError> {
        options.validate()?;
        let defaults = self.options.style_defaults();
        let id = self.registry.allocate_id();
        let annotation = Annotation::new(
            id,
            options.z_index.unwrap_or(defaults.z_index),
            options.visible,
            AnnotationBody::Polyline(PolylineState {
                points: options.points,
                color: options.color.unwrap_or(defaults.line_color),
                width: options.width.unwrap_or(defaults.stroke_width),
            }),
        );
        self.insert(annotation).map(PolylineHandle)
    }

    /// Legt ein Polygon an (mindestens drei Punkte im Außenring).
    pub fn add_polygon(&mut self, options: PolygonOptions) -> Result<PolygonHandle, OverlayError> {
        options.validate()?;
        let defaults = self.options.style_defaults();
        let id = self.registry.allocate_id();
        let annotation = Annotation::new(
            id,
            options.z_index.unwrap_or(defaults.z_index),
            options.visible,
            AnnotationBody::Polygon(PolygonState {
                points: options.points,
                holes: options.holes,
                fill_color: options.fill_color.unwrap_or(defaults.fill_color),
                stroke_color: options.stroke_color.unwrap_or(defaults.stroke_color),
                stroke_width: options.stroke_width.unwrap_or(defaults.stroke_width),
            }),
        );
        self.insert(annotation).map(PolygonHandle)
    }

    /// Setzt die Hauptfarbe (Linie bzw. Füllung).
    pub fn set_color<H: Colored>(&mut self, handle: H, color: Rgba) {
        self.update(handle.id(), H::KIND, |annotation| {
            annotation.set_color(color)
        });
    }

    /// Hauptfarbe (Linie bzw. Füllung).
    pub fn color<H: Colored>(&self, handle: H) -> Option<Rgba> {
        self.annotation(handle)?.color()
    }

    /// Setzt die Umrissfarbe.
    pub fn set_stroke_color<H: Stroked>(&mut self, handle: H, color: Rgba) {
        self.update(handle.id(), H::KIND, |annotation| {
            annotation.set_stroke_color(color)
        });
    }

    /// Umrissfarbe.
    pub fn stroke_color<H: Stroked>(&self, handle: H) -> Option<Rgba> {
        self.annotation(handle)?.stroke_color()
    }

    /// Setzt Linien- bzw. Umrissstärke in Pixeln.
    pub fn set_width<H: Widthed>(&mut self, handle: H, width: f32) {
        self.update(handle.id(), H::KIND, |annotation| annotation.set_width(width));
    }

    /// Linien- bzw. Umrissstärke in Pixeln.
    pub fn width<H: Widthed>(&self, handle: H) -> Option<f32> {
        self.annotation(handle)?.width()
    }

    /// Ersetzt die Punktliste.
    ///
    /// Zu kurze Listen (Linienzug < 2, Polygon < 3) werden protokolliert und verworfen.
    pub fn set_points<H: Pointed>(&mut self, handle: H, points: Vec<LatLng>) {
        let minimum = match H::KIND {
            AnnotationKind::Polygon => 3,
            _ => 2,
        };
        if points.len() < minimum {
            log::warn!(
                "set_points für {:?} mit {} Punkten verworfen (mindestens {})",
                H::KIND,
                points.len(),
                minimum
            );
            return;
        }
        self.update(handle.id(), H::KIND, |annotation| {
            annotation.set_points(points)
        });
    }

    /// Punktliste (Linienzug bzw. Außenring).
    pub fn points<H: Pointed>(&self, handle: H) -> Option<&[LatLng]> {
        self.annotation(handle)?.points()
    }

    /// Ersetzt die Innenringe eines Polygons.
    pub fn set_polygon_holes(&mut self, handle: PolygonHandle, holes: Vec<Vec<LatLng>>) {
        self.update(handle.0, AnnotationKind::Polygon, |annotation| {
            annotation.set_holes(holes)
        });
    }

    /// Innenringe eines Polygons.
    pub fn polygon_holes(&self, handle: PolygonHandle) -> Option<&[Vec<LatLng>]> {
        match &self.annotation(handle)?.body {
            AnnotationBody::Polygon(polygon) => Some(&polygon.holes),
            _ => None,
        }
    }
}
