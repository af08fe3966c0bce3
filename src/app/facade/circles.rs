//! Einzelkreise, Pixel-Kreise und Kreisgruppen.

use super::MapFacade;
use crate::backend::MapBackend;
use crate::core::{
    Annotation, AnnotationBody, AnnotationKind, Centered, CircleHandle, CircleOptions,
    CircleShape, CircleState, GroupCircleHandle, GroupCircleOptions, GroupCircleState, LatLng,
    MarkerCircleHandle, MarkerCircleOptions, MarkerCircleState, OverlayError, zip_circles,
};

impl<B: MapBackend> MapFacade<B> {
    /// Legt einen geographischen Kreis an (Radius in Metern).
    pub fn add_single_circle(
        &mut self,
        options: CircleOptions,
    ) -> Result<CircleHandle, OverlayError> {
        let shape = options.validated_shape()?;
        let defaults = self.options.style_defaults();
        let id = self.registry.allocate_id();
        let annotation = Annotation::new(
            id,
            options.z_index.unwrap_or(defaults.z_index),
            options.visible,
            AnnotationBody::Circle(CircleState {
                shape,
                fill_color: options.fill_color.unwrap_or(defaults.fill_color),
                stroke_color: options.stroke_color.unwrap_or(defaults.stroke_color),
                stroke_width: options.stroke_width.unwrap_or(defaults.stroke_width),
            }),
        );
        self.insert(annotation).map(CircleHandle)
    }

    /// Legt einen Pixel-Kreis an einem Punkt an.
    pub fn add_marker_circle(
        &mut self,
        options: MarkerCircleOptions,
    ) -> Result<MarkerCircleHandle, OverlayError> {
        let center = options.validated_center()?;
        let defaults = self.options.style_defaults();
        let id = self.registry.allocate_id();
        let annotation = Annotation::new(
            id,
            options.z_index.unwrap_or(defaults.z_index),
            options.visible,
            AnnotationBody::MarkerCircle(MarkerCircleState {
                center,
                radius_px: options.radius_px,
                color: options.color.unwrap_or(defaults.line_color),
                stroke_color: options.stroke_color.unwrap_or(defaults.stroke_color),
                stroke_width: options.stroke_width.unwrap_or(defaults.stroke_width),
            }),
        );
        self.insert(annotation).map(MarkerCircleHandle)
    }

    /// Legt eine Kreisgruppe in einem gemeinsamen Feed an.
    ///
    /// Bei ungleich langen oder leeren Listen oder ungültigen Radien entsteht
    /// nichts (`Ok(None)`).
    pub fn add_group_circle(
        &mut self,
        options: GroupCircleOptions,
    ) -> Result<Option<GroupCircleHandle>, OverlayError> {
        let Some(circles) = zip_circles(&options.centers, &options.radii) else {
            log::warn!(
                "Kreisgruppe nicht angelegt: {} Mittelpunkte, {} Radien (Längen oder Radien ungültig)",
                options.centers.len(),
                options.radii.len()
            );
            return Ok(None);
        };
        let defaults = self.options.style_defaults();
        let id = self.registry.allocate_id();
        let annotation = Annotation::new(
            id,
            options.z_index.unwrap_or(defaults.z_index),
            options.visible,
            AnnotationBody::GroupCircle(GroupCircleState {
                circles,
                fill_color: options.fill_color.unwrap_or(defaults.fill_color),
                stroke_color: options.stroke_color.unwrap_or(defaults.stroke_color),
            }),
        );
        self.insert(annotation).map(|id| Some(GroupCircleHandle(id)))
    }

    /// Verschiebt den Mittelpunkt.
    pub fn set_center<H: Centered>(&mut self, handle: H, center: LatLng) {
        self.update(handle.id(), H::KIND, |annotation| {
            annotation.set_center(center)
        });
    }

    /// Mittelpunkt.
    pub fn center<H: Centered>(&self, handle: H) -> Option<LatLng> {
        self.annotation(handle)?.center()
    }

    /// Setzt den Radius (Meter bzw. Pixel); negative oder ungültige Werte werden verworfen.
    pub fn set_radius<H: Centered>(&mut self, handle: H, radius: f64) {
        if !radius.is_finite() || radius < 0.0 {
            log::warn!("Ungültiger Radius {} für {:?} verworfen", radius, H::KIND);
            return;
        }
        self.update(handle.id(), H::KIND, |annotation| {
            annotation.set_radius(radius)
        });
    }

    /// Radius (Meter bzw. Pixel).
    pub fn radius<H: Centered>(&self, handle: H) -> Option<f64> {
        self.annotation(handle)?.radius()
    }

    /// Ersetzt alle Kreise einer Gruppe in einem Aufruf.
    ///
    /// Bei ungleich langen oder leeren Listen oder ungültigen Radien bleibt die
    /// Gruppe unverändert.
    pub fn set_circles(&mut self, handle: GroupCircleHandle, centers: &[LatLng], radii: &[f64]) {
        let Some(circles) = zip_circles(centers, radii) else {
            log::warn!(
                "set_circles verworfen: {} Mittelpunkte, {} Radien (Längen oder Radien ungültig)",
                centers.len(),
                radii.len()
            );
            return;
        };
        self.update(handle.0, AnnotationKind::GroupCircle, |annotation| {
            annotation.set_circles(circles)
        });
    }

    /// Alle Kreise einer Gruppe.
    pub fn circles(&self, handle: GroupCircleHandle) -> Option<&[CircleShape]> {
        match &self.annotation(handle)?.body {
            AnnotationBody::GroupCircle(group) => Some(&group.circles),
            _ => None,
        }
    }
}
