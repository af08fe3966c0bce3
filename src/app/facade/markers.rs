//! Marker: Anlegen, Eigenschaften, Icons und Info-Fenster.

use super::MapFacade;
use crate::app::materialize;
use crate::backend::MapBackend;
use crate::core::{
    Annotation, AnnotationBody, AnnotationKind, LatLng, MarkerHandle, MarkerOptions, MarkerState,
    OverlayError, PaintKey, Patch,
};
use image::RgbaImage;
use std::sync::Arc;

const KIND: AnnotationKind = AnnotationKind::Marker;

impl<B: MapBackend> MapFacade<B> {
    /// Legt einen Icon-Marker samt Shadow-Marker an.
    ///
    /// Ohne Position schlägt der Aufruf mit `InvalidOptions` fehl.
    pub fn add_marker(&mut self, options: MarkerOptions) -> Result<MarkerHandle, OverlayError> {
        let position = options.validated_position()?;
        let defaults = self.options.style_defaults();
        let icon = match &options.icon {
            Some(image) => Some(self.acquire_icon(image)?),
            None => None,
        };

        let id = self.registry.allocate_id();
        let annotation = Annotation::new(
            id,
            options.z_index.unwrap_or(defaults.z_index),
            options.visible,
            AnnotationBody::Marker(MarkerState {
                position,
                icon,
                anchor: options.anchor.unwrap_or(defaults.marker_anchor),
                rotation: options.rotation,
                alpha: options.alpha,
                title: options.title.clone(),
                draggable: options.draggable,
            }),
        );
        if let Err(e) = self.insert(annotation) {
            if let Some(key) = icon {
                self.release_icon(key);
            }
            return Err(e);
        }

        let live = !self.reload.is_stopping_world();
        if let Err(e) = self.shadows.attach(
            &mut self.backend,
            id,
            position,
            options.visible,
            options.title,
            live,
        ) {
            if let Some(mut annotation) = self.registry.remove(id) {
                materialize::dematerialize(&mut self.backend, &mut self.zindex, &mut annotation);
            }
            if let Some(key) = icon {
                self.release_icon(key);
            }
            return Err(e.into());
        }
        Ok(MarkerHandle(id))
    }

    fn marker(&self, handle: MarkerHandle) -> Option<&MarkerState> {
        self.registry.get_kind(handle.0, KIND)?.as_marker()
    }

    /// Verschiebt einen Marker (inklusive Shadow-Marker).
    pub fn set_position(&mut self, handle: MarkerHandle, position: LatLng) {
        let applied = self.update(handle.0, KIND, |annotation| {
            let marker = annotation.as_marker_mut()?;
            marker.position = position;
            Some(Patch::Geometry)
        });
        if applied {
            self.shadows
                .mirror_position(&mut self.backend, handle.0, position);
        }
    }

    /// Position eines Markers.
    pub fn position(&self, handle: MarkerHandle) -> Option<LatLng> {
        self.marker(handle).map(|marker| marker.position)
    }

    /// Setzt die Icon-Rotation in Grad.
    pub fn set_rotation(&mut self, handle: MarkerHandle, rotation: f32) {
        self.update(handle.0, KIND, |annotation| {
            annotation.as_marker_mut()?.rotation = rotation;
            Some(Patch::Paint(&[PaintKey::IconRotate]))
        });
    }

    /// Icon-Rotation in Grad.
    pub fn rotation(&self, handle: MarkerHandle) -> Option<f32> {
        self.marker(handle).map(|marker| marker.rotation)
    }

    /// Setzt den Ankerpunkt relativ zur Icon-Größe.
    pub fn set_anchor(&mut self, handle: MarkerHandle, anchor: [f32; 2]) {
        self.update(handle.0, KIND, |annotation| {
            annotation.as_marker_mut()?.anchor = anchor;
            Some(Patch::Paint(&[PaintKey::IconAnchor]))
        });
    }

    /// Ankerpunkt relativ zur Icon-Größe.
    pub fn anchor(&self, handle: MarkerHandle) -> Option<[f32; 2]> {
        self.marker(handle).map(|marker| marker.anchor)
    }

    /// Setzt die Icon-Deckkraft.
    pub fn set_alpha(&mut self, handle: MarkerHandle, alpha: f32) {
        self.update(handle.0, KIND, |annotation| {
            annotation.as_marker_mut()?.alpha = alpha;
            Some(Patch::Paint(&[PaintKey::IconOpacity]))
        });
    }

    /// Icon-Deckkraft.
    pub fn alpha(&self, handle: MarkerHandle) -> Option<f32> {
        self.marker(handle).map(|marker| marker.alpha)
    }

    /// Setzt den Info-Fenster-Titel.
    pub fn set_title(&mut self, handle: MarkerHandle, title: Option<String>) {
        let Some(marker) = self
            .registry
            .get_kind_mut(handle.0, KIND)
            .and_then(Annotation::as_marker_mut)
        else {
            return;
        };
        marker.title = title.clone();
        self.shadows.set_title(&mut self.backend, handle.0, title);
    }

    /// Info-Fenster-Titel.
    pub fn title(&self, handle: MarkerHandle) -> Option<&str> {
        self.marker(handle)?.title.as_deref()
    }

    /// Ersetzt das Icon; `None` = Standard-Icon.
    ///
    /// Das alte Icon wird erst nach dem Umschalten freigegeben.
    pub fn set_marker_icon(
        &mut self,
        handle: MarkerHandle,
        icon: Option<&RgbaImage>,
    ) -> Result<(), OverlayError> {
        if self.marker(handle).is_none() {
            return Ok(());
        }
        let new_key = match icon {
            Some(image) => Some(self.acquire_icon(image)?),
            None => None,
        };
        let mut old_key = None;
        self.update(handle.0, KIND, |annotation| {
            let marker = annotation.as_marker_mut()?;
            old_key = std::mem::replace(&mut marker.icon, new_key);
            Some(Patch::Paint(&[PaintKey::IconImage]))
        });
        if let Some(key) = old_key {
            self.release_icon(key);
        }
        Ok(())
    }

    /// Eigenes Icon eines Markers (`None` = Standard-Icon).
    pub fn marker_icon(&self, handle: MarkerHandle) -> Option<Arc<RgbaImage>> {
        let key = self.marker(handle)?.icon?;
        self.icons.get(key).cloned()
    }

    /// Erlaubt oder verbietet Long-Press-Drag.
    pub fn set_draggable(&mut self, handle: MarkerHandle, draggable: bool) {
        if let Some(marker) = self
            .registry
            .get_kind_mut(handle.0, KIND)
            .and_then(Annotation::as_marker_mut)
        {
            marker.draggable = draggable;
        }
    }

    /// Ist der Marker per Long-Press verschiebbar?
    pub fn is_draggable(&self, handle: MarkerHandle) -> Option<bool> {
        self.marker(handle).map(|marker| marker.draggable)
    }

    /// Öffnet das Info-Fenster.
    pub fn show_info_window(&mut self, handle: MarkerHandle) {
        if self.marker(handle).is_some() {
            self.shadows
                .set_info_window(&mut self.backend, handle.0, true);
        }
    }

    /// Schließt das Info-Fenster.
    pub fn hide_info_window(&mut self, handle: MarkerHandle) {
        if self.marker(handle).is_some() {
            self.shadows
                .set_info_window(&mut self.backend, handle.0, false);
        }
    }

    /// Ist das Info-Fenster offen?
    pub fn is_info_window_shown(&self, handle: MarkerHandle) -> bool {
        self.shadows.is_info_window_shown(&self.backend, handle.0)
    }
}
