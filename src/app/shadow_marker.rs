//! Shadow-Marker: transparente native Marker als Hit-Ziel für Icon-Marker.
//!
//! Icon-Marker werden als Symbol-Layer gezeichnet und haben daher weder
//! Klick-Erkennung noch Info-Fenster. Jeder Marker bekommt deshalb einen
//! unsichtbaren nativen Marker an derselben Position, dessen Position und
//! Sichtbarkeit gespiegelt werden. Während eines Reloads existieren keine
//! nativen Marker; der gespiegelte Zustand bleibt erhalten und wird beim
//! Wiederanhängen übernommen.

use super::materialize::log_destroy_error;
use crate::backend::MapBackend;
use crate::core::{AnnotationId, BackendError, LatLng, NativeMarkerId};
use std::collections::HashMap;

/// Spiegelzustand eines Markers
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowMarkerBridge {
    /// Zugehöriger Marker
    pub marker: AnnotationId,
    /// Nativer Marker (fehlt während eines Reloads)
    pub native: Option<NativeMarkerId>,
    /// Zuletzt gespiegelte Position
    pub mirrored_position: LatLng,
    /// Zuletzt gespiegelte Sichtbarkeit
    pub mirrored_visible: bool,
    /// Titel des Info-Fensters
    pub title: Option<String>,
    /// Info-Fenster war zuletzt offen
    pub info_window_shown: bool,
}

/// Alle Shadow-Marker einer Facade.
#[derive(Debug, Clone, Default)]
pub struct ShadowMarkers {
    bridges: HashMap<AnnotationId, ShadowMarkerBridge>,
    by_native: HashMap<NativeMarkerId, AnnotationId>,
}

impl ShadowMarkers {
    /// Erstellt eine leere Sammlung.
    pub fn new() -> Self {
        Self::default()
    }

    /// Legt die Bridge eines neuen Markers an.
    ///
    /// Mit `live = false` (während eines Reloads) wird nur der Zustand gespeichert.
    pub fn attach<B: MapBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        marker: AnnotationId,
        position: LatLng,
        visible: bool,
        title: Option<String>,
        live: bool,
    ) -> Result<(), BackendError> {
        let mut bridge = ShadowMarkerBridge {
            marker,
            native: None,
            mirrored_position: position,
            mirrored_visible: visible,
            title,
            info_window_shown: false,
        };
        if live {
            let native = create_native(backend, &bridge)?;
            bridge.native = Some(native);
            self.by_native.insert(native, marker);
        }
        self.bridges.insert(marker, bridge);
        Ok(())
    }

    /// Entfernt die Bridge eines Markers samt nativem Marker.
    pub fn remove<B: MapBackend + ?Sized>(&mut self, backend: &mut B, marker: AnnotationId) {
        let Some(bridge) = self.bridges.remove(&marker) else {
            return;
        };
        if let Some(native) = bridge.native {
            self.by_native.remove(&native);
            log_destroy_error(backend.destroy_native_marker(native));
        }
    }

    /// Baut alle nativen Marker ab und merkt sich offene Info-Fenster.
    pub fn detach_all<B: MapBackend + ?Sized>(&mut self, backend: &mut B) {
        for bridge in self.bridges.values_mut() {
            if let Some(native) = bridge.native.take() {
                bridge.info_window_shown = backend.is_info_window_shown(native);
                log_destroy_error(backend.destroy_native_marker(native));
            }
        }
        self.by_native.clear();
    }

    /// Legt für alle Bridges ohne nativen Marker einen neuen an.
    ///
    /// Fehler werden protokolliert; der betroffene Marker bleibt bis zum
    /// nächsten Reload ohne Hit-Ziel.
    pub fn attach_all<B: MapBackend + ?Sized>(&mut self, backend: &mut B) {
        for bridge in self.bridges.values_mut() {
            if bridge.native.is_some() {
                continue;
            }
            match create_native(backend, bridge) {
                Ok(native) => {
                    bridge.native = Some(native);
                    self.by_native.insert(native, bridge.marker);
                }
                Err(e) => log::error!(
                    "Shadow-Marker für {:?} konnte nicht angelegt werden: {}",
                    bridge.marker,
                    e
                ),
            }
        }
    }

    /// Spiegelt eine neue Marker-Position.
    pub fn mirror_position<B: MapBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        marker: AnnotationId,
        position: LatLng,
    ) {
        let Some(bridge) = self.bridges.get_mut(&marker) else {
            return;
        };
        bridge.mirrored_position = position;
        if let Some(native) = bridge.native {
            warn_on_error(backend.set_native_marker_position(native, position));
        }
    }

    /// Spiegelt die Sichtbarkeit eines Markers.
    pub fn mirror_visible<B: MapBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        marker: AnnotationId,
        visible: bool,
    ) {
        let Some(bridge) = self.bridges.get_mut(&marker) else {
            return;
        };
        bridge.mirrored_visible = visible;
        if let Some(native) = bridge.native {
            warn_on_error(backend.set_native_marker_visible(native, visible));
        }
    }

    /// Setzt den Info-Fenster-Titel.
    pub fn set_title<B: MapBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        marker: AnnotationId,
        title: Option<String>,
    ) {
        let Some(bridge) = self.bridges.get_mut(&marker) else {
            return;
        };
        if let Some(native) = bridge.native {
            warn_on_error(backend.set_native_marker_title(native, title.as_deref()));
        }
        bridge.title = title;
    }

    /// Öffnet oder schließt das Info-Fenster.
    pub fn set_info_window<B: MapBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        marker: AnnotationId,
        shown: bool,
    ) {
        let Some(bridge) = self.bridges.get_mut(&marker) else {
            return;
        };
        bridge.info_window_shown = shown;
        if let Some(native) = bridge.native {
            let result = if shown {
                backend.show_info_window(native)
            } else {
                backend.hide_info_window(native)
            };
            warn_on_error(result);
        }
    }

    /// Info-Fenster-Zustand; live vom Backend, sonst der gemerkte Wert.
    pub fn is_info_window_shown<B: MapBackend + ?Sized>(
        &self,
        backend: &B,
        marker: AnnotationId,
    ) -> bool {
        match self.bridges.get(&marker) {
            Some(ShadowMarkerBridge {
                native: Some(native),
                ..
            }) => backend.is_info_window_shown(*native),
            Some(bridge) => bridge.info_window_shown,
            None => false,
        }
    }

    /// Marker hinter einem nativen Marker.
    pub fn marker_for_native(&self, native: NativeMarkerId) -> Option<AnnotationId> {
        self.by_native.get(&native).copied()
    }

    /// Bridge eines Markers.
    pub fn get(&self, marker: AnnotationId) -> Option<&ShadowMarkerBridge> {
        self.bridges.get(&marker)
    }

    /// Anzahl der Bridges.
    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    /// Gibt `true` zurück, wenn keine Bridge existiert.
    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }
}

fn create_native<B: MapBackend + ?Sized>(
    backend: &mut B,
    bridge: &ShadowMarkerBridge,
) -> Result<NativeMarkerId, BackendError> {
    let native = backend.create_native_marker(bridge.mirrored_position, bridge.mirrored_visible)?;
    let restored = backend
        .set_native_marker_title(native, bridge.title.as_deref())
        .and_then(|()| {
            if bridge.info_window_shown {
                backend.show_info_window(native)
            } else {
                Ok(())
            }
        });
    if let Err(e) = restored {
        log_destroy_error(backend.destroy_native_marker(native));
        return Err(e);
    }
    Ok(native)
}

fn warn_on_error(result: Result<(), BackendError>) {
    if let Err(e) = result {
        log::warn!("Shadow-Marker-Aktualisierung fehlgeschlagen: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;

    #[test]
    fn position_is_mirrored_to_native_marker() {
        let mut backend = RecordingBackend::new();
        let mut shadows = ShadowMarkers::new();
        shadows
            .attach(&mut backend, AnnotationId(1), LatLng::default(), true, None, true)
            .expect("Bridge erwartet");

        shadows.mirror_position(&mut backend, AnnotationId(1), LatLng::new(3.0, 4.0));

        let native = shadows
            .get(AnnotationId(1))
            .and_then(|bridge| bridge.native)
            .expect("nativer Marker erwartet");
        assert_eq!(
            backend.native_marker(native).map(|m| m.position),
            Some(LatLng::new(3.0, 4.0))
        );
        assert_eq!(shadows.marker_for_native(native), Some(AnnotationId(1)));
    }

    #[test]
    fn info_window_survives_detach_and_attach() {
        let mut backend = RecordingBackend::new();
        let mut shadows = ShadowMarkers::new();
        shadows
            .attach(
                &mut backend,
                AnnotationId(1),
                LatLng::default(),
                true,
                Some("Start".to_string()),
                true,
            )
            .expect("Bridge erwartet");
        shadows.set_info_window(&mut backend, AnnotationId(1), true);

        shadows.detach_all(&mut backend);
        assert_eq!(backend.native_marker_count(), 0);
        assert!(shadows.is_info_window_shown(&backend, AnnotationId(1)));

        shadows.attach_all(&mut backend);
        let native = shadows
            .get(AnnotationId(1))
            .and_then(|bridge| bridge.native)
            .expect("nativer Marker erwartet");
        assert!(backend.is_info_window_shown(native));
        assert_eq!(
            backend.native_marker(native).and_then(|m| m.title.clone()),
            Some("Start".to_string())
        );
    }

    #[test]
    fn offline_attach_defers_native_marker() {
        let mut backend = RecordingBackend::new();
        let mut shadows = ShadowMarkers::new();
        shadows
            .attach(&mut backend, AnnotationId(2), LatLng::default(), true, None, false)
            .expect("Bridge erwartet");

        assert_eq!(backend.native_marker_count(), 0);
        shadows.attach_all(&mut backend);
        assert_eq!(backend.native_marker_count(), 1);
    }
}
