//! Listener-Slots der Facade.
//!
//! Pro Ereignisart gibt es genau einen Listener; ein neuer ersetzt den alten.

use crate::core::{CameraPosition, LatLng, MarkerHandle};

/// Marker-Klick; `true` = Klick verbraucht (kein Info-Fenster).
pub type MarkerClickListener = Box<dyn FnMut(MarkerHandle) -> bool + Send>;
/// Klick oder Long-Click auf die Karte.
pub type MapClickListener = Box<dyn FnMut(LatLng) + Send>;
/// Klick auf ein Info-Fenster.
pub type InfoWindowClickListener = Box<dyn FnMut(MarkerHandle) + Send>;
/// Drag-Start, -Bewegung oder -Ende eines Markers.
pub type MarkerDragListener = Box<dyn FnMut(MarkerHandle, LatLng) + Send>;
/// Kamera-Änderung oder -Stillstand.
pub type CameraListener = Box<dyn FnMut(&CameraPosition) + Send>;

/// Alle registrierten Listener.
#[derive(Default)]
pub struct Listeners {
    pub(crate) marker_click: Option<MarkerClickListener>,
    pub(crate) map_click: Option<MapClickListener>,
    pub(crate) map_long_click: Option<MapClickListener>,
    pub(crate) info_window_click: Option<InfoWindowClickListener>,
    pub(crate) drag_start: Option<MarkerDragListener>,
    pub(crate) drag: Option<MarkerDragListener>,
    pub(crate) drag_end: Option<MarkerDragListener>,
    pub(crate) camera_change: Option<CameraListener>,
    pub(crate) camera_finished: Option<CameraListener>,
}

impl Listeners {
    /// Meldet einen Marker-Klick; ohne Listener gilt er als nicht verbraucht.
    pub fn emit_marker_click(&mut self, marker: MarkerHandle) -> bool {
        self.marker_click
            .as_mut()
            .is_some_and(|listener| listener(marker))
    }

    /// Meldet einen Karten-Klick.
    pub fn emit_map_click(&mut self, coord: LatLng) {
        if let Some(listener) = self.map_click.as_mut() {
            listener(coord);
        }
    }

    /// Meldet einen Long-Click ohne Drag-Treffer.
    pub fn emit_map_long_click(&mut self, coord: LatLng) {
        if let Some(listener) = self.map_long_click.as_mut() {
            listener(coord);
        }
    }

    /// Meldet einen Info-Fenster-Klick.
    pub fn emit_info_window_click(&mut self, marker: MarkerHandle) {
        if let Some(listener) = self.info_window_click.as_mut() {
            listener(marker);
        }
    }

    /// Meldet den Drag-Start.
    pub fn emit_drag_start(&mut self, marker: MarkerHandle, position: LatLng) {
        if let Some(listener) = self.drag_start.as_mut() {
            listener(marker, position);
        }
    }

    /// Meldet eine Drag-Bewegung.
    pub fn emit_drag(&mut self, marker: MarkerHandle, position: LatLng) {
        if let Some(listener) = self.drag.as_mut() {
            listener(marker, position);
        }
    }

    /// Meldet das Drag-Ende.
    pub fn emit_drag_end(&mut self, marker: MarkerHandle, position: LatLng) {
        if let Some(listener) = self.drag_end.as_mut() {
            listener(marker, position);
        }
    }

    /// Meldet eine Kamera-Änderung.
    pub fn emit_camera_change(&mut self, position: &CameraPosition) {
        if let Some(listener) = self.camera_change.as_mut() {
            listener(position);
        }
    }

    /// Meldet den Kamera-Stillstand.
    pub fn emit_camera_finished(&mut self, position: &CameraPosition) {
        if let Some(listener) = self.camera_finished.as_mut() {
            listener(position);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("marker_click", &self.marker_click.is_some())
            .field("map_click", &self.map_click.is_some())
            .field("map_long_click", &self.map_long_click.is_some())
            .field("info_window_click", &self.info_window_click.is_some())
            .field("drag_start", &self.drag_start.is_some())
            .field("drag", &self.drag.is_some())
            .field("drag_end", &self.drag_end.is_some())
            .field("camera_change", &self.camera_change.is_some())
            .field("camera_finished", &self.camera_finished.is_some())
            .finish()
    }
}
