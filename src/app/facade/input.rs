//! Zeiger-, Klick- und Info-Fenster-Ereignisse vom Host.

use super::MapFacade;
use crate::app::drag::PointerEvent;
use crate::backend::MapBackend;
use crate::core::{AnnotationId, LatLng, MarkerHandle, NativeMarkerId, ScreenPoint};

impl<B: MapBackend> MapFacade<B> {
    /// Verarbeitet ein Zeiger-Ereignis; `true` = von der Engine verbraucht.
    ///
    /// Ein Long-Press startet entweder einen Drag oder wird als
    /// Karten-Long-Click gemeldet, nie beides.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::LongPress(point) => {
                if self.drag.is_dragging() {
                    return true;
                }
                let candidates = self.drag_candidates();
                let threshold = self.options.drag_threshold_px;
                match self.drag.long_press(point, &candidates, threshold) {
                    Some(id) => {
                        let position = self.marker_position(id);
                        self.listeners.emit_drag_start(MarkerHandle(id), position);
                    }
                    None => {
                        let coord = self.backend.project_screen_to_map(point);
                        self.listeners.emit_map_long_click(coord);
                    }
                }
                true
            }
            PointerEvent::Move(point) => {
                let Some(id) = self.drag.drag_move() else {
                    return false;
                };
                let coord = self.backend.project_screen_to_map(point);
                self.set_position(MarkerHandle(id), coord);
                self.listeners.emit_drag(MarkerHandle(id), coord);
                true
            }
            PointerEvent::Up | PointerEvent::Cancel => {
                let Some(id) = self.drag.finish() else {
                    return false;
                };
                let position = self.marker_position(id);
                self.listeners.emit_drag_end(MarkerHandle(id), position);
                true
            }
        }
    }

    /// Host meldet einen Klick auf die Karte (ohne Marker-Treffer).
    pub fn handle_map_click(&mut self, point: ScreenPoint) {
        let coord = self.backend.project_screen_to_map(point);
        self.listeners.emit_map_click(coord);
    }

    /// Host meldet einen Klick auf einen nativen Marker.
    ///
    /// Gibt `false` zurück, wenn der native Marker keinem Marker gehört.
    /// Verbraucht der Listener den Klick nicht, öffnet sich das Info-Fenster
    /// eines Markers mit Titel.
    pub fn handle_native_marker_click(&mut self, native: NativeMarkerId) -> bool {
        let Some(id) = self.shadows.marker_for_native(native) else {
            return false;
        };
        let handle = MarkerHandle(id);
        if !self.listeners.emit_marker_click(handle) && self.title(handle).is_some() {
            self.show_info_window(handle);
        }
        true
    }

    /// Host meldet einen Klick auf ein Info-Fenster.
    pub fn handle_info_window_click(&mut self, native: NativeMarkerId) -> bool {
        let Some(id) = self.shadows.marker_for_native(native) else {
            return false;
        };
        self.listeners.emit_info_window_click(MarkerHandle(id));
        true
    }

    /// Nativer Shadow-Marker eines Markers (für Host-Hit-Tests).
    pub fn native_marker_of(&self, handle: MarkerHandle) -> Option<NativeMarkerId> {
        self.shadows.get(handle.0)?.native
    }

    /// Listener für Marker-Klicks; Rückgabe `true` verbraucht den Klick.
    pub fn on_marker_click(&mut self, listener: impl FnMut(MarkerHandle) -> bool + Send + 'static) {
        self.listeners.marker_click = Some(Box::new(listener));
    }

    /// Listener für Karten-Klicks.
    pub fn on_map_click(&mut self, listener: impl FnMut(LatLng) + Send + 'static) {
        self.listeners.map_click = Some(Box::new(listener));
    }

    /// Listener für Karten-Long-Clicks.
    pub fn on_map_long_click(&mut self, listener: impl FnMut(LatLng) + Send + 'static) {
        self.listeners.map_long_click = Some(Box::new(listener));
    }

    /// Listener für Info-Fenster-Klicks.
    pub fn on_info_window_click(&mut self, listener: impl FnMut(MarkerHandle) + Send + 'static) {
        self.listeners.info_window_click = Some(Box::new(listener));
    }

    /// Listener für den Drag-Start.
    pub fn on_marker_drag_start(
        &mut self,
        listener: impl FnMut(MarkerHandle, LatLng) + Send + 'static,
    ) {
        self.listeners.drag_start = Some(Box::new(listener));
    }

    /// Listener für Drag-Bewegungen.
    pub fn on_marker_drag(&mut self, listener: impl FnMut(MarkerHandle, LatLng) + Send + 'static) {
        self.listeners.drag = Some(Box::new(listener));
    }

    /// Listener für das Drag-Ende.
    pub fn on_marker_drag_end(
        &mut self,
        listener: impl FnMut(MarkerHandle, LatLng) + Send + 'static,
    ) {
        self.listeners.drag_end = Some(Box::new(listener));
    }

    /// Screen-Positionen aller sichtbaren, ziehbaren Marker.
    fn drag_candidates(&self) -> Vec<(AnnotationId, ScreenPoint)> {
        if !self.options.drag_enabled {
            return Vec::new();
        }
        self.registry
            .iter()
            .filter(|annotation| annotation.visible)
            .filter_map(|annotation| {
                let marker = annotation.as_marker()?;
                marker.draggable.then(|| {
                    (
                        annotation.id,
                        self.backend.project_map_to_screen(marker.position),
                    )
                })
            })
            .collect()
    }

    fn marker_position(&self, id: AnnotationId) -> LatLng {
        self.position(MarkerHandle(id)).unwrap_or_default()
    }
}
