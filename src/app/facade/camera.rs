//! Kamera-Steuerung und Kamera-Ereignisse.

use super::MapFacade;
use crate::backend::MapBackend;
use crate::core::CameraPosition;
use std::time::Duration;

impl<B: MapBackend> MapFacade<B> {
    /// Setzt die Kamera sofort und meldet Änderung und Stillstand.
    pub fn move_to(&mut self, position: CameraPosition) {
        self.backend.move_camera(&position);
        let current = self.backend.camera_position();
        self.listeners.emit_camera_change(&current);
        self.listeners.emit_camera_finished(&current);
    }

    /// Startet eine Kamera-Animation.
    ///
    /// Ohne Dauer gilt `camera_animation_ms` aus den Optionen. Den Stillstand
    /// meldet der Host über [`MapFacade::handle_camera_idle`].
    pub fn animate_to(&mut self, position: CameraPosition, duration: Option<Duration>) {
        let duration = duration.unwrap_or_else(|| self.options.camera_animation());
        log::debug!("Kamera-Animation über {:?}", duration);
        self.backend.animate_camera(&position, duration);
    }

    /// Aktuelle Kamera.
    pub fn camera_position(&self) -> CameraPosition {
        self.backend.camera_position()
    }

    /// Host meldet eine Kamera-Bewegung.
    pub fn handle_camera_change(&mut self) {
        let current = self.backend.camera_position();
        self.listeners.emit_camera_change(&current);
    }

    /// Host meldet Kamera-Stillstand.
    pub fn handle_camera_idle(&mut self) {
        let current = self.backend.camera_position();
        self.listeners.emit_camera_finished(&current);
    }

    /// Listener für Kamera-Änderungen.
    pub fn on_camera_change(&mut self, listener: impl FnMut(&CameraPosition) + Send + 'static) {
        self.listeners.camera_change = Some(Box::new(listener));
    }

    /// Listener für Kamera-Stillstand.
    pub fn on_camera_finished(&mut self, listener: impl FnMut(&CameraPosition) + Send + 'static) {
        self.listeners.camera_finished = Some(Box::new(listener));
    }
}
