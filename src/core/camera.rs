//! Kamera-Position und lineare Screen/Map-Projektion.

use super::geometry::{LatLng, ScreenPoint};
use glam::DVec2;

/// Kamera-Zustand der Karte
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPosition {
    /// Zielkoordinate in Bildschirmmitte
    pub target: LatLng,
    /// Zoom-Stufe (0 = ganze Welt in einer Kachel)
    pub zoom: f64,
    /// Drehung in Grad (im Uhrzeigersinn)
    pub bearing: f64,
    /// Neigung in Grad
    pub tilt: f64,
}

impl CameraPosition {
    /// Minimale Zoom-Stufe.
    pub const ZOOM_MIN: f64 = 0.0;
    /// Maximale Zoom-Stufe.
    pub const ZOOM_MAX: f64 = 22.0;
    /// Kachelgröße in Pixeln bei Zoom 0.
    pub const TILE_SIZE_PX: f64 = 256.0;

    /// Erstellt eine Kamera ohne Drehung und Neigung.
    pub fn new(target: LatLng, zoom: f64) -> Self {
        Self {
            target,
            zoom: zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX),
            bearing: 0.0,
            tilt: 0.0,
        }
    }

    /// Setzt die Drehung (Builder-Stil).
    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = bearing;
        self
    }

    /// Pixel pro Grad bei aktuellem Zoom.
    pub fn pixels_per_degree(&self) -> f64 {
        Self::TILE_SIZE_PX * 2f64.powf(self.zoom) / 360.0
    }

    /// Konvertiert Screen-Koordinaten zu Map-Koordinaten.
    ///
    /// Lineare Abbildung um die Bildschirmmitte; Screen-Y wächst nach unten,
    /// Breitengrad nach oben. Drehung und Neigung bleiben unberücksichtigt.
    pub fn screen_to_map(&self, point: ScreenPoint, viewport_size: ScreenPoint) -> LatLng {
        let center = viewport_size.as_dvec2() * 0.5;
        let delta = point.as_dvec2() - center;
        let ppd = self.pixels_per_degree();
        let offset = DVec2::new(delta.x / ppd, -delta.y / ppd);
        LatLng::from_dvec2(self.target.as_dvec2() + offset)
    }

    /// Gegenstück zu [`CameraPosition::screen_to_map`].
    pub fn map_to_screen(&self, coord: LatLng, viewport_size: ScreenPoint) -> ScreenPoint {
        let center = viewport_size.as_dvec2() * 0.5;
        let delta = coord.as_dvec2() - self.target.as_dvec2();
        let ppd = self.pixels_per_degree();
        let screen = center + DVec2::new(delta.x * ppd, -delta.y * ppd);
        screen.as_vec2()
    }
}

impl Default for CameraPosition {
    fn default() -> Self {
        Self::new(LatLng::default(), 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zoom_is_clamped() {
        let camera = CameraPosition::new(LatLng::default(), 40.0);
        assert_relative_eq!(camera.zoom, CameraPosition::ZOOM_MAX);
    }

    #[test]
    fn test_screen_center_maps_to_target() {
        let camera = CameraPosition::new(LatLng::new(10.0, 20.0), 5.0);
        let viewport = ScreenPoint::new(800.0, 600.0);
        let coord = camera.screen_to_map(ScreenPoint::new(400.0, 300.0), viewport);
        assert_relative_eq!(coord.lat, 10.0);
        assert_relative_eq!(coord.lng, 20.0);
    }

    #[test]
    fn test_projection_roundtrip() {
        let camera = CameraPosition::new(LatLng::new(47.0, 8.0), 12.0);
        let viewport = ScreenPoint::new(1024.0, 768.0);
        let coord = LatLng::new(47.001, 8.002);
        let screen = camera.map_to_screen(coord, viewport);
        let back = camera.screen_to_map(screen, viewport);
        assert_relative_eq!(back.lat, coord.lat, epsilon = 1e-4);
        assert_relative_eq!(back.lng, coord.lng, epsilon = 1e-4);
    }

    #[test]
    fn test_north_is_up_on_screen() {
        let camera = CameraPosition::new(LatLng::default(), 10.0);
        let viewport = ScreenPoint::new(400.0, 400.0);
        let north = camera.map_to_screen(LatLng::new(0.01, 0.0), viewport);
        // Nördlicher Punkt liegt oberhalb der Mitte
        assert!(north.y < 200.0);
    }

    #[test]
    fn test_zoom_doubles_pixel_scale() {
        let a = CameraPosition::new(LatLng::default(), 3.0);
        let b = CameraPosition::new(LatLng::default(), 4.0);
        assert_relative_eq!(b.pixels_per_degree(), a.pixels_per_degree() * 2.0);
    }
}
