//! Schnittstelle zum Karten-Renderer.
//!
//! Die Engine spricht ausschließlich über [`MapBackend`] mit der Karte. Ein
//! Backend verwaltet Geometry-Feeds, Render-Layer in einem Stapel, Icon-Bilder,
//! transparente native Marker (für Hit-Tests und Info-Fenster), Projektion und
//! Kamera. Ein Style-Wechsel verwirft alle Layer, Feeds und Icons; das Backend
//! meldet Abschluss über `on_style_ready(token)` an die Facade.

mod recording;

pub use recording::{BackendCall, RecordedLayer, RecordedNativeMarker, RecordingBackend};

use crate::core::{
    BackendError, CameraPosition, FeedId, Geometry, LatLng, LayerId, LayerKind, NativeMarkerId,
    PaintKey, PaintValue, ScreenPoint, StyleToken,
};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Basis-Kartenstil.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseStyle {
    /// Straßenkarte
    #[default]
    Streets,
    /// Satellitenbild
    Satellite,
    /// Satellitenbild mit Straßen
    SatelliteStreets,
    /// Outdoor-Karte
    Outdoors,
    /// Heller Stil
    Light,
    /// Dunkler Stil
    Dark,
    /// Eigene Style-URL
    Custom(String),
}

impl fmt::Display for BaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Streets => f.write_str("streets"),
            Self::Satellite => f.write_str("satellite"),
            Self::SatelliteStreets => f.write_str("satellite-streets"),
            Self::Outdoors => f.write_str("outdoors"),
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
            Self::Custom(url) => write!(f, "custom({url})"),
        }
    }
}

/// Render-Backend einer Karte.
///
/// Alle Layer-, Feed-, Icon- und Marker-Operationen können fehlschlagen; die
/// Engine protokolliert Fehler beim Abbau und reicht Fehler beim Anlegen weiter.
pub trait MapBackend: Send {
    // ── Geometry-Feeds ──────────────────────────────────────────

    /// Legt einen Feed mit Anfangsdaten an.
    fn create_geometry_feed(&mut self, geometry: &Geometry) -> Result<FeedId, BackendError>;

    /// Ersetzt die Daten eines Feeds.
    fn update_geometry_feed(&mut self, feed: FeedId, geometry: &Geometry)
    -> Result<(), BackendError>;

    /// Entfernt einen Feed.
    fn destroy_geometry_feed(&mut self, feed: FeedId) -> Result<(), BackendError>;

    // ── Render-Layer ────────────────────────────────────────────

    /// Legt einen Layer über `feed` an; er landet zunächst oben im Stapel.
    fn create_render_layer(&mut self, kind: LayerKind, feed: FeedId)
    -> Result<LayerId, BackendError>;

    /// Entfernt einen Layer.
    fn destroy_render_layer(&mut self, layer: LayerId) -> Result<(), BackendError>;

    /// Setzt eine Paint-Property.
    fn set_layer_paint_property(
        &mut self,
        layer: LayerId,
        key: PaintKey,
        value: &PaintValue,
    ) -> Result<(), BackendError>;

    /// Verschiebt `layer` direkt über `below`.
    fn insert_layer_above(&mut self, layer: LayerId, below: LayerId) -> Result<(), BackendError>;

    // ── Icons ───────────────────────────────────────────────────

    /// Registriert eine Bitmap unter einem Namen.
    fn add_icon_image(&mut self, name: &str, image: &RgbaImage) -> Result<(), BackendError>;

    /// Entfernt eine registrierte Bitmap.
    fn remove_icon_image(&mut self, name: &str) -> Result<(), BackendError>;

    // ── Native (Shadow-)Marker ──────────────────────────────────

    /// Legt einen transparenten nativen Marker an.
    fn create_native_marker(
        &mut self,
        position: LatLng,
        visible: bool,
    ) -> Result<NativeMarkerId, BackendError>;

    /// Verschiebt einen nativen Marker.
    fn set_native_marker_position(
        &mut self,
        marker: NativeMarkerId,
        position: LatLng,
    ) -> Result<(), BackendError>;

    /// Schaltet die Sichtbarkeit (und damit Klickbarkeit) eines nativen Markers.
    fn set_native_marker_visible(
        &mut self,
        marker: NativeMarkerId,
        visible: bool,
    ) -> Result<(), BackendError>;

    /// Setzt den Titel des Info-Fensters.
    fn set_native_marker_title(
        &mut self,
        marker: NativeMarkerId,
        title: Option<&str>,
    ) -> Result<(), BackendError>;

    /// Öffnet das Info-Fenster.
    fn show_info_window(&mut self, marker: NativeMarkerId) -> Result<(), BackendError>;

    /// Schließt das Info-Fenster.
    fn hide_info_window(&mut self, marker: NativeMarkerId) -> Result<(), BackendError>;

    /// Prüft, ob das Info-Fenster offen ist.
    fn is_info_window_shown(&self, marker: NativeMarkerId) -> bool;

    /// Entfernt einen nativen Marker.
    fn destroy_native_marker(&mut self, marker: NativeMarkerId) -> Result<(), BackendError>;

    // ── Projektion und Kamera ───────────────────────────────────

    /// Screen-Pixel → Koordinate.
    fn project_screen_to_map(&self, point: ScreenPoint) -> LatLng;

    /// Koordinate → Screen-Pixel.
    fn project_map_to_screen(&self, coord: LatLng) -> ScreenPoint;

    /// Setzt die Kamera sofort.
    fn move_camera(&mut self, position: &CameraPosition);

    /// Startet eine Kamera-Animation.
    fn animate_camera(&mut self, position: &CameraPosition, duration: Duration);

    /// Aktuelle Kamera.
    fn camera_position(&self) -> CameraPosition;

    // ── Style ───────────────────────────────────────────────────

    /// Startet das Laden eines Basis-Stils.
    ///
    /// Der Abschluss wird asynchron mit demselben `token` gemeldet.
    fn load_style(&mut self, style: &BaseStyle, token: StyleToken);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_style_serializes_in_snake_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            style: BaseStyle,
        }

        let text = toml::to_string(&Wrapper {
            style: BaseStyle::SatelliteStreets,
        })
        .expect("Serialisierung erwartet");
        assert!(text.contains("satellite_streets"));

        let parsed: Wrapper = toml::from_str("style = \"dark\"").expect("Parsen erwartet");
        assert_eq!(parsed.style, BaseStyle::Dark);
    }

    #[test]
    fn custom_style_display_includes_url() {
        let style = BaseStyle::Custom("mapbox://styles/demo".to_string());
        assert_eq!(style.to_string(), "custom(mapbox://styles/demo)");
    }
}
