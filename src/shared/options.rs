//! Zentrale Konfiguration der Overlay-Engine.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{Rgba, StyleDefaults};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ── Drag ────────────────────────────────────────────────────────────

/// Maximaler Pixel-Abstand zwischen Long-Press und Marker für Drag-Start (exklusiv).
pub const DRAG_THRESHOLD_PX: f32 = 60.0;

// ── Annotationen ────────────────────────────────────────────────────

/// Standard-Z-Index neuer Annotationen.
pub const DEFAULT_Z_INDEX: i32 = 0;
/// Standard-Ankerpunkt eines Marker-Icons (Mitte unten).
pub const DEFAULT_MARKER_ANCHOR: [f32; 2] = [0.5, 1.0];
/// Standard-Linien- und Umrissstärke in Pixeln.
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
/// Standard-Linienfarbe (RGBA: Blau).
pub const DEFAULT_LINE_COLOR: Rgba = [0.1, 0.4, 0.9, 1.0];
/// Standard-Füllfarbe (RGBA: halbtransparentes Blau).
pub const DEFAULT_FILL_COLOR: Rgba = [0.1, 0.4, 0.9, 0.35];

// ── Kamera ──────────────────────────────────────────────────────────

/// Standard-Dauer einer Kamera-Animation in Millisekunden.
pub const CAMERA_ANIMATION_MS: u64 = 300;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Engine-Optionen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    // ── Drag ────────────────────────────────────────────────────
    /// Drag-Schwelle in Screen-Pixeln
    pub drag_threshold_px: f32,
    /// Long-Press-Drag global aktiv
    pub drag_enabled: bool,

    // ── Annotationen ────────────────────────────────────────────
    /// Z-Index, wenn die Optionen keinen angeben
    pub default_z_index: i32,
    /// Marker-Anker, wenn die Optionen keinen angeben
    pub default_marker_anchor: [f32; 2],
    /// Linien-/Umrissstärke, wenn die Optionen keine angeben
    pub default_stroke_width: f32,
    /// Linien- und Umrissfarbe, wenn die Optionen keine angeben
    pub default_line_color: Rgba,
    /// Füllfarbe, wenn die Optionen keine angeben
    pub default_fill_color: Rgba,

    // ── Kamera ──────────────────────────────────────────────────
    /// Dauer von `animate_to` ohne explizite Dauer
    pub camera_animation_ms: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            drag_enabled: true,
            default_z_index: DEFAULT_Z_INDEX,
            default_marker_anchor: DEFAULT_MARKER_ANCHOR,
            default_stroke_width: DEFAULT_STROKE_WIDTH,
            default_line_color: DEFAULT_LINE_COLOR,
            default_fill_color: DEFAULT_FILL_COLOR,
            camera_animation_ms: CAMERA_ANIMATION_MS,
        }
    }
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Parst Optionen aus einem TOML-String; fehlende Felder bekommen Standardwerte.
    pub fn from_toml(content: &str) -> Result<Self, crate::core::OverlayError> {
        toml::from_str(content).map_err(|e| crate::core::OverlayError::Config(e.to_string()))
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("overlay-demo"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("map_annotation_engine.toml")
    }

    /// Standardwerte für nicht gesetzte Stil-Felder neuer Annotationen.
    pub fn style_defaults(&self) -> StyleDefaults {
        StyleDefaults {
            z_index: self.default_z_index,
            line_color: self.default_line_color,
            fill_color: self.default_fill_color,
            stroke_color: self.default_line_color,
            stroke_width: self.default_stroke_width,
            marker_anchor: self.default_marker_anchor,
        }
    }

    /// Dauer einer Kamera-Animation ohne explizite Angabe.
    pub fn camera_animation(&self) -> Duration {
        Duration::from_millis(self.camera_animation_ms)
    }
}
