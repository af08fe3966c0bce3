//! Fehlertypen der Overlay-Engine und der Backend-Schnittstelle.

use super::annotation::AnnotationKind;
use thiserror::Error;

/// Fehler, die ein Render-Backend bei Layer-, Feed- oder Marker-Operationen meldet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Layer-ID ist dem Backend nicht (mehr) bekannt
    #[error("unbekannter Render-Layer: {0}")]
    UnknownLayer(u64),
    /// Feed-ID ist dem Backend nicht (mehr) bekannt
    #[error("unbekannter Geometry-Feed: {0}")]
    UnknownFeed(u64),
    /// Native Marker-ID ist dem Backend nicht (mehr) bekannt
    #[error("unbekannter nativer Marker: {0}")]
    UnknownNativeMarker(u64),
    /// Backend hat die Operation abgelehnt
    #[error("Backend hat Operation abgelehnt: {0}")]
    Rejected(String),
}

/// Fehler der öffentlichen Facade.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Pflichtfeld fehlt oder ist ungültig (synchron an den Aufrufer)
    #[error("ungültige Optionen für {kind:?}: {reason}")]
    InvalidOptions {
        /// Annotation-Art, deren Optionen abgelehnt wurden
        kind: AnnotationKind,
        /// Menschenlesbarer Grund
        reason: &'static str,
    },
    /// Backend-Aufruf beim Anlegen fehlgeschlagen
    #[error("Backend-Fehler: {0}")]
    Backend(#[from] BackendError),
    /// Konfiguration konnte nicht verarbeitet werden
    #[error("Konfigurationsfehler: {0}")]
    Config(String),
}

/// Result-Alias für Facade-Operationen.
pub type Result<T> = std::result::Result<T, OverlayError>;
