//! Long-Press-Drag für Marker.
//!
//! Der Controller kennt nur Screen-Positionen und Annotation-IDs; Projektion,
//! Marker-Update und Listener-Aufrufe übernimmt die Facade.

use crate::core::{AnnotationId, ScreenHitIndex, ScreenPoint};

/// Zeiger-Ereignis aus der Host-Plattform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Langer Druck an einer Screen-Position
    LongPress(ScreenPoint),
    /// Zeiger bewegt
    Move(ScreenPoint),
    /// Zeiger losgelassen
    Up,
    /// Geste vom System abgebrochen
    Cancel,
}

/// Zustand einer aktiven Drag-Geste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Gezogener Marker
    pub marker: AnnotationId,
    /// Mindestens eine Bewegung seit dem Start
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Zustandsautomat `Idle → Dragging → Idle`.
#[derive(Debug, Clone, Default)]
pub struct DragGestureController {
    state: DragState,
}

impl DragGestureController {
    /// Erstellt einen Controller im Zustand `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktive Session (falls vorhanden).
    pub fn session(&self) -> Option<DragSession> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Gibt `true` zurück, solange ein Marker gezogen wird.
    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    /// Long-Press: wählt den nächsten Kandidaten echt unterhalb der Schwelle.
    ///
    /// `candidates` enthält die Screen-Positionen aller ziehbaren Marker.
    /// Bei einem Treffer wechselt der Controller nach `Dragging`.
    pub fn long_press(
        &mut self,
        point: ScreenPoint,
        candidates: &[(AnnotationId, ScreenPoint)],
        threshold_px: f32,
    ) -> Option<AnnotationId> {
        if self.is_dragging() {
            return None;
        }
        let hit = ScreenHitIndex::from_points(candidates).nearest_within(point, threshold_px)?;
        log::debug!(
            "Drag-Start für {:?} ({:.1} px Abstand)",
            hit.annotation,
            hit.distance_px
        );
        self.state = DragState::Dragging(DragSession {
            marker: hit.annotation,
            active: false,
        });
        Some(hit.annotation)
    }

    /// Bewegung während einer Session; gibt den gezogenen Marker zurück.
    pub fn drag_move(&mut self) -> Option<AnnotationId> {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.active = true;
                Some(session.marker)
            }
            DragState::Idle => None,
        }
    }

    /// Beendet die Session (Loslassen oder Abbruch).
    pub fn finish(&mut self) -> Option<AnnotationId> {
        let marker = self.session().map(|session| session.marker);
        self.state = DragState::Idle;
        marker
    }

    /// Bricht eine Session still ab, wenn `marker` gerade gezogen wird.
    pub fn cancel_for(&mut self, marker: AnnotationId) -> bool {
        if self.session().is_some_and(|session| session.marker == marker) {
            self.state = DragState::Idle;
            true
        } else {
            false
        }
    }
}
