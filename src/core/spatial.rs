//! Spatial-Index (KD-Tree) über projizierte Marker-Positionen im Screen-Space.

use glam::Vec2;
use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use super::annotation::AnnotationId;

/// Ergebnis einer Trefferabfrage gegen den Screen-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMatch {
    /// ID der getroffenen Annotation
    pub annotation: AnnotationId,
    /// Pixel-Distanz zum Suchpunkt
    pub distance_px: f32,
}

/// Read-only Index über Screen-Positionen (für Long-Press-Hit-Tests).
///
/// Der KD-Tree enthält jede Position nur einmal; Annotationen an identischer
/// Position teilen sich einen Eintrag. Nicht-endliche Positionen werden
/// nicht indexiert.
#[derive(Debug, Clone)]
pub struct ScreenHitIndex {
    tree: KdTree<f64, 2>,
    slots: Vec<Vec<AnnotationId>>,
    len: usize,
}

impl ScreenHitIndex {
    /// Baut einen Index aus `(Annotation, Screen-Position)`-Paaren.
    pub fn from_points(points: &[(AnnotationId, Vec2)]) -> Self {
        let mut grouped: IndexMap<[u64; 2], (Vec2, Vec<AnnotationId>)> = IndexMap::new();
        for (id, pos) in points.iter().filter(|(_, pos)| pos.is_finite()) {
            // +0.0 vereinheitlicht -0.0 und 0.0 auf denselben Schlüssel
            let pos = *pos + Vec2::ZERO;
            grouped
                .entry([f64::from(pos.x).to_bits(), f64::from(pos.y).to_bits()])
                .or_insert_with(|| (pos, Vec::new()))
                .1
                .push(*id);
        }

        let entries: Vec<[f64; 2]> = grouped
            .values()
            .map(|(pos, _)| [pos.x as f64, pos.y as f64])
            .collect();
        let tree: KdTree<f64, 2> = (&entries).into();
        let slots: Vec<Vec<AnnotationId>> = grouped.into_values().map(|(_, ids)| ids).collect();
        let len = slots.iter().map(Vec::len).sum();

        Self { tree, slots, len }
    }

    /// Gibt die Anzahl indexierter Punkte zurück.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Gibt `true` zurück, wenn keine Punkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Findet den nächsten Punkt zur Screen-Position.
    pub fn nearest(&self, query: Vec2) -> Option<ScreenMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        // Bei identischen Positionen gewinnt die zuletzt übergebene Annotation
        let annotation = *self.slots.get(result.item as usize)?.last()?;

        Some(ScreenMatch {
            annotation,
            distance_px: (result.distance as f32).sqrt(),
        })
    }

    /// Nächster Punkt, sofern echt näher als `threshold_px`.
    pub fn nearest_within(&self, query: Vec2, threshold_px: f32) -> Option<ScreenMatch> {
        self.nearest(query)
            .filter(|hit| hit.distance_px < threshold_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<(AnnotationId, Vec2)> {
        vec![
            (AnnotationId(1), Vec2::new(100.0, 100.0)),
            (AnnotationId(2), Vec2::new(140.0, 100.0)),
            (AnnotationId(3), Vec2::new(100.0, 155.0)),
        ]
    }

    #[test]
    fn nearest_returns_expected_annotation() {
        let index = ScreenHitIndex::from_points(&sample_points());
        let hit = index
            .nearest(Vec2::new(138.0, 101.0))
            .expect("Treffer erwartet");

        assert_eq!(hit.annotation, AnnotationId(2));
        assert!(hit.distance_px < 3.0);
    }

    #[test]
    fn threshold_is_exclusive() {
        let index = ScreenHitIndex::from_points(&[(AnnotationId(7), Vec2::new(60.0, 0.0))]);

        assert!(index.nearest_within(Vec2::ZERO, 60.0).is_none());
        assert!(index.nearest_within(Vec2::ZERO, 60.5).is_some());
    }

    #[test]
    fn many_points_at_identical_position_share_one_entry() {
        let stacked: Vec<(AnnotationId, Vec2)> = (1..=40)
            .map(|id| (AnnotationId(id), Vec2::new(400.0, 300.0)))
            .collect();
        let index = ScreenHitIndex::from_points(&stacked);

        assert_eq!(index.len(), 40);
        let hit = index
            .nearest_within(Vec2::new(401.0, 300.0), 60.0)
            .expect("Treffer erwartet");
        assert_eq!(hit.annotation, AnnotationId(40));
        assert!((hit.distance_px - 1.0).abs() < 1e-4);
    }

    #[test]
    fn signed_zero_and_non_finite_positions() {
        let mut points: Vec<(AnnotationId, Vec2)> = (0..20)
            .map(|id| (AnnotationId(id), Vec2::new(0.0, 0.0)))
            .collect();
        points.extend((20..40).map(|id| (AnnotationId(id), Vec2::new(-0.0, -0.0))));
        points.push((AnnotationId(99), Vec2::new(f32::NAN, 0.0)));
        let index = ScreenHitIndex::from_points(&points);

        assert_eq!(index.len(), 40);
        let hit = index.nearest(Vec2::ZERO).expect("Treffer erwartet");
        assert_eq!(hit.annotation, AnnotationId(39));
    }

    #[test]
    fn empty_index_has_no_hits() {
        let index = ScreenHitIndex::from_points(&[]);

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(Vec2::ZERO).is_none());
    }
}
