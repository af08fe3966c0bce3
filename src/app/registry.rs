//! Registry aller lebenden Annotationen.
//!
//! Die Registry überlebt Style-Reloads unverändert. Jede Platzierung im
//! Z-Stapel (Anlegen oder `set_z_index`) vergibt eine neue Stapel-Sequenz,
//! sodass `(z_index, stack_seq)` die exakte Reihenfolge im Stapel beschreibt.

use crate::core::{Annotation, AnnotationId, AnnotationKind};
use indexmap::IndexMap;

/// Registry aller Annotationen in Anlege-Reihenfolge.
#[derive(Debug, Clone)]
pub struct AnnotationRegistry {
    annotations: IndexMap<AnnotationId, Annotation>,
    next_id: u64,
    next_stack_seq: u64,
}

impl Default for AnnotationRegistry {
    fn default() -> Self {
        Self {
            annotations: IndexMap::new(),
            next_id: 1,
            next_stack_seq: 0,
        }
    }
}

impl AnnotationRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vergibt eine neue Annotation-ID (auto-increment).
    pub fn allocate_id(&mut self) -> AnnotationId {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Vergibt die nächste Stapel-Sequenz.
    pub fn next_stack_seq(&mut self) -> u64 {
        let seq = self.next_stack_seq;
        self.next_stack_seq += 1;
        seq
    }

    /// Registriert eine Annotation als neueste ihres Z-Index.
    pub fn register(&mut self, mut annotation: Annotation) -> AnnotationId {
        annotation.stack_seq = self.next_stack_seq();
        let id = annotation.id;
        self.annotations.insert(id, annotation);
        id
    }

    /// Gibt die Annotation mit der angegebenen ID zurück (falls vorhanden).
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    /// Veränderbarer Zugriff auf eine Annotation.
    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.get_mut(&id)
    }

    /// Annotation nur zurückgeben, wenn sie die erwartete Art hat.
    pub fn get_kind(&self, id: AnnotationId, kind: AnnotationKind) -> Option<&Annotation> {
        self.get(id).filter(|annotation| annotation.kind() == kind)
    }

    /// Veränderbarer Zugriff, nur bei passender Art.
    pub fn get_kind_mut(
        &mut self,
        id: AnnotationId,
        kind: AnnotationKind,
    ) -> Option<&mut Annotation> {
        self.get_mut(id).filter(|annotation| annotation.kind() == kind)
    }

    /// Entfernt eine Annotation; `None` für unbekannte IDs.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        self.annotations.shift_remove(&id)
    }

    /// Prüft, ob eine Annotation registriert ist.
    pub fn contains(&self, id: AnnotationId) -> bool {
        self.annotations.contains_key(&id)
    }

    /// Iteriert in Anlege-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    /// Veränderbare Iteration in Anlege-Reihenfolge.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Annotation> {
        self.annotations.values_mut()
    }

    /// IDs von unten nach oben, sortiert nach `(z_index, stack_seq)`.
    pub fn ids_in_stack_order(&self) -> Vec<AnnotationId> {
        let mut ordered: Vec<&Annotation> = self.annotations.values().collect();
        ordered.sort_by_key(|annotation| (annotation.z_index, annotation.stack_seq));
        ordered.into_iter().map(|annotation| annotation.id).collect()
    }

    /// Gibt die Anzahl der registrierten Annotationen zurück.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Gibt zurück ob die Registry leer ist.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
