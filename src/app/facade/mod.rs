//! Öffentliche CRUD- und Listener-Oberfläche der Overlay-Engine.
//!
//! `MapFacade` besitzt den gesamten Engine-Zustand (Registry, Z-Index-Liste,
//! Icon-Cache, Shadow-Marker, Reload-Coordinator, Drag-Controller) und das
//! Backend. Die Operationen sind nach Themen auf Untermodule verteilt.

mod camera;
mod circles;
mod input;
mod markers;
mod shapes;
mod style;

use super::drag::DragGestureController;
use super::events::Listeners;
use super::materialize::{self, log_destroy_error};
use super::registry::AnnotationRegistry;
use super::shadow_marker::ShadowMarkers;
use super::style_reload::StyleReloadCoordinator;
use crate::backend::{BaseStyle, MapBackend};
use crate::core::{
    Annotation, AnnotationBody, AnnotationHandle, AnnotationId, IconCache, IconKey, OverlayError,
    Patch, ZIndexList,
};
use crate::shared::EngineOptions;
use std::sync::{Arc, Mutex};

/// Facade über mehrere Threads geteilt; alle Aufrufe nehmen dieselbe Sperre.
pub type SharedMapFacade<B> = Arc<Mutex<MapFacade<B>>>;

/// Karten-Facade über einem Render-Backend.
#[derive(Debug)]
pub struct MapFacade<B: MapBackend> {
    backend: B,
    options: EngineOptions,
    registry: AnnotationRegistry,
    zindex: ZIndexList,
    icons: IconCache,
    shadows: ShadowMarkers,
    reload: StyleReloadCoordinator,
    drag: DragGestureController,
    listeners: Listeners,
}

impl<B: MapBackend> MapFacade<B> {
    /// Erstellt eine Facade; das Backend wird erst beim ersten Anlegen berührt.
    pub fn new(backend: B, options: EngineOptions) -> Self {
        Self {
            backend,
            options,
            registry: AnnotationRegistry::new(),
            zindex: ZIndexList::new(),
            icons: IconCache::new(),
            shadows: ShadowMarkers::new(),
            reload: StyleReloadCoordinator::new(BaseStyle::default()),
            drag: DragGestureController::new(),
            listeners: Listeners::default(),
        }
    }

    /// Facade mit Standard-Optionen.
    pub fn with_defaults(backend: B) -> Self {
        Self::new(backend, EngineOptions::default())
    }

    /// Verpackt die Facade für Hosts mit mehreren Threads.
    pub fn into_shared(self) -> SharedMapFacade<B> {
        Arc::new(Mutex::new(self))
    }

    /// Zugriff auf das Backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Veränderbarer Zugriff auf das Backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Aktuelle Optionen.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Ersetzt die Optionen; gilt für alle folgenden Aufrufe.
    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    /// `true` während eines Style-Reloads.
    pub fn is_stopping_world(&self) -> bool {
        self.reload.is_stopping_world()
    }

    /// Anzahl lebender Annotationen.
    pub fn annotation_count(&self) -> usize {
        self.registry.len()
    }

    /// Prüft, ob ein Handle noch auf eine lebende Annotation zeigt.
    pub fn contains<H: AnnotationHandle>(&self, handle: H) -> bool {
        self.registry.get_kind(handle.id(), H::KIND).is_some()
    }

    /// Annotationen von unten nach oben im Z-Stapel.
    pub fn stacked_annotations(&self) -> Vec<AnnotationId> {
        self.registry.ids_in_stack_order()
    }

    /// Z-Index-Liste (inklusive Sentinels).
    pub fn zindex_list(&self) -> &ZIndexList {
        &self.zindex
    }

    /// Annotation hinter einem Handle (nur lesend).
    pub fn annotation<H: AnnotationHandle>(&self, handle: H) -> Option<&Annotation> {
        self.registry.get_kind(handle.id(), H::KIND)
    }

    /// Z-Index einer Annotation.
    pub fn z_index<H: AnnotationHandle>(&self, handle: H) -> Option<i32> {
        self.annotation(handle).map(|annotation| annotation.z_index)
    }

    /// Sichtbarkeit einer Annotation.
    pub fn is_visible<H: AnnotationHandle>(&self, handle: H) -> Option<bool> {
        self.annotation(handle).map(|annotation| annotation.visible)
    }

    /// Entfernt eine Annotation; unbekannte Handles sind ein No-op.
    pub fn remove<H: AnnotationHandle>(&mut self, handle: H) {
        let id = handle.id();
        if self.registry.get_kind(id, H::KIND).is_none() {
            return;
        }
        let Some(mut annotation) = self.registry.remove(id) else {
            return;
        };
        if self.drag.cancel_for(id) {
            log::debug!("Drag-Session für entfernten Marker {:?} abgebrochen", id);
        }
        materialize::dematerialize(&mut self.backend, &mut self.zindex, &mut annotation);

        if let AnnotationBody::Marker(marker) = &annotation.body {
            self.shadows.remove(&mut self.backend, id);
            if let Some(key) = marker.icon {
                self.release_icon(key);
            }
        }
        log::debug!("Annotation {:?} entfernt", id);
    }

    /// Setzt den Z-Index und sortiert die Layer sofort (oder beim Replay) neu.
    pub fn set_z_index<H: AnnotationHandle>(&mut self, handle: H, z_index: i32) {
        let seq = self.registry.next_stack_seq();
        let Some(annotation) = self.registry.get_kind_mut(handle.id(), H::KIND) else {
            return;
        };
        annotation.z_index = z_index;
        annotation.stack_seq = seq;
        if annotation.is_materialized()
            && let Err(e) = materialize::restack(&mut self.backend, &mut self.zindex, annotation)
        {
            log::warn!("Z-Index von {:?} nicht übernommen: {}", annotation.id, e);
        }
    }

    /// Schaltet die Sichtbarkeit.
    pub fn set_visible<H: AnnotationHandle>(&mut self, handle: H, visible: bool) {
        let id = handle.id();
        let applied = self.update(id, H::KIND, |annotation| {
            Some(annotation.set_visible(visible))
        });
        if applied && H::KIND == crate::core::AnnotationKind::Marker {
            self.shadows.mirror_visible(&mut self.backend, id, visible);
        }
    }

    // ── Interne Helfer ──────────────────────────────────────────

    /// Registriert eine neue Annotation und materialisiert sie, sofern stabil.
    fn insert(&mut self, annotation: Annotation) -> Result<AnnotationId, OverlayError> {
        let mut annotation = annotation;
        if !self.reload.is_stopping_world() {
            self.reload
                .ensure_sentinels(&mut self.backend, &mut self.zindex)?;
            materialize::materialize(&mut self.backend, &mut self.zindex, &mut annotation)?;
        }
        let id = self.registry.register(annotation);
        log::debug!("Annotation {:?} angelegt", id);
        Ok(id)
    }

    /// Wendet eine Eigenschaftsänderung an und überträgt sie ans Backend.
    ///
    /// Gibt `false` zurück, wenn das Handle unbekannt ist oder die Änderung
    /// für die Annotation-Art nicht gilt.
    fn update<F>(&mut self, id: AnnotationId, kind: crate::core::AnnotationKind, change: F) -> bool
    where
        F: FnOnce(&mut Annotation) -> Option<Patch>,
    {
        let Some(annotation) = self.registry.get_kind_mut(id, kind) else {
            return false;
        };
        let Some(patch) = change(annotation) else {
            return false;
        };
        if annotation.is_materialized()
            && let Err(e) = materialize::push_patch(&mut self.backend, annotation, patch)
        {
            log::warn!("Änderung an {:?} nicht übertragen: {}", id, e);
        }
        true
    }

    /// Registriert ein Icon; das Backend-Bild entsteht beim ersten Nutzer.
    fn acquire_icon(&mut self, image: &image::RgbaImage) -> Result<IconKey, OverlayError> {
        let (key, first) = self.icons.acquire(image);
        if first
            && !self.reload.is_stopping_world()
            && let Err(e) = self.backend.add_icon_image(&key.to_string(), image)
        {
            self.icons.release(key);
            return Err(e.into());
        }
        Ok(key)
    }

    /// Gibt ein Icon frei; das Backend-Bild verschwindet mit dem letzten Nutzer.
    fn release_icon(&mut self, key: IconKey) {
        if self.icons.release(key) && !self.reload.is_stopping_world() {
            log_destroy_error(self.backend.remove_icon_image(&key.to_string()));
        }
    }
}
